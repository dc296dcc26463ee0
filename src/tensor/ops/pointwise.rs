/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-11
 * @Description  : 单个张量上的逐元素内核（含原地版本，以`_`结尾），是批量（foreach）运算的基本单元。
 *                 除`assign`外，所有双/三操作数内核都要求各张量形状严格一致，否则panic。
 *                 数值异常（NaN/Inf）一律静默传播。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use ndarray::Zip;

/// 逐元素最大值。任一操作数为NaN时结果为NaN（与`f32::max`忽略NaN的行为不同）
fn nan_max(a: f32, b: f32) -> f32 {
    if a.is_nan() || b.is_nan() {
        f32::NAN
    } else {
        a.max(b)
    }
}

impl Tensor {
    fn assert_same_shape(&self, other: &Self, operator: Operator) {
        assert!(
            self.is_same_shape(other),
            "{}",
            TensorError::OperatorError {
                operator,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
    }

    /// 逐元素取绝对值
    pub fn abs(&self) -> Self {
        Self {
            data: self.data.mapv(f32::abs),
        }
    }

    /// 逐元素开平方（负数得NaN）
    pub fn sqrt(&self) -> Self {
        Self {
            data: self.data.mapv(f32::sqrt),
        }
    }

    /// 原地取逐元素最大值：self = max(self, other)
    pub fn maximum_(&mut self, other: &Self) {
        self.assert_same_shape(other, Operator::Maximum);
        Zip::from(&mut self.data)
            .and(&other.data)
            .for_each(|a, &b| *a = nan_max(*a, b));
    }

    /// 原地缩放相加：self += alpha * other
    pub fn add_scaled_(&mut self, other: &Self, alpha: f32) {
        self.assert_same_shape(other, Operator::AddAssign);
        Zip::from(&mut self.data)
            .and(&other.data)
            .for_each(|a, &b| *a += alpha * b);
    }

    /// 原地乘加：self += value * tensor1 * tensor2
    pub fn addcmul_(&mut self, tensor1: &Self, tensor2: &Self, value: f32) {
        self.assert_same_shape(tensor1, Operator::AddCMul);
        self.assert_same_shape(tensor2, Operator::AddCMul);
        Zip::from(&mut self.data)
            .and(&tensor1.data)
            .and(&tensor2.data)
            .for_each(|a, &t1, &t2| *a += value * t1 * t2);
    }

    /// 原地除加：self += value * tensor1 / tensor2（不检查除数为零）
    pub fn addcdiv_(&mut self, tensor1: &Self, tensor2: &Self, value: f32) {
        self.assert_same_shape(tensor1, Operator::AddCDiv);
        self.assert_same_shape(tensor2, Operator::AddCDiv);
        Zip::from(&mut self.data)
            .and(&tensor1.data)
            .and(&tensor2.data)
            .for_each(|a, &t1, &t2| *a += value * t1 / t2);
    }

    /// 原地线性插值：self += weight * (end - self)
    pub fn lerp_(&mut self, end: &Self, weight: f32) {
        self.assert_same_shape(end, Operator::AddAssign);
        Zip::from(&mut self.data)
            .and(&end.data)
            .for_each(|a, &e| *a += (e - *a) * weight);
    }

    /// 用`other`的值覆盖自身（形状须一致）
    pub fn assign(&mut self, other: &Self) {
        self.assert_same_shape(other, Operator::Assign);
        self.data.assign(&other.data);
    }
}
