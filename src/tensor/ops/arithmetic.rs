/*
 * @Author       : 老董
 * @Date         : 2023-08-17 17:24:24
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-11
 * @Description  : 张量的加减乘除，实现了两个张量“逐元素”（或张量与纯数）运算，
 *                 包括返回新张量的形式（`+ - * /`）与原地修改的形式（`+= -= *= /=`）。
 *                 该运算支持以下情况：
 *                 1. 其中一个操作数为纯数而另一个为张量：则返回的张量形状与该张量相同；
 *                 2. 两个张量形状严格一致：逐元素运算，形状不变；
 *                 3. 两个张量中有一个为标量：标量被广播到另一个张量的每个元素上。
 *                 其他情况一律panic。
 *                 注意：除法不检查除数是否为零，结果遵循IEEE浮点语义（如0/0得NaN），
 *                 这与优化器“数值异常静默传播”的约定一致。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use ndarray::{Array, IxDyn, Zip};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// 两个张量逐元素运算（形状一致，或其中之一为标量）
fn elementwise(
    lhs: &Tensor,
    rhs: &Tensor,
    operator: Operator,
    op: impl Fn(f32, f32) -> f32,
) -> Tensor {
    let data: Array<f32, IxDyn> = if lhs.is_same_shape(rhs) {
        Zip::from(&lhs.data).and(&rhs.data).map_collect(|&a, &b| op(a, b))
    } else if let Some(b) = rhs.number() {
        lhs.data.mapv(|a| op(a, b))
    } else if let Some(a) = lhs.number() {
        rhs.data.mapv(|b| op(a, b))
    } else {
        panic!(
            "{}",
            TensorError::OperatorError {
                operator,
                tensor1_shape: lhs.shape().to_vec(),
                tensor2_shape: rhs.shape().to_vec(),
            }
        )
    };
    Tensor { data }
}

/// 原地逐元素运算。右操作数须与自身形状一致，或为标量
fn elementwise_assign(
    lhs: &mut Tensor,
    rhs: &Tensor,
    operator: Operator,
    op: impl Fn(&mut f32, f32),
) {
    if lhs.is_same_shape(rhs) {
        Zip::from(&mut lhs.data).and(&rhs.data).for_each(|a, &b| op(a, b));
    } else if let Some(b) = rhs.number() {
        lhs.data.map_inplace(|a| op(a, b));
    } else {
        panic!(
            "{}",
            TensorError::OperatorError {
                operator,
                tensor1_shape: lhs.shape().to_vec(),
                tensor2_shape: rhs.shape().to_vec(),
            }
        )
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $operator:expr, $op:tt) => {
        /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 与 f32↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
        impl $trait<f32> for Tensor {
            type Output = Tensor;
            fn $method(self, scalar: f32) -> Tensor {
                Tensor {
                    data: self.data.mapv(|a| a $op scalar),
                }
            }
        }
        impl $trait<f32> for &Tensor {
            type Output = Tensor;
            fn $method(self, scalar: f32) -> Tensor {
                Tensor {
                    data: self.data.mapv(|a| a $op scalar),
                }
            }
        }
        impl $trait<Tensor> for f32 {
            type Output = Tensor;
            fn $method(self, tensor: Tensor) -> Tensor {
                Tensor {
                    data: tensor.data.mapv(|b| self $op b),
                }
            }
        }
        impl $trait<&Tensor> for f32 {
            type Output = Tensor;
            fn $method(self, tensor: &Tensor) -> Tensor {
                Tensor {
                    data: tensor.data.mapv(|b| self $op b),
                }
            }
        }
        /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 与 f32↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

        /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 与（不）带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
        impl $trait for Tensor {
            type Output = Tensor;
            fn $method(self, other: Tensor) -> Tensor {
                elementwise(&self, &other, $operator, |a, b| a $op b)
            }
        }
        impl $trait<&Tensor> for Tensor {
            type Output = Tensor;
            fn $method(self, other: &Tensor) -> Tensor {
                elementwise(&self, other, $operator, |a, b| a $op b)
            }
        }
        impl $trait<Tensor> for &Tensor {
            type Output = Tensor;
            fn $method(self, other: Tensor) -> Tensor {
                elementwise(self, &other, $operator, |a, b| a $op b)
            }
        }
        impl $trait<&Tensor> for &Tensor {
            type Output = Tensor;
            fn $method(self, other: &Tensor) -> Tensor {
                elementwise(self, other, $operator, |a, b| a $op b)
            }
        }
        /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 与（不）带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
    };
}

macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $operator:expr, $op:tt) => {
        impl $trait<f32> for Tensor {
            fn $method(&mut self, scalar: f32) {
                self.data.map_inplace(|a| *a $op scalar);
            }
        }
        impl $trait for Tensor {
            fn $method(&mut self, other: Tensor) {
                elementwise_assign(self, &other, $operator, |a, b| *a $op b);
            }
        }
        impl $trait<&Tensor> for Tensor {
            fn $method(&mut self, other: &Tensor) {
                elementwise_assign(self, other, $operator, |a, b| *a $op b);
            }
        }
    };
}

impl_binary_op!(Add, add, Operator::Add, +);
impl_binary_op!(Sub, sub, Operator::Sub, -);
impl_binary_op!(Mul, mul, Operator::Mul, *);
impl_binary_op!(Div, div, Operator::Div, /);

impl_assign_op!(AddAssign, add_assign, Operator::AddAssign, +=);
impl_assign_op!(SubAssign, sub_assign, Operator::SubAssign, -=);
impl_assign_op!(MulAssign, mul_assign, Operator::MulAssign, *=);
impl_assign_op!(DivAssign, div_assign, Operator::DivAssign, /=);
