/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-11
 * @Description  : 批量（foreach）张量运算：把同一种逐元素运算按位置一次性作用于整个张量列表，
 *                 是各优化器单步更新所依赖的“批量算术协作者”。
 *
 * 约定：
 * - 以`_`结尾的函数原地修改第一个列表，其余函数返回新分配的列表；
 * - 所有列表须等长，对应位置的张量须形状一致，否则panic（与张量运算符的误用语义一致）；
 * - 系数可以是所有位置共享的单个纯数，也可以是逐位置的纯数列表（`*_scalars`/`values`）；
 * - 各位置之间互不影响，不做除零检查，NaN/Inf静默传播。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

#[cfg(test)]
mod tests;

fn assert_same_len(len1: usize, len2: usize, operator: Operator) {
    assert!(
        len1 == len2,
        "{}",
        TensorError::ListLengthMismatch {
            operator,
            len1,
            len2,
        }
    );
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓原地运算↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
/// xs[i] += scalar
pub fn add_scalar_(xs: &mut [Tensor], scalar: f32) {
    for x in xs {
        *x += scalar;
    }
}

/// xs[i] += alpha * ys[i]
pub fn add_(xs: &mut [Tensor], ys: &[Tensor], alpha: f32) {
    assert_same_len(xs.len(), ys.len(), Operator::AddAssign);
    for (x, y) in xs.iter_mut().zip(ys) {
        x.add_scaled_(y, alpha);
    }
}

/// xs[i] *= scalar
pub fn mul_scalar_(xs: &mut [Tensor], scalar: f32) {
    for x in xs {
        *x *= scalar;
    }
}

/// xs[i] *= scalars[i]
pub fn mul_scalars_(xs: &mut [Tensor], scalars: &[f32]) {
    assert_same_len(xs.len(), scalars.len(), Operator::MulAssign);
    for (x, &s) in xs.iter_mut().zip(scalars) {
        *x *= s;
    }
}

/// xs[i] /= scalars[i]
pub fn div_scalars_(xs: &mut [Tensor], scalars: &[f32]) {
    assert_same_len(xs.len(), scalars.len(), Operator::DivAssign);
    for (x, &s) in xs.iter_mut().zip(scalars) {
        *x /= s;
    }
}

/// xs[i] += value * tensors1[i] * tensors2[i]
pub fn addcmul_(xs: &mut [Tensor], tensors1: &[Tensor], tensors2: &[Tensor], value: f32) {
    assert_same_len(xs.len(), tensors1.len(), Operator::AddCMul);
    assert_same_len(xs.len(), tensors2.len(), Operator::AddCMul);
    for ((x, t1), t2) in xs.iter_mut().zip(tensors1).zip(tensors2) {
        x.addcmul_(t1, t2, value);
    }
}

/// xs[i] += values[i] * tensors1[i] / tensors2[i]
pub fn addcdiv_(xs: &mut [Tensor], tensors1: &[Tensor], tensors2: &[Tensor], values: &[f32]) {
    assert_same_len(xs.len(), tensors1.len(), Operator::AddCDiv);
    assert_same_len(xs.len(), tensors2.len(), Operator::AddCDiv);
    assert_same_len(xs.len(), values.len(), Operator::AddCDiv);
    for (((x, t1), t2), &value) in xs.iter_mut().zip(tensors1).zip(tensors2).zip(values) {
        x.addcdiv_(t1, t2, value);
    }
}

/// xs[i] = max(xs[i], ys[i])，逐元素，NaN传播
pub fn maximum_(xs: &mut [Tensor], ys: &[Tensor]) {
    assert_same_len(xs.len(), ys.len(), Operator::Maximum);
    for (x, y) in xs.iter_mut().zip(ys) {
        x.maximum_(y);
    }
}

/// xs[i] += weights[i] * (ends[i] - xs[i])
pub fn lerp_(xs: &mut [Tensor], ends: &[Tensor], weights: &[f32]) {
    assert_same_len(xs.len(), ends.len(), Operator::AddAssign);
    assert_same_len(xs.len(), weights.len(), Operator::AddAssign);
    for ((x, end), &w) in xs.iter_mut().zip(ends).zip(weights) {
        x.lerp_(end, w);
    }
}

/// dsts[i] := srcs[i]
pub fn copy_(dsts: &mut [Tensor], srcs: &[Tensor]) {
    assert_same_len(dsts.len(), srcs.len(), Operator::Assign);
    for (dst, src) in dsts.iter_mut().zip(srcs) {
        dst.assign(src);
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑原地运算↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓返回新列表的运算↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
pub fn abs(xs: &[Tensor]) -> Vec<Tensor> {
    xs.iter().map(Tensor::abs).collect()
}

pub fn sqrt(xs: &[Tensor]) -> Vec<Tensor> {
    xs.iter().map(Tensor::sqrt).collect()
}

pub fn add_scalar(xs: &[Tensor], scalar: f32) -> Vec<Tensor> {
    xs.iter().map(|x| x + scalar).collect()
}

pub fn div_scalars(xs: &[Tensor], scalars: &[f32]) -> Vec<Tensor> {
    assert_same_len(xs.len(), scalars.len(), Operator::Div);
    xs.iter().zip(scalars).map(|(x, &s)| x / s).collect()
}

pub fn zeros_like(xs: &[Tensor]) -> Vec<Tensor> {
    xs.iter().map(Tensor::zeros_like).collect()
}

pub fn ones_like(xs: &[Tensor]) -> Vec<Tensor> {
    xs.iter().map(Tensor::ones_like).collect()
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑返回新列表的运算↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
