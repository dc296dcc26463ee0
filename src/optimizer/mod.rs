/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-11
 * @Description  : 批量（foreach）优化器：Adamax、ASGD、RAdam、NAdam 的单步更新规则，
 *                 一次调用处理一整组参数，以摊薄逐张量运算的开销。
 *
 * 核心特性：
 * - 每种算法都是一个独立的纯状态转移函数：`xxx(params, grads, state, config)`
 * - 参数、梯度与状态原地修改，函数不保留任何跨调用的引用
 * - 状态（`XxxState`）由参数列表构造，内部各列表与参数按位置一一对应
 * - 所有合法性检查都在任何修改之前完成：返回 Err 时输入保持原样
 * - 数值异常（NaN/Inf）不做拦截，按浮点语义静默传播
 */

mod adamax;
mod asgd;
mod config;
mod nadam;
mod radam;

pub use adamax::{AdamaxState, adamax};
pub use asgd::{AsgdState, asgd};
pub use config::{AdamaxConfig, AsgdConfig, HyperParameters, NAdamConfig, RAdamConfig};
pub use nadam::{NAdamState, nadam};
pub use radam::{RAdamState, Rectification, radam};

use crate::errors::OptimError;
use crate::tensor::Tensor;

#[cfg(test)]
mod tests;

/// 检查某个逐参数列表的长度是否与参数个数一致
fn check_len(name: &'static str, expected: usize, got: usize) -> Result<(), OptimError> {
    if expected == got {
        Ok(())
    } else {
        Err(OptimError::LengthMismatch {
            name,
            expected,
            got,
        })
    }
}

/// 检查某个逐参数张量列表（梯度或状态）与参数列表按位置对齐：长度一致且对应形状一致
fn check_aligned(
    name: &'static str,
    params: &[Tensor],
    tensors: &[Tensor],
) -> Result<(), OptimError> {
    check_len(name, params.len(), tensors.len())?;
    for (index, (param, tensor)) in params.iter().zip(tensors).enumerate() {
        if !param.is_same_shape(tensor) {
            return Err(OptimError::ShapeMismatch {
                name,
                index,
                expected: param.shape().to_vec(),
                got: tensor.shape().to_vec(),
            });
        }
    }
    Ok(())
}

/// 所有参数的步数各加1
fn increment_steps(steps: &mut [u64]) {
    for step in steps {
        *step += 1;
    }
}

/// 偏差修正系数：1 - β^step
fn bias_correction(beta: f64, step: u64) -> f64 {
    1.0 - beta.powf(step as f64)
}

/// 把以 f64 计算的逐参数系数收窄为作用于张量元素的 f32
fn narrow(values: impl IntoIterator<Item = f64>) -> Vec<f32> {
    values.into_iter().map(|v| v as f32).collect()
}
