/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-11
 * @Description  : Adamax：以无穷范数代替二阶矩的 Adam 变体
 *
 * 更新规则（对每个参数 i）：
 *   step += 1
 *   g = g + weight_decay * θ                    （weight_decay ≠ 0 时）
 *   m = β1 * m + (1 - β1) * g
 *   u = max(β2 * u, |g| + ε)                    （逐元素；ε 在取最大值之前加入，避免 u 为 0 时停滞）
 *   θ = θ - lr / (1 - β1^step) * m / u
 */

use super::config::{AdamaxConfig, HyperParameters};
use super::{bias_correction, check_aligned, check_len, increment_steps, narrow};
use crate::errors::OptimError;
use crate::foreach;
use crate::tensor::Tensor;

/// Adamax 的逐参数状态
#[derive(Debug, Clone, PartialEq)]
pub struct AdamaxState {
    /// 梯度的指数移动平均
    exp_avgs: Vec<Tensor>,
    /// 指数加权的无穷范数
    exp_infs: Vec<Tensor>,
    /// 步数
    steps: Vec<u64>,
}

impl AdamaxState {
    /// 为一组参数创建初始状态（均为0）
    pub fn new(params: &[Tensor]) -> Self {
        Self {
            exp_avgs: foreach::zeros_like(params),
            exp_infs: foreach::zeros_like(params),
            steps: vec![0; params.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn exp_avgs(&self) -> &[Tensor] {
        &self.exp_avgs
    }

    pub fn exp_infs(&self) -> &[Tensor] {
        &self.exp_infs
    }

    pub fn steps(&self) -> &[u64] {
        &self.steps
    }
}

/// Adamax 单步更新（原地修改`params`、`grads`与`state`）
///
/// `weight_decay`不为0时，L2 惩罚项会被原地加到`grads`上。
pub fn adamax(
    params: &mut [Tensor],
    grads: &mut [Tensor],
    state: &mut AdamaxState,
    config: &AdamaxConfig,
) -> Result<(), OptimError> {
    config.validate()?;
    check_aligned("grads", params, grads)?;
    check_aligned("exp_avgs", params, &state.exp_avgs)?;
    check_aligned("exp_infs", params, &state.exp_infs)?;
    check_len("steps", params.len(), state.steps.len())?;
    if params.is_empty() {
        return Ok(());
    }

    let AdamaxConfig {
        lr,
        beta1,
        beta2,
        eps,
        weight_decay,
    } = *config;

    increment_steps(&mut state.steps);

    if weight_decay != 0.0 {
        foreach::add_(grads, params, weight_decay as f32);
    }

    // 更新一阶矩
    foreach::mul_scalar_(&mut state.exp_avgs, beta1 as f32);
    foreach::add_(&mut state.exp_avgs, grads, (1.0 - beta1) as f32);

    // 更新指数加权无穷范数
    foreach::mul_scalar_(&mut state.exp_infs, beta2 as f32);
    let mut norms = foreach::abs(grads);
    foreach::add_scalar_(&mut norms, eps as f32);
    foreach::maximum_(&mut state.exp_infs, &norms);

    let step_sizes = narrow(
        state
            .steps
            .iter()
            .map(|&step| -(lr / bias_correction(beta1, step))),
    );
    foreach::addcdiv_(params, &state.exp_avgs, &state.exp_infs, &step_sizes);

    tracing::trace!(params = params.len(), step = state.steps[0], "Adamax 单步更新完成");
    Ok(())
}
