/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-11
 * @Description  : ASGD：平均随机梯度下降（学习率随步数衰减，并维护参数的滑动平均 ax）
 *
 * 更新规则（对每个参数 i）：
 *   step += 1
 *   g = g + weight_decay * θ                    （weight_decay ≠ 0 时）
 *   θ = θ * (1 - λ * η)
 *   θ = θ - η * g
 *   ax = θ                                      （μ == 1 时，即预热阶段）
 *   ax = ax + μ * (θ - ax)                      （其他情况）
 *   η = lr / (1 + λ * lr * step)^α
 *   μ = 1 / max(1, step - t0)
 *
 * 注：前两步中的 η 一律取第0个参数的 η（各参数的 η 由调用方保证相等），
 *     而每个参数各自的 η、μ 仍按其自身步数分别更新。
 */

use super::config::{AsgdConfig, HyperParameters};
use super::{check_aligned, check_len, increment_steps};
use crate::errors::OptimError;
use crate::foreach;
use crate::tensor::Tensor;

/// ASGD 的逐参数状态
#[derive(Debug, Clone, PartialEq)]
pub struct AsgdState {
    /// 参数的平均值（训练结束后用于评估）
    axs: Vec<Tensor>,
    /// 当前有效学习率
    etas: Vec<f64>,
    /// 当前平均权重
    mus: Vec<f64>,
    /// 步数
    steps: Vec<u64>,
}

impl AsgdState {
    /// 为一组参数创建初始状态：ax=0，η=lr，μ=1，step=0
    pub fn new(params: &[Tensor], lr: f64) -> Self {
        Self {
            axs: foreach::zeros_like(params),
            etas: vec![lr; params.len()],
            mus: vec![1.0; params.len()],
            steps: vec![0; params.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn axs(&self) -> &[Tensor] {
        &self.axs
    }

    pub fn etas(&self) -> &[f64] {
        &self.etas
    }

    pub fn mus(&self) -> &[f64] {
        &self.mus
    }

    pub fn steps(&self) -> &[u64] {
        &self.steps
    }
}

/// ASGD 单步更新（原地修改`params`、`grads`与`state`）
///
/// `weight_decay`不为0时，L2 惩罚项会被原地加到`grads`上。
pub fn asgd(
    params: &mut [Tensor],
    grads: &mut [Tensor],
    state: &mut AsgdState,
    config: &AsgdConfig,
) -> Result<(), OptimError> {
    config.validate()?;
    check_aligned("grads", params, grads)?;
    check_aligned("axs", params, &state.axs)?;
    check_len("etas", params.len(), state.etas.len())?;
    check_len("mus", params.len(), state.mus.len())?;
    check_len("steps", params.len(), state.steps.len())?;
    if params.is_empty() {
        return Ok(());
    }

    let AsgdConfig {
        lr,
        lambd,
        alpha,
        t0,
        weight_decay,
    } = *config;

    increment_steps(&mut state.steps);

    if weight_decay != 0.0 {
        foreach::add_(grads, params, weight_decay as f32);
    }

    // 衰减项与梯度步共用第0个参数的 η
    let eta = state.etas[0];
    foreach::mul_scalar_(params, (1.0 - lambd * eta) as f32);
    foreach::add_(params, grads, -eta as f32);

    // 平均
    for ((ax, param), &mu) in state.axs.iter_mut().zip(params.iter()).zip(&state.mus) {
        if mu == 1.0 {
            ax.assign(param);
        } else {
            ax.lerp_(param, mu as f32);
        }
    }

    // 更新 η 与 μ
    let was_burning_in = state.mus[0] == 1.0;
    for ((eta, mu), &step) in state
        .etas
        .iter_mut()
        .zip(state.mus.iter_mut())
        .zip(&state.steps)
    {
        let step = step as f64;
        *eta = lr / (1.0 + lambd * lr * step).powf(alpha);
        *mu = 1.0 / f64::max(1.0, step - t0);
    }
    if was_burning_in && state.mus[0] != 1.0 {
        tracing::debug!(step = state.steps[0], "ASGD 结束预热，开始对参数做指数平均");
    }

    tracing::trace!(params = params.len(), step = state.steps[0], eta, "ASGD 单步更新完成");
    Ok(())
}
