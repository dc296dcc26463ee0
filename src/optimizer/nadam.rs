/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-11
 * @Description  : NAdam：带Nesterov动量的Adam（Dozat, 2016）
 *
 * 更新规则（对每个参数 i）：
 *   step += 1
 *   g = g + weight_decay * θ                    （weight_decay ≠ 0 时）
 *   μ_t     = β1 * (1 - 0.5 * 0.96^(step * momentum_decay))
 *   μ_{t+1} = β1 * (1 - 0.5 * 0.96^((step + 1) * momentum_decay))
 *   Π = Π * μ_t                                  （μ 的累乘，初值为1）
 *   m = β1 * m + (1 - β1) * g
 *   v = β2 * v + (1 - β2) * g²
 *   d = √v / √(1 - β2^step) + ε
 *   θ = θ - lr * (1 - μ_t) / (1 - Π) * g / d
 *   θ = θ - lr * μ_{t+1} / (1 - Π * μ_{t+1}) * m / d
 */

use super::config::{HyperParameters, NAdamConfig};
use super::{bias_correction, check_aligned, check_len, increment_steps, narrow};
use crate::errors::OptimError;
use crate::foreach;
use crate::tensor::Tensor;

/// 第`step`步的动量系数 μ
fn momentum(beta1: f64, momentum_decay: f64, step: u64) -> f64 {
    beta1 * (1.0 - 0.5 * 0.96_f64.powf(step as f64 * momentum_decay))
}

/// NAdam 的逐参数状态
#[derive(Debug, Clone, PartialEq)]
pub struct NAdamState {
    /// 一阶矩估计
    exp_avgs: Vec<Tensor>,
    /// 二阶矩估计
    exp_avg_sqs: Vec<Tensor>,
    /// 历次动量系数 μ 的累乘
    mu_products: Vec<f64>,
    /// 步数
    steps: Vec<u64>,
}

impl NAdamState {
    /// 为一组参数创建初始状态：矩估计为0，μ累乘为1，step=0
    pub fn new(params: &[Tensor]) -> Self {
        Self {
            exp_avgs: foreach::zeros_like(params),
            exp_avg_sqs: foreach::zeros_like(params),
            mu_products: vec![1.0; params.len()],
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

    pub fn exp_avg_sqs(&self) -> &[Tensor] {
        &self.exp_avg_sqs
    }

    pub fn mu_products(&self) -> &[f64] {
        &self.mu_products
    }

    pub fn steps(&self) -> &[u64] {
        &self.steps
    }
}

/// NAdam 单步更新（原地修改`params`、`grads`与`state`）
///
/// `weight_decay`不为0时，L2 惩罚项会被原地加到`grads`上。
pub fn nadam(
    params: &mut [Tensor],
    grads: &mut [Tensor],
    state: &mut NAdamState,
    config: &NAdamConfig,
) -> Result<(), OptimError> {
    config.validate()?;
    check_aligned("grads", params, grads)?;
    check_aligned("exp_avgs", params, &state.exp_avgs)?;
    check_aligned("exp_avg_sqs", params, &state.exp_avg_sqs)?;
    check_len("mu_products", params.len(), state.mu_products.len())?;
    check_len("steps", params.len(), state.steps.len())?;
    if params.is_empty() {
        return Ok(());
    }

    let NAdamConfig {
        lr,
        beta1,
        beta2,
        eps,
        weight_decay,
        momentum_decay,
    } = *config;

    increment_steps(&mut state.steps);

    if weight_decay != 0.0 {
        foreach::add_(grads, params, weight_decay as f32);
    }

    // 本步与下一步的动量系数，并累乘到 Π 上
    let mus: Vec<f64> = state
        .steps
        .iter()
        .map(|&step| momentum(beta1, momentum_decay, step))
        .collect();
    let mu_nexts: Vec<f64> = state
        .steps
        .iter()
        .map(|&step| momentum(beta1, momentum_decay, step + 1))
        .collect();
    for (mu_product, &mu) in state.mu_products.iter_mut().zip(&mus) {
        *mu_product *= mu;
    }

    // 更新一阶矩与二阶矩
    foreach::mul_scalar_(&mut state.exp_avgs, beta1 as f32);
    foreach::add_(&mut state.exp_avgs, grads, (1.0 - beta1) as f32);
    foreach::mul_scalar_(&mut state.exp_avg_sqs, beta2 as f32);
    foreach::addcmul_(&mut state.exp_avg_sqs, grads, grads, (1.0 - beta2) as f32);

    let bias_correction2_sqrts = narrow(
        state
            .steps
            .iter()
            .map(|&step| bias_correction(beta2, step).sqrt()),
    );
    let mut denoms = foreach::sqrt(&state.exp_avg_sqs);
    foreach::div_scalars_(&mut denoms, &bias_correction2_sqrts);
    foreach::add_scalar_(&mut denoms, eps as f32);

    // 当前梯度一项
    let grad_step_sizes = narrow(
        mus.iter()
            .zip(&state.mu_products)
            .map(|(&mu, &mu_product)| -(lr * (1.0 - mu) / (1.0 - mu_product))),
    );
    foreach::addcdiv_(params, grads, &denoms, &grad_step_sizes);

    // 前瞻动量一项
    let momentum_step_sizes = narrow(
        mu_nexts
            .iter()
            .zip(&state.mu_products)
            .map(|(&mu_next, &mu_product)| -(lr * mu_next / (1.0 - mu_product * mu_next))),
    );
    foreach::addcdiv_(params, &state.exp_avgs, &denoms, &momentum_step_sizes);

    tracing::trace!(
        params = params.len(),
        step = state.steps[0],
        mu_product = state.mu_products[0],
        "NAdam 单步更新完成"
    );
    Ok(())
}
