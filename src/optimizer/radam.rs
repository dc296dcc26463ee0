/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-11
 * @Description  : RAdam：Rectified Adam（Liu et al., 2019）
 *
 * 早期训练中二阶矩估计样本太少，自适应学习率的方差过大。RAdam 用 ρ（简单移动平均的近似长度）
 * 衡量二阶矩估计的可靠程度：ρ_t > 5 时使用经过方差修正的自适应步；否则退化为带动量的 SGD 步。
 *
 * 更新规则（对每个参数 i）：
 *   step += 1
 *   ρ_inf = 2 / (1 - β2) - 1
 *   ρ_t   = ρ_inf - 2 * step * β2^step / (1 - β2^step)
 *   g = g + weight_decay * θ                    （weight_decay ≠ 0 时）
 *   m = β1 * m + (1 - β1) * g
 *   v = β2 * v + (1 - β2) * g²
 *   若 ρ_t > 5（Rectified）：
 *     r = √((ρ_t - 4)(ρ_t - 2)ρ_inf / ((ρ_inf - 4)(ρ_inf - 2)ρ_t))
 *     θ = θ - lr * r / (1 - β1^step) * m / (√v / √(1 - β2^step))
 *   否则（Unrectified）：
 *     θ = θ - lr / (1 - β1^step) * m
 */

use super::config::{HyperParameters, RAdamConfig};
use super::{bias_correction, check_aligned, check_len, increment_steps};
use crate::errors::OptimError;
use crate::foreach;
use crate::tensor::Tensor;

/// 某一步上某个参数采用的更新分支（两者互斥）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rectification {
    /// 二阶矩估计足够可靠：使用方差修正系数为`r`的自适应步
    Rectified(f64),
    /// 二阶矩估计不可靠：退化为纯动量步
    Unrectified,
}

impl Rectification {
    /// 根据 β2 与步数（≥1）决定分支
    pub fn at_step(beta2: f64, step: u64) -> Self {
        let rho_inf = 2.0 / (1.0 - beta2) - 1.0;
        let step = step as f64;
        let beta2_t = beta2.powf(step);
        let rho_t = rho_inf - 2.0 * step * beta2_t / (1.0 - beta2_t);
        if rho_t > 5.0 {
            Self::Rectified(
                ((rho_t - 4.0) * (rho_t - 2.0) * rho_inf
                    / ((rho_inf - 4.0) * (rho_inf - 2.0) * rho_t))
                    .sqrt(),
            )
        } else {
            Self::Unrectified
        }
    }

    /// 方差修正系数：自适应分支下为`r`，否则为0
    pub fn rect(&self) -> f64 {
        match self {
            Self::Rectified(rect) => *rect,
            Self::Unrectified => 0.0,
        }
    }

    /// 纯动量分支的选择子：纯动量分支下为1，否则为0
    pub fn unrectified(&self) -> f64 {
        match self {
            Self::Rectified(_) => 0.0,
            Self::Unrectified => 1.0,
        }
    }
}

/// RAdam 的逐参数状态
#[derive(Debug, Clone, PartialEq)]
pub struct RAdamState {
    /// 一阶矩估计
    exp_avgs: Vec<Tensor>,
    /// 二阶矩估计
    exp_avg_sqs: Vec<Tensor>,
    /// 步数
    steps: Vec<u64>,
}

impl RAdamState {
    /// 为一组参数创建初始状态（均为0）
    pub fn new(params: &[Tensor]) -> Self {
        Self {
            exp_avgs: foreach::zeros_like(params),
            exp_avg_sqs: foreach::zeros_like(params),
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

    pub fn steps(&self) -> &[u64] {
        &self.steps
    }

    /// 每个参数在其当前步数上所处的分支（step 为0的参数尚未更新过，视为纯动量分支）
    pub fn rectifications(&self, beta2: f64) -> Vec<Rectification> {
        self.steps
            .iter()
            .map(|&step| {
                if step == 0 {
                    Rectification::Unrectified
                } else {
                    Rectification::at_step(beta2, step)
                }
            })
            .collect()
    }
}

/// RAdam 单步更新（原地修改`params`、`grads`与`state`）
///
/// `weight_decay`不为0时，L2 惩罚项会被原地加到`grads`上。
pub fn radam(
    params: &mut [Tensor],
    grads: &mut [Tensor],
    state: &mut RAdamState,
    config: &RAdamConfig,
) -> Result<(), OptimError> {
    config.validate()?;
    check_aligned("grads", params, grads)?;
    check_aligned("exp_avgs", params, &state.exp_avgs)?;
    check_aligned("exp_avg_sqs", params, &state.exp_avg_sqs)?;
    check_len("steps", params.len(), state.steps.len())?;
    if params.is_empty() {
        return Ok(());
    }

    let RAdamConfig {
        lr,
        beta1,
        beta2,
        weight_decay,
        ..
    } = *config;

    increment_steps(&mut state.steps);

    if weight_decay != 0.0 {
        foreach::add_(grads, params, weight_decay as f32);
    }

    // 更新一阶矩与二阶矩
    foreach::mul_scalar_(&mut state.exp_avgs, beta1 as f32);
    foreach::add_(&mut state.exp_avgs, grads, (1.0 - beta1) as f32);
    foreach::mul_scalar_(&mut state.exp_avg_sqs, beta2 as f32);
    foreach::addcmul_(&mut state.exp_avg_sqs, grads, grads, (1.0 - beta2) as f32);

    let mut switched = 0;
    for (i, param) in params.iter_mut().enumerate() {
        let step = state.steps[i];
        let bias_correction1 = bias_correction(beta1, step);
        match Rectification::at_step(beta2, step) {
            Rectification::Rectified(rect) => {
                // ρ_t 随步数单调递增，只需看上一步是否还在纯动量分支
                if step > 1 && Rectification::at_step(beta2, step - 1) == Rectification::Unrectified
                {
                    switched += 1;
                }
                let bias_correction2_sqrt = bias_correction(beta2, step).sqrt();
                let denom = &state.exp_avg_sqs[i].sqrt() / bias_correction2_sqrt as f32;
                let step_size = -(lr * rect / bias_correction1);
                param.addcdiv_(&state.exp_avgs[i], &denom, step_size as f32);
            }
            Rectification::Unrectified => {
                let step_size = -(lr / bias_correction1);
                param.add_scaled_(&state.exp_avgs[i], step_size as f32);
            }
        }
    }

    if switched > 0 {
        tracing::debug!(
            step = state.steps[0],
            switched,
            "RAdam 二阶矩估计已足够可靠，开始使用自适应更新"
        );
    }

    tracing::trace!(params = params.len(), step = state.steps[0], "RAdam 单步更新完成");
    Ok(())
}
