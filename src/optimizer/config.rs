/*
 * @Author       : 老董
 * @Date         : 2026-02-11
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-11
 * @Description  : 各优化器的超参数配置。
 *                 默认值与PyTorch对应优化器的默认值一致；支持JSON序列化，且JSON中可只给出部分字段，
 *                 缺省字段取默认值。
 */

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{ComparisonOperator, OptimError};

/// 超参数配置的公共行为
pub trait HyperParameters: Serialize + DeserializeOwned + Sized {
    /// 检查所有超参数是否合法（有限值且在允许范围内）
    fn validate(&self) -> Result<(), OptimError>;

    /// 转换为 JSON 字符串
    fn to_json(&self) -> Result<String, OptimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 字符串解析，并做合法性检查
    fn from_json(json: &str) -> Result<Self, OptimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓合法性检查的辅助函数↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
fn finite(name: &'static str, value: f64) -> Result<(), OptimError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OptimError::NonFiniteHyperParameter { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), OptimError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(OptimError::InvalidHyperParameter {
            name,
            operator: ComparisonOperator::GreaterOrEqual,
            threshold: 0.0,
            value,
        })
    }
}

/// β须在[0, 1)内
fn beta(name: &'static str, value: f64) -> Result<(), OptimError> {
    non_negative(name, value)?;
    if value < 1.0 {
        Ok(())
    } else {
        Err(OptimError::InvalidHyperParameter {
            name,
            operator: ComparisonOperator::LessThan,
            threshold: 1.0,
            value,
        })
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑合法性检查的辅助函数↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/// Adamax 超参数
///
/// 默认：lr=2e-3, β1=0.9, β2=0.999, ε=1e-8, weight_decay=0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdamaxConfig {
    /// 学习率
    pub lr: f64,
    /// β1 (一阶矩衰减)
    pub beta1: f64,
    /// β2 (无穷范数衰减)
    pub beta2: f64,
    /// 数值稳定项，在取最大值之前加到|grad|上
    pub eps: f64,
    /// L2 惩罚系数（折算进梯度）
    pub weight_decay: f64,
}

impl Default for AdamaxConfig {
    fn default() -> Self {
        Self {
            lr: 2e-3,
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-8,
            weight_decay: 0.0,
        }
    }
}

impl AdamaxConfig {
    pub fn new(lr: f64) -> Self {
        Self {
            lr,
            ..Self::default()
        }
    }

    pub const fn lr(mut self, lr: f64) -> Self {
        self.lr = lr;
        self
    }

    pub const fn betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub const fn eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub const fn weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }
}

impl HyperParameters for AdamaxConfig {
    fn validate(&self) -> Result<(), OptimError> {
        non_negative("lr", self.lr)?;
        beta("beta1", self.beta1)?;
        beta("beta2", self.beta2)?;
        non_negative("eps", self.eps)?;
        non_negative("weight_decay", self.weight_decay)
    }
}

/// ASGD（平均随机梯度下降）超参数
///
/// 默认：lr=1e-2, λ=1e-4, α=0.75, t0=1e6, weight_decay=0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsgdConfig {
    /// 初始学习率（也是 eta 的初始值）
    pub lr: f64,
    /// 衰减项系数
    pub lambd: f64,
    /// eta 更新的幂次
    pub alpha: f64,
    /// 开始做指数平均的步数（此前 ax 直接跟随参数）
    pub t0: f64,
    /// L2 惩罚系数（折算进梯度）
    pub weight_decay: f64,
}

impl Default for AsgdConfig {
    fn default() -> Self {
        Self {
            lr: 1e-2,
            lambd: 1e-4,
            alpha: 0.75,
            t0: 1e6,
            weight_decay: 0.0,
        }
    }
}

impl AsgdConfig {
    pub fn new(lr: f64) -> Self {
        Self {
            lr,
            ..Self::default()
        }
    }

    pub const fn lr(mut self, lr: f64) -> Self {
        self.lr = lr;
        self
    }

    pub const fn lambd(mut self, lambd: f64) -> Self {
        self.lambd = lambd;
        self
    }

    pub const fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub const fn t0(mut self, t0: f64) -> Self {
        self.t0 = t0;
        self
    }

    pub const fn weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }
}

impl HyperParameters for AsgdConfig {
    fn validate(&self) -> Result<(), OptimError> {
        non_negative("lr", self.lr)?;
        non_negative("lambd", self.lambd)?;
        non_negative("alpha", self.alpha)?;
        finite("t0", self.t0)?;
        non_negative("weight_decay", self.weight_decay)
    }
}

/// RAdam 超参数
///
/// 默认：lr=1e-3, β1=0.9, β2=0.999, ε=1e-8, weight_decay=0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RAdamConfig {
    pub lr: f64,
    pub beta1: f64,
    pub beta2: f64,
    /// 仅做合法性检查，不参与更新（自适应分支的分母不加 ε）
    pub eps: f64,
    pub weight_decay: f64,
}

impl Default for RAdamConfig {
    fn default() -> Self {
        Self {
            lr: 1e-3,
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-8,
            weight_decay: 0.0,
        }
    }
}

impl RAdamConfig {
    pub fn new(lr: f64) -> Self {
        Self {
            lr,
            ..Self::default()
        }
    }

    pub const fn lr(mut self, lr: f64) -> Self {
        self.lr = lr;
        self
    }

    pub const fn betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub const fn eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub const fn weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }
}

impl HyperParameters for RAdamConfig {
    fn validate(&self) -> Result<(), OptimError> {
        non_negative("lr", self.lr)?;
        beta("beta1", self.beta1)?;
        beta("beta2", self.beta2)?;
        non_negative("eps", self.eps)?;
        non_negative("weight_decay", self.weight_decay)
    }
}

/// NAdam 超参数
///
/// 默认：lr=2e-3, β1=0.9, β2=0.999, ε=1e-8, weight_decay=0, momentum_decay=4e-3
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NAdamConfig {
    pub lr: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub eps: f64,
    pub weight_decay: f64,
    /// 动量系数 μ 的调度速率：μ_t = β1 * (1 - 0.5 * 0.96^(t * momentum_decay))
    pub momentum_decay: f64,
}

impl Default for NAdamConfig {
    fn default() -> Self {
        Self {
            lr: 2e-3,
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-8,
            weight_decay: 0.0,
            momentum_decay: 4e-3,
        }
    }
}

impl NAdamConfig {
    pub fn new(lr: f64) -> Self {
        Self {
            lr,
            ..Self::default()
        }
    }

    pub const fn lr(mut self, lr: f64) -> Self {
        self.lr = lr;
        self
    }

    pub const fn betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub const fn eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub const fn weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    pub const fn momentum_decay(mut self, momentum_decay: f64) -> Self {
        self.momentum_decay = momentum_decay;
        self
    }
}

impl HyperParameters for NAdamConfig {
    fn validate(&self) -> Result<(), OptimError> {
        non_negative("lr", self.lr)?;
        beta("beta1", self.beta1)?;
        beta("beta2", self.beta2)?;
        non_negative("eps", self.eps)?;
        non_negative("weight_decay", self.weight_decay)?;
        non_negative("momentum_decay", self.momentum_decay)
    }
}
