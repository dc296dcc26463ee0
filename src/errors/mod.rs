use thiserror::Error;
mod ops;
pub use self::ops::*;

/// 张量及批量（foreach）运算的误用错误。
/// 与运算符trait一致，这类错误以panic的形式抛出（作为panic消息），而非返回值。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    // 批量运算
    #[error("张量列表长度不一致，故无法{operator}：第一个列表长度为{len1}，第二个列表长度为{len2}")]
    ListLengthMismatch {
        operator: Operator,
        len1: usize,
        len2: usize,
    },
    #[error("数据长度{data_len}与形状{shape:?}不符")]
    DataShapeMismatch { data_len: usize, shape: Vec<usize> },
}

/// 优化器单步更新的前置条件错误。
/// 所有检查都在任何修改发生之前完成，因此返回`Err`时参数、梯度和状态都保持原样。
#[derive(Error, Debug, PartialEq)]
pub enum OptimError {
    #[error("{name}的长度为{got}，与参数个数{expected}不一致")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("{name}[{index}]的形状为{got:?}，与对应参数的形状{expected:?}不一致")]
    ShapeMismatch {
        name: &'static str,
        index: usize,
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("超参数{name}须{operator}{threshold}，实际为{value}")]
    InvalidHyperParameter {
        name: &'static str,
        operator: ComparisonOperator,
        threshold: f64,
        value: f64,
    },
    #[error("超参数{name}须为有限值，实际为{value}")]
    NonFiniteHyperParameter { name: &'static str, value: f64 },
    #[error("配置解析失败：{0}")]
    Config(String),
}

impl From<serde_json::Error> for OptimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
