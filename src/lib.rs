//! # Only Torch Foreach
//!
//! `only_torch_foreach`用纯rust实现了[pytorch](https://pytorch.org)中几种优化器的批量（foreach）单步更新规则：
//! Adamax、ASGD、RAdam与NAdam。一次调用即按位置更新整组参数及其优化器状态，
//! 供上层训练循环在每个迭代中调用。
//!

pub mod errors;
pub mod foreach;
pub mod optimizer;
pub mod tensor;
pub mod utils;
