use crate::tensor::Tensor;

mod config;
mod radam;

/// 形状为[1]的单元素张量
fn single(value: f32) -> Tensor {
    Tensor::new(&[value], &[1])
}

/// 一组形状各异的参数
fn params() -> Vec<Tensor> {
    vec![
        Tensor::new(&[1., -2.], &[2]),
        Tensor::new(&[0.5, 1.5, -0.5, 3.], &[2, 2]),
    ]
}

/// 与`params()`形状一致的梯度
fn grads() -> Vec<Tensor> {
    vec![
        Tensor::new(&[0.1, -0.3], &[2]),
        Tensor::new(&[1., 0., -2., 0.25], &[2, 2]),
    ]
}
