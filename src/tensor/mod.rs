/*
 * @Author       : 老董
 * @Date         : 2023-08-17 17:24:24
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-11
 * @Description  : 张量（Tensor）：优化器所依赖的外部协作者的最小实现。
 *                 仅提供连续内存、f32元素的稠密张量，以及优化器与其测试用到的构造、属性与逐元素运算
 */

use ndarray::{Array, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::TensorError;

mod ops {
    pub mod arithmetic;
    pub mod eq;
    pub mod pointwise;
}

mod print;
mod property;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通Tensor初始化的都是张量（即使标量也是张量）；
/// 而通常意义上的数字（类型为usize、i32、f64等）就只是纯数（number），在这里不被认为是张量。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]、[1,1,1]...
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]；
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等（`shape`为`[]`时乘积为1），否则会panic。
    pub fn new(data: &[f32], shape: &[usize]) -> Self {
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).unwrap_or_else(|_| {
            panic!(
                "{}",
                TensorError::DataShapeMismatch {
                    data_len: data.len(),
                    shape: shape.to_vec(),
                }
            )
        });
        Self { data }
    }

    /// 创建一个所有元素都为`value`的张量
    pub fn full(value: f32, shape: &[usize]) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(0.0, shape)
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self::full(1.0, shape)
    }

    /// 创建一个与自身形状相同、元素全为0的张量（优化器状态的初始值）
    pub fn zeros_like(&self) -> Self {
        Self::zeros(self.shape())
    }

    pub fn ones_like(&self) -> Self {
        Self::ones(self.shape())
    }

    /// 创建一个服从正态分布的随机张量（Box-Muller变换）。
    /// `seed`为`Some`时结果可复现。
    pub fn new_normal(mean: f32, std_dev: f32, shape: &[usize], seed: Option<u64>) -> Self {
        let mut rng = make_rng(seed);
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f32 = rng.r#gen();
            let u2: f32 = rng.r#gen();
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Self::new(&data, shape)
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
