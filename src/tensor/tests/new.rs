use crate::assert_panic;
use crate::tensor::Tensor;

#[test]
fn test_new() {
    // 标量
    let tensor = Tensor::new(&[1.0], &[]);
    assert_eq!(tensor.shape(), &[] as &[usize]);
    assert_eq!(tensor.number(), Some(1.0));
    // 向量
    let tensor = Tensor::new(&[1.0, 2.0, 3.0], &[3]);
    assert_eq!(tensor.shape(), &[3]);
    assert_eq!(tensor.to_vec(), vec![1.0, 2.0, 3.0]);
    // 矩阵
    let tensor = Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[2, 2]);
    assert_eq!(tensor.shape(), &[2, 2]);
    assert_eq!(tensor.get(3), Some(4.0));
}

#[test]
fn test_new_with_mismatched_data_len() {
    assert_panic!(
        Tensor::new(&[1.0, 2.0, 3.0], &[2, 2]),
        "数据长度3与形状[2, 2]不符"
    );
}

#[test]
fn test_zeros_ones_full() {
    let zeros = Tensor::zeros(&[2, 3]);
    assert_eq!(zeros.size(), 6);
    assert!(zeros.to_vec().iter().all(|&x| x == 0.0));

    let ones = zeros.ones_like();
    assert_eq!(ones.shape(), &[2, 3]);
    assert!(ones.to_vec().iter().all(|&x| x == 1.0));

    let full = Tensor::full(-0.5, &[4]);
    assert_eq!(full, Tensor::new(&[-0.5; 4], &[4]));
    assert_eq!(full.zeros_like(), Tensor::zeros(&[4]));
}

#[test]
fn test_new_normal() {
    let tensor = Tensor::new_normal(3.0, 0.5, &[1000], Some(7));
    assert_eq!(tensor.size(), 1000);
    assert!(!tensor.has_nan());
    let mean = tensor.to_vec().iter().sum::<f32>() / 1000.0;
    assert!((mean - 3.0).abs() < 0.1, "均值偏离过大：{mean}");

    assert_eq!(tensor, Tensor::new_normal(3.0, 0.5, &[1000], Some(7)));
}
