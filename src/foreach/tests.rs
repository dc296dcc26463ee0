use approx::assert_abs_diff_eq;

use crate::assert_panic;
use crate::foreach;
use crate::tensor::Tensor;

fn group() -> Vec<Tensor> {
    vec![
        Tensor::new(&[1., 2.], &[2]),
        Tensor::new(&[3., 4., 5., 6.], &[2, 2]),
    ]
}

#[test]
fn test_scalar_ops_apply_to_every_entry() {
    let mut xs = group();
    foreach::add_scalar_(&mut xs, 1.);
    foreach::mul_scalar_(&mut xs, 2.);
    assert_eq!(xs[0], Tensor::new(&[4., 6.], &[2]));
    assert_eq!(xs[1], Tensor::new(&[8., 10., 12., 14.], &[2, 2]));

    let shifted = foreach::add_scalar(&xs, -4.);
    assert_eq!(shifted[0], Tensor::new(&[0., 2.], &[2]));
    // 非原地版本不修改输入
    assert_eq!(xs[0], Tensor::new(&[4., 6.], &[2]));
}

#[test]
fn test_per_entry_scalars() {
    let mut xs = group();
    foreach::mul_scalars_(&mut xs, &[10., -1.]);
    assert_eq!(xs[0], Tensor::new(&[10., 20.], &[2]));
    assert_eq!(xs[1], Tensor::new(&[-3., -4., -5., -6.], &[2, 2]));

    foreach::div_scalars_(&mut xs, &[10., -1.]);
    assert_eq!(xs, group());

    let halves = foreach::div_scalars(&xs, &[2., 4.]);
    assert_eq!(halves[1], Tensor::new(&[0.75, 1., 1.25, 1.5], &[2, 2]));
}

#[test]
fn test_add_and_addcmul_and_addcdiv() {
    let ys = group();

    let mut xs = foreach::zeros_like(&ys);
    foreach::add_(&mut xs, &ys, 0.5);
    assert_eq!(xs[0], Tensor::new(&[0.5, 1.], &[2]));

    let mut xs = foreach::zeros_like(&ys);
    foreach::addcmul_(&mut xs, &ys, &ys, 2.);
    assert_eq!(xs[1], Tensor::new(&[18., 32., 50., 72.], &[2, 2]));

    let mut xs = foreach::ones_like(&ys);
    foreach::addcdiv_(&mut xs, &ys, &ys, &[-1., 3.]);
    assert_eq!(xs[0], Tensor::new(&[0., 0.], &[2]));
    assert_eq!(xs[1], Tensor::new(&[4., 4., 4., 4.], &[2, 2]));
}

#[test]
fn test_unary_ops() {
    let xs = vec![Tensor::new(&[-9., 4.], &[2])];
    let abs = foreach::abs(&xs);
    assert_eq!(abs[0], Tensor::new(&[9., 4.], &[2]));
    let sqrt = foreach::sqrt(&abs);
    assert_abs_diff_eq!(sqrt[0], Tensor::new(&[3., 2.], &[2]), epsilon = 1e-6);
}

#[test]
fn test_maximum_lerp_copy() {
    let mut xs = group();
    foreach::maximum_(
        &mut xs,
        &[
            Tensor::new(&[0., 7.], &[2]),
            Tensor::new(&[f32::NAN, 0., 0., 9.], &[2, 2]),
        ],
    );
    assert_eq!(xs[0], Tensor::new(&[1., 7.], &[2]));
    assert!(xs[1].get(0).is_some_and(f32::is_nan));
    assert_eq!(xs[1].get(3), Some(9.));

    let mut xs = foreach::zeros_like(&group());
    foreach::lerp_(&mut xs, &group(), &[1., 0.5]);
    assert_eq!(xs[0], Tensor::new(&[1., 2.], &[2]));
    assert_eq!(xs[1], Tensor::new(&[1.5, 2., 2.5, 3.], &[2, 2]));

    foreach::copy_(&mut xs, &group());
    assert_eq!(xs, group());
}

#[test]
fn test_list_length_mismatch_panics() {
    let mut xs = group();
    assert_panic!(
        foreach::add_(&mut xs, &group()[..1], 1.),
        "张量列表长度不一致，故无法自相加：第一个列表长度为2，第二个列表长度为1"
    );
    assert_panic!(foreach::mul_scalars_(&mut xs, &[1.]));
    assert_panic!(foreach::addcdiv_(&mut xs, &group(), &group(), &[1.]));
}

#[test]
fn test_entry_shape_mismatch_panics() {
    let mut xs = group();
    let mut swapped = group();
    swapped.reverse();
    assert_panic!(foreach::maximum_(&mut xs, &swapped));
}
