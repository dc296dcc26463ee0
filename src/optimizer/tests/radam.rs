use approx::assert_abs_diff_eq;

use super::{grads, params, single};
use crate::assert_err;
use crate::errors::OptimError;
use crate::optimizer::{RAdamConfig, RAdamState, Rectification, radam};

#[test]
fn test_rectification_threshold() {
    // β2 = 0.9 时 ρ_inf = 19，ρ_5 ≈ 4.58，ρ_6 ≈ 5.39
    assert_eq!(Rectification::at_step(0.9, 1), Rectification::Unrectified);
    assert_eq!(Rectification::at_step(0.9, 5), Rectification::Unrectified);
    match Rectification::at_step(0.9, 6) {
        Rectification::Rectified(rect) => assert_abs_diff_eq!(rect, 0.2551768, epsilon = 1e-6),
        Rectification::Unrectified => panic!("第6步应进入自适应分支"),
    }
    // 默认 β2 = 0.999 下，第1步 ρ_1 = 1
    assert_eq!(Rectification::at_step(0.999, 1), Rectification::Unrectified);
}

#[test]
fn test_rectification_branches_are_exclusive() {
    for beta2 in [0.5, 0.9, 0.99, 0.999] {
        for step in 1..=2000u64 {
            let rectification = Rectification::at_step(beta2, step);
            let (rect, unrectified) = (rectification.rect(), rectification.unrectified());
            assert!(rect == 0. || unrectified == 0.);
            assert!(rect != 0. || unrectified != 0.);
            assert!(rect.is_finite());
        }
    }
}

#[test]
fn test_rectification_switches_at_most_once() {
    for beta2 in [0.5, 0.9, 0.99, 0.999] {
        let mut switches = 0;
        let mut previous = Rectification::at_step(beta2, 1);
        for step in 2..=5000u64 {
            let current = Rectification::at_step(beta2, step);
            match (previous, current) {
                (Rectification::Unrectified, Rectification::Rectified(_)) => switches += 1,
                (Rectification::Rectified(_), Rectification::Unrectified) => {
                    panic!("β2={beta2}时第{step}步退回了纯动量分支")
                }
                _ => {}
            }
            previous = current;
        }
        assert!(switches <= 1);
    }
}

#[test]
fn test_radam_first_step_is_plain_momentum() {
    let mut params = vec![single(1.)];
    let mut grads = vec![single(0.5)];
    let mut state = RAdamState::new(&params);
    let config = RAdamConfig::new(0.01);

    radam(&mut params, &mut grads, &mut state, &config).unwrap();

    // θ = 1 - 0.01 / (1 - 0.9) * 0.05
    assert_eq!(state.steps(), &[1]);
    assert_abs_diff_eq!(state.exp_avgs()[0], single(0.05), epsilon = 1e-7);
    assert_abs_diff_eq!(state.exp_avg_sqs()[0], single(0.00025), epsilon = 1e-9);
    assert_abs_diff_eq!(params[0], single(0.995), epsilon = 1e-6);
}

#[test]
fn test_radam_switches_to_rectified_update() {
    let config = RAdamConfig::new(0.1).betas(0.9, 0.9);
    let mut params = vec![single(1.)];
    let mut state = RAdamState::new(&params);

    // 恒定梯度1下，两个分支的步长分别为 lr 与 lr * r
    for step in 1..=5u64 {
        let mut grads = vec![single(1.)];
        radam(&mut params, &mut grads, &mut state, &config).unwrap();
        assert_abs_diff_eq!(params[0], single(1. - 0.1 * step as f32), epsilon = 1e-5);
        assert_eq!(state.rectifications(0.9), vec![Rectification::Unrectified]);
    }

    let mut grads = vec![single(1.)];
    radam(&mut params, &mut grads, &mut state, &config).unwrap();
    assert_abs_diff_eq!(params[0], single(0.4744823), epsilon = 1e-5);
    assert!(matches!(
        state.rectifications(0.9)[0],
        Rectification::Rectified(_)
    ));
}

#[test]
fn test_radam_unrectified_zero_grad_stays_finite() {
    // 纯动量分支不会去计算自适应项里的 0 / 0
    let config = RAdamConfig::new(0.1).betas(0.9, 0.9);
    let mut params = vec![single(1.)];
    let mut state = RAdamState::new(&params);
    for _ in 0..5 {
        let mut grads = vec![single(0.)];
        radam(&mut params, &mut grads, &mut state, &config).unwrap();
    }
    assert_eq!(state.steps(), &[5]);
    assert!(!params[0].has_nan());
    assert_eq!(params[0], single(1.));
}

#[test]
fn test_radam_steps_and_weight_decay() {
    let mut params = params();
    let mut state = RAdamState::new(&params);
    let config = RAdamConfig::default().weight_decay(0.1);

    let expected_grads: Vec<_> = params
        .iter()
        .zip(grads())
        .map(|(param, grad)| &grad + &(param * 0.1))
        .collect();
    let mut grads = grads();
    radam(&mut params, &mut grads, &mut state, &config).unwrap();
    for (grad, expected) in grads.iter().zip(&expected_grads) {
        assert_abs_diff_eq!(*grad, *expected, epsilon = 1e-6);
    }

    for expected in 2..=4u64 {
        let mut grads = super::grads();
        radam(&mut params, &mut grads, &mut state, &config).unwrap();
        assert_eq!(state.steps(), &[expected, expected]);
    }
}

#[test]
fn test_radam_rejects_invalid_input_untouched() {
    let mut params = params();
    let mut grads = grads();
    let mut state = RAdamState::new(&params);
    let before = (params.clone(), grads.clone(), state.clone());

    assert_err!(
        radam(&mut params, &mut grads, &mut state, &RAdamConfig::default().betas(0.9, 1.)),
        OptimError::InvalidHyperParameter { name: "beta2", value, .. } if *value == 1.
    );
    assert_err!(
        radam(&mut params, &mut grads, &mut state, &RAdamConfig::default().eps(f64::NAN)),
        OptimError::NonFiniteHyperParameter { name: "eps", .. }
    );
    let mut short_grads = grads[..1].to_vec();
    assert_err!(
        radam(&mut params, &mut short_grads, &mut state, &RAdamConfig::default()),
        OptimError::LengthMismatch("grads", 2, 1)
    );

    assert_eq!((params, grads, state), before);
}
