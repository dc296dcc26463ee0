use crate::assert_err;
use crate::errors::{ComparisonOperator, OptimError};
use crate::optimizer::{AdamaxConfig, AsgdConfig, HyperParameters, NAdamConfig, RAdamConfig};

#[test]
fn test_defaults() {
    let adamax = AdamaxConfig::default();
    assert_eq!((adamax.lr, adamax.beta1, adamax.beta2), (2e-3, 0.9, 0.999));
    assert_eq!((adamax.eps, adamax.weight_decay), (1e-8, 0.));

    let asgd = AsgdConfig::default();
    assert_eq!(
        (asgd.lr, asgd.lambd, asgd.alpha, asgd.t0, asgd.weight_decay),
        (1e-2, 1e-4, 0.75, 1e6, 0.)
    );

    assert_eq!(RAdamConfig::default().lr, 1e-3);
    let nadam = NAdamConfig::default();
    assert_eq!((nadam.lr, nadam.momentum_decay), (2e-3, 4e-3));

    assert!(adamax.validate().is_ok());
    assert!(asgd.validate().is_ok());
    assert!(RAdamConfig::default().validate().is_ok());
    assert!(nadam.validate().is_ok());
}

#[test]
fn test_builders() {
    let config = NAdamConfig::new(0.1)
        .betas(0.8, 0.99)
        .eps(1e-6)
        .weight_decay(0.01)
        .momentum_decay(0.)
        .lr(0.05);
    assert_eq!(
        config,
        NAdamConfig {
            lr: 0.05,
            beta1: 0.8,
            beta2: 0.99,
            eps: 1e-6,
            weight_decay: 0.01,
            momentum_decay: 0.,
        }
    );
    assert_eq!(AsgdConfig::new(0.5).t0(-3.).t0, -3.);
    // t0 只要求有限
    assert!(AsgdConfig::new(0.5).t0(-3.).validate().is_ok());
}

#[test]
fn test_json_partial_override() {
    let config = RAdamConfig::from_json(r#"{ "lr": 0.01, "weight_decay": 0.1 }"#).unwrap();
    assert_eq!(config, RAdamConfig::new(0.01).weight_decay(0.1));

    let config = AsgdConfig::from_json("{}").unwrap();
    assert_eq!(config, AsgdConfig::default());

    let adamax = AdamaxConfig::new(0.3).betas(0.5, 0.6);
    let json = adamax.to_json().unwrap();
    assert_eq!(AdamaxConfig::from_json(&json).unwrap(), adamax);
}

#[test]
fn test_json_rejects_invalid() {
    assert_err!(
        AdamaxConfig::from_json("{ lr: 0.1 }"),
        OptimError::Config(msg) if !msg.is_empty()
    );
    assert_err!(
        NAdamConfig::from_json(r#"{ "beta1": 1.5 }"#),
        OptimError::InvalidHyperParameter {
            name: "beta1",
            operator: ComparisonOperator::LessThan,
            ..
        }
    );
    assert_err!(
        AsgdConfig::from_json(r#"{ "lambd": -0.1 }"#),
        OptimError::InvalidHyperParameter("lambd")
    );
}

#[test]
fn test_validate_non_finite() {
    assert_err!(
        AdamaxConfig::new(f64::NAN).validate(),
        OptimError::NonFiniteHyperParameter { name: "lr", .. }
    );
    assert_err!(
        RAdamConfig::default().weight_decay(f64::INFINITY).validate(),
        OptimError::NonFiniteHyperParameter { name: "weight_decay", .. }
    );
}

#[test]
fn test_error_messages() {
    let err = AdamaxConfig::new(-0.5).validate().unwrap_err();
    assert_eq!(err.to_string(), "超参数lr须≥0，实际为-0.5");
}
