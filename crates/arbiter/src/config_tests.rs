use super::*;

#[test]
fn test_empty_file_gives_defaults() {
    assert_eq!(ArbiterConfig::from_toml("").unwrap(), ArbiterConfig::default());
}

#[test]
fn test_partial_tables() {
    let cfg = ArbiterConfig::from_toml(
        r#"
        variant = "mad"
        log_level = "debug"

        [mad_chess]
        teleport_chance = 0.5

        [broker]
        max_attempts = 4
        "#,
    )
    .unwrap();
    assert_eq!(cfg.variant, Variant::MadChess);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.mad_chess.teleport_chance, 0.5);
    assert_eq!(cfg.mad_chess.decay, MadChessConfig::default().decay);
    assert_eq!(cfg.broker.max_attempts, 4);
    assert_eq!(
        cfg.broker.attempt_timeout_ms,
        BrokerConfig::default().attempt_timeout_ms
    );
}

#[test]
fn test_unknown_variant_is_an_error() {
    let err = ArbiterConfig::from_toml(r#"variant = "crazyhouse""#).unwrap_err();
    assert!(format!("{err:#}").contains("invalid arbiter configuration"));
}

#[test]
fn test_missing_file_names_the_path() {
    let err = ArbiterConfig::load(Path::new("/nonexistent/arbiter.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/arbiter.toml"));
}

#[test]
fn test_no_argument_means_defaults() {
    let args = vec!["arbiter".to_string()].into_iter();
    assert_eq!(ArbiterConfig::from_args(args).unwrap(), ArbiterConfig::default());
}
