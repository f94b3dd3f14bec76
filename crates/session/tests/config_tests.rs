use chess_session::{ConfigError, Level, Session, SessionConfig};

#[test]
fn test_partial_config_keeps_defaults() {
    let config = SessionConfig::from_toml(
        r#"
        computer_black = true
        level = "009"
        seed = 3

        [draw_rules]
        threefold = 2

        [search]
        advanced_reply_cap = 8

        [eval.piece_values]
        knight = 325
        "#,
    )
    .unwrap();
    assert!(!config.computer_white);
    assert!(config.computer_black);
    assert_eq!(config.level, Level::Numeric(9));
    assert_eq!(config.draw_rules.threefold, 2);
    assert_eq!(config.draw_rules.fivefold, 5);
    assert_eq!(config.search.advanced_reply_cap, 8);
    assert_eq!(config.search.delta_margin, 200);
    assert_eq!(config.eval.piece_values.knight, 325);
    assert_eq!(config.eval.piece_values.bishop, 320);
    assert_eq!(config.seed, Some(3));

    let session = Session::new(config);
    assert!(!session.is_computer_turn());
    assert_eq!(session.game().rules().threefold, 2);
}

#[test]
fn test_empty_config_is_default() {
    assert_eq!(SessionConfig::from_toml("").unwrap(), SessionConfig::default());
    assert_eq!(SessionConfig::default().level, Level::Medium);
}

#[test]
fn test_bad_level_is_a_parse_error() {
    let err = SessionConfig::from_toml(r#"level = "grandmaster""#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("session-config-{}.toml", std::process::id()));
    std::fs::write(&path, "computer_white = true\nlevel = \"hard\"\n").unwrap();
    let config = SessionConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(config.computer_white);
    assert_eq!(config.level, Level::Hard);

    let err = SessionConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("session-config"));
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = SessionConfig {
        computer_white: true,
        level: Level::Numeric(6),
        seed: Some(11),
        ..SessionConfig::default()
    };
    let text = toml::to_string(&config).unwrap();
    assert_eq!(SessionConfig::from_toml(&text).unwrap(), config);
}
