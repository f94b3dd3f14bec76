use super::*;

#[test]
fn test_names_parse_case_insensitively() {
    assert_eq!("random".parse::<Level>(), Ok(Level::Random));
    assert_eq!(" Easy ".parse::<Level>(), Ok(Level::Easy));
    assert_eq!("MEDIUM".parse::<Level>(), Ok(Level::Medium));
    assert_eq!("hard".parse::<Level>(), Ok(Level::Hard));
    assert_eq!("Advanced".parse::<Level>(), Ok(Level::Advanced));
}

#[test]
fn test_numbers_parse_with_leading_zeros() {
    assert_eq!("7".parse::<Level>(), Ok(Level::Numeric(7)));
    assert_eq!("007".parse::<Level>(), Ok(Level::Numeric(7)));
    assert_eq!("10".parse::<Level>(), Ok(Level::Numeric(10)));
    assert_eq!("0".parse::<Level>(), Err(LevelParseError::OutOfRange(0)));
    assert_eq!("11".parse::<Level>(), Err(LevelParseError::OutOfRange(11)));
    assert_eq!("".parse::<Level>(), Err(LevelParseError::Empty));
    assert_eq!(
        "grandmaster".parse::<Level>(),
        Err(LevelParseError::UnknownName("grandmaster".into()))
    );
    assert!("99999999999999999999999".parse::<Level>().is_err());
}

#[test]
fn test_lenient_parse_defaults_to_medium() {
    assert_eq!(Level::parse_lenient("hard"), Level::Hard);
    assert_eq!(Level::parse_lenient("impossible"), Level::Medium);
    assert_eq!(Level::parse_lenient("12"), Level::Medium);
    assert_eq!(Level::default(), Level::Medium);
}

#[test]
fn test_numeric_scale_mapping() {
    let expected = [
        Strategy::Random,
        Strategy::Easy,
        Strategy::Medium,
        Strategy::Hard,
        Strategy::Advanced,
        Strategy::Search {
            depth: 1,
            algorithm: Algorithm::Minimax,
        },
        Strategy::Search {
            depth: 2,
            algorithm: Algorithm::Minimax,
        },
        Strategy::Search {
            depth: 3,
            algorithm: Algorithm::AlphaBeta { quiescence: false },
        },
        Strategy::Search {
            depth: 3,
            algorithm: Algorithm::AlphaBeta { quiescence: true },
        },
        Strategy::Search {
            depth: 4,
            algorithm: Algorithm::AlphaBeta { quiescence: true },
        },
    ];
    for (n, strategy) in (1..=Level::MAX).zip(expected) {
        assert_eq!(Level::Numeric(n).strategy(), strategy, "level {n}");
    }
    assert_eq!(Level::Hard.strategy(), Level::Numeric(4).strategy());
    assert_eq!(Level::Numeric(10).depth(), 4);
    assert_eq!(Level::Easy.depth(), 0);
}

#[test]
fn test_serde_uses_the_display_form() {
    assert_eq!(serde_json::to_string(&Level::Numeric(9)).unwrap(), "\"9\"");
    assert_eq!(serde_json::to_string(&Level::Hard).unwrap(), "\"hard\"");
    let level: Level = serde_json::from_str("\"Advanced\"").unwrap();
    assert_eq!(level, Level::Advanced);
    assert!(serde_json::from_str::<Level>("\"twelve\"").is_err());
}
