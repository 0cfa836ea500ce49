// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, SwimTime};

#[test]
fn test_total_ms_matches_component_sum() {
    let time: SwimTime = SwimTime::new(1, 5, 25).unwrap();
    assert_eq!(time.total_ms(), 60_000 + 5_000 + 250);

    let time: SwimTime = SwimTime::new(0, 28, 50).unwrap();
    assert_eq!(time.total_ms(), 28_500);

    let time: SwimTime = SwimTime::new(59, 59, 99).unwrap();
    assert_eq!(time.total_ms(), 59 * 60_000 + 59 * 1_000 + 990);
}

#[test]
fn test_formatting_is_zero_padded() {
    assert_eq!(SwimTime::new(0, 28, 5).unwrap().formatted(), "00:28.05");
    assert_eq!(SwimTime::new(12, 3, 40).unwrap().formatted(), "12:03.40");
}

#[test]
fn test_parse_round_trips_formatting() {
    let original: SwimTime = SwimTime::new(2, 14, 87).unwrap();
    let parsed: SwimTime = SwimTime::parse(&original.formatted()).unwrap();
    assert_eq!(parsed, original);
    assert_eq!(parsed.total_ms(), original.total_ms());
}

#[test]
fn test_out_of_range_components_are_rejected() {
    assert!(matches!(
        SwimTime::new(60, 0, 0),
        Err(DomainError::InvalidSwimTime(_))
    ));
    assert!(matches!(
        SwimTime::new(0, 60, 0),
        Err(DomainError::InvalidSwimTime(_))
    ));
    assert!(matches!(
        SwimTime::new(0, 0, 100),
        Err(DomainError::InvalidSwimTime(_))
    ));
}

#[test]
fn test_malformed_strings_are_rejected() {
    for bad in ["", "283", "00-28-50", "00:28", "aa:bb.cc", "00:28.50.1"] {
        assert!(
            matches!(
                SwimTime::parse(bad),
                Err(DomainError::SwimTimeParseError { .. })
            ),
            "expected parse failure for {bad:?}"
        );
    }
}

#[test]
fn test_parsed_components_out_of_range_are_rejected() {
    assert!(SwimTime::parse("61:00.00").is_err());
    assert!(SwimTime::parse("00:61.00").is_err());
}

#[test]
fn test_component_accessors() {
    let time: SwimTime = SwimTime::new(3, 41, 9).unwrap();
    assert_eq!(time.minutes(), 3);
    assert_eq!(time.seconds(), 41);
    assert_eq!(time.centiseconds(), 9);
}
