// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AgeGroup, age_at_year};

#[test]
fn test_age_is_calendar_year_difference() {
    assert_eq!(age_at_year("2010-01-01", 2025), 15);
    assert_eq!(age_at_year("2010-12-31", 2025), 15);
}

#[test]
fn test_age_ignores_month_and_day() {
    // Year-only arithmetic: an athlete born late in the year gets the same
    // age as one born in January of that year.
    assert_eq!(age_at_year("2008-01-01", 2026), age_at_year("2008-12-31", 2026));
}

#[test]
fn test_unparsable_date_of_birth_yields_age_zero() {
    assert_eq!(age_at_year("", 2025), 0);
    assert_eq!(age_at_year("not-a-date", 2025), 0);
    assert_eq!(age_at_year("2010/01/01", 2025), 0);
    assert_eq!(age_at_year("2010-13-40", 2025), 0);
}

#[test]
fn test_unparsable_date_classifies_as_pre_group() {
    let age: i32 = age_at_year("garbage", 2025);
    assert_eq!(AgeGroup::from_age(age), AgeGroup::PreGroup);
}

#[test]
fn test_scenario_born_2010_event_2025_is_group_2() {
    let age: i32 = age_at_year("2010-01-01", 2025);
    assert_eq!(age, 15);
    assert_eq!(AgeGroup::from_age(age), AgeGroup::Group2);
    assert_eq!(AgeGroup::from_age(age).as_str(), "Group 2");
}

#[test]
fn test_band_boundaries_are_exact() {
    assert_eq!(AgeGroup::from_age(7), AgeGroup::PreGroup);
    assert_eq!(AgeGroup::from_age(8), AgeGroup::Group5);
    assert_eq!(AgeGroup::from_age(9), AgeGroup::Group5);
    assert_eq!(AgeGroup::from_age(10), AgeGroup::Group4);
    assert_eq!(AgeGroup::from_age(11), AgeGroup::Group4);
    assert_eq!(AgeGroup::from_age(12), AgeGroup::Group3);
    assert_eq!(AgeGroup::from_age(13), AgeGroup::Group3);
    assert_eq!(AgeGroup::from_age(14), AgeGroup::Group2);
    assert_eq!(AgeGroup::from_age(15), AgeGroup::Group2);
    assert_eq!(AgeGroup::from_age(16), AgeGroup::Group1);
    assert_eq!(AgeGroup::from_age(18), AgeGroup::Group1);
    assert_eq!(AgeGroup::from_age(19), AgeGroup::Senior);
    assert_eq!(AgeGroup::from_age(45), AgeGroup::Senior);
}

#[test]
fn test_bands_partition_all_ages_without_gaps() {
    // Every age in a generous range classifies into exactly one of the
    // seven labels.
    for age in -5..=120 {
        let group: AgeGroup = AgeGroup::from_age(age);
        assert!(AgeGroup::ALL.contains(&group));
    }
}

#[test]
fn test_negative_age_is_pre_group() {
    // A birth year after the reference year produces a negative age.
    assert_eq!(AgeGroup::from_age(age_at_year("2030-06-15", 2025)), AgeGroup::PreGroup);
}

#[test]
fn test_labels_round_trip_through_parse() {
    for group in AgeGroup::ALL {
        assert_eq!(AgeGroup::parse(group.as_str()).unwrap(), group);
    }
    assert!(AgeGroup::parse("KU 9").is_err());
}
