// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Distance, PerformanceRecord, Stroke, SwimTime, personal_bests};

fn create_record(id: &str, meters: u16, stroke: Stroke, time_ms: u32) -> PerformanceRecord {
    PerformanceRecord {
        id: String::from(id),
        athlete_id: String::from("ath-1"),
        athlete_name: String::from("Test Athlete"),
        competition_name: String::from("Test Meet"),
        event_date: String::from("2025-06-01"),
        stroke,
        distance: Distance::new(meters).unwrap(),
        time_ms,
        time_formatted: String::from("00:00.00"),
        age_at_event: 15,
        age_group_at_event: String::from("Group 2"),
        recorded_by: String::from("coach-1"),
    }
}

#[test]
fn test_empty_input_yields_empty_result() {
    assert!(personal_bests(&[], None).is_empty());
    assert!(personal_bests(&[], Some(Stroke::Freestyle)).is_empty());
}

#[test]
fn test_minimum_time_per_distance_stroke_pair() {
    let records: Vec<PerformanceRecord> = vec![
        create_record("r1", 50, Stroke::Freestyle, 30_000),
        create_record("r2", 50, Stroke::Freestyle, 28_500),
        create_record("r3", 100, Stroke::Backstroke, 65_000),
    ];

    let best: Vec<PerformanceRecord> = personal_bests(&records, None);

    assert_eq!(best.len(), 2);
    // Backstroke sorts before Freestyle in the fixed stroke order.
    assert_eq!(best[0].stroke, Stroke::Backstroke);
    assert_eq!(best[0].time_ms, 65_000);
    assert_eq!(best[1].stroke, Stroke::Freestyle);
    assert_eq!(best[1].time_ms, 28_500);
}

#[test]
fn test_at_most_one_row_per_pair_and_row_is_minimal() {
    let records: Vec<PerformanceRecord> = vec![
        create_record("r1", 50, Stroke::Butterfly, 40_000),
        create_record("r2", 50, Stroke::Butterfly, 39_990),
        create_record("r3", 50, Stroke::Butterfly, 41_200),
        create_record("r4", 100, Stroke::Butterfly, 90_000),
        create_record("r5", 50, Stroke::Breaststroke, 45_000),
    ];

    let best: Vec<PerformanceRecord> = personal_bests(&records, None);

    assert_eq!(best.len(), 3);
    for row in &best {
        for other in &records {
            if other.distance == row.distance && other.stroke == row.stroke {
                assert!(row.time_ms <= other.time_ms);
            }
        }
    }
}

#[test]
fn test_ties_keep_the_first_occurrence() {
    let records: Vec<PerformanceRecord> = vec![
        create_record("first", 50, Stroke::Freestyle, 30_000),
        create_record("second", 50, Stroke::Freestyle, 30_000),
    ];

    let best: Vec<PerformanceRecord> = personal_bests(&records, None);

    assert_eq!(best.len(), 1);
    assert_eq!(best[0].id, "first");
}

#[test]
fn test_reducer_is_idempotent_on_its_own_output() {
    let records: Vec<PerformanceRecord> = vec![
        create_record("r1", 50, Stroke::Freestyle, 30_000),
        create_record("r2", 50, Stroke::Freestyle, 28_500),
        create_record("r3", 100, Stroke::Backstroke, 65_000),
        create_record("r4", 200, Stroke::Butterfly, 150_000),
        create_record("r5", 100, Stroke::Backstroke, 64_000),
    ];

    let once: Vec<PerformanceRecord> = personal_bests(&records, None);
    let twice: Vec<PerformanceRecord> = personal_bests(&once, None);

    assert_eq!(once, twice);
}

#[test]
fn test_stroke_filter_restricts_result() {
    let records: Vec<PerformanceRecord> = vec![
        create_record("r1", 50, Stroke::Freestyle, 30_000),
        create_record("r2", 100, Stroke::Backstroke, 65_000),
    ];

    let best: Vec<PerformanceRecord> = personal_bests(&records, Some(Stroke::Backstroke));

    assert_eq!(best.len(), 1);
    assert_eq!(best[0].stroke, Stroke::Backstroke);
}

#[test]
fn test_stroke_filter_with_no_matches_yields_empty() {
    let records: Vec<PerformanceRecord> =
        vec![create_record("r1", 50, Stroke::Freestyle, 30_000)];

    assert!(personal_bests(&records, Some(Stroke::Butterfly)).is_empty());
}

#[test]
fn test_rows_sorted_by_stroke_order_then_distance() {
    let records: Vec<PerformanceRecord> = vec![
        create_record("r1", 100, Stroke::Freestyle, 60_000),
        create_record("r2", 50, Stroke::Freestyle, 28_000),
        create_record("r3", 200, Stroke::Breaststroke, 170_000),
        create_record("r4", 50, Stroke::Backstroke, 33_000),
        create_record("r5", 100, Stroke::Butterfly, 70_000),
    ];

    let best: Vec<PerformanceRecord> = personal_bests(&records, None);

    let order: Vec<(Stroke, u16)> = best
        .iter()
        .map(|r| (r.stroke, r.distance.meters()))
        .collect();
    assert_eq!(
        order,
        vec![
            (Stroke::Butterfly, 100),
            (Stroke::Backstroke, 50),
            (Stroke::Breaststroke, 200),
            (Stroke::Freestyle, 50),
            (Stroke::Freestyle, 100),
        ]
    );
}

#[test]
fn test_same_distance_different_strokes_are_distinct_pairs() {
    let records: Vec<PerformanceRecord> = vec![
        create_record("r1", 50, Stroke::Freestyle, 30_000),
        create_record("r2", 50, Stroke::Backstroke, 33_000),
        create_record("r3", 50, Stroke::Breaststroke, 36_000),
        create_record("r4", 50, Stroke::Butterfly, 31_000),
    ];

    let best: Vec<PerformanceRecord> = personal_bests(&records, None);

    assert_eq!(best.len(), 4);
}

#[test]
fn test_swim_time_feeds_reducer_consistently() {
    let time: SwimTime = SwimTime::new(0, 28, 50).unwrap();
    let mut record: PerformanceRecord = create_record("r1", 50, Stroke::Freestyle, time.total_ms());
    record.time_formatted = time.formatted();

    let best: Vec<PerformanceRecord> = personal_bests(&[record], None);

    assert_eq!(best[0].time_ms, 28_500);
    assert_eq!(best[0].time_formatted, "00:28.50");
}
