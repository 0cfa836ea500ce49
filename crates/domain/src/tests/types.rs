// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Athlete, AttendanceStatus, Distance, DomainError, Gender, Level, PaymentMethod, PaymentStatus,
    Stroke,
};

#[test]
fn test_level_accepts_one_through_five() {
    for number in 1..=5 {
        assert_eq!(Level::new(number).unwrap().number(), number);
    }
}

#[test]
fn test_level_rejects_out_of_range() {
    assert!(matches!(Level::new(0), Err(DomainError::InvalidLevel(_))));
    assert!(matches!(Level::new(6), Err(DomainError::InvalidLevel(_))));
}

#[test]
fn test_gender_parse_and_as_str() {
    assert_eq!(Gender::parse("Boy").unwrap(), Gender::Boy);
    assert_eq!(Gender::parse("Girl").unwrap(), Gender::Girl);
    assert_eq!(Gender::Boy.as_str(), "Boy");
    assert!(Gender::parse("boy").is_err());
}

#[test]
fn test_attendance_status_wire_values() {
    assert_eq!(AttendanceStatus::Present.as_str(), "Hadir");
    assert_eq!(AttendanceStatus::Excused.as_str(), "Izin");
    assert_eq!(AttendanceStatus::Sick.as_str(), "Sakit");
    assert_eq!(AttendanceStatus::Absent.as_str(), "Alpa");

    for status in AttendanceStatus::ALL {
        assert_eq!(AttendanceStatus::parse(status.as_str()).unwrap(), status);
    }
    assert!(AttendanceStatus::parse("Present").is_err());
}

#[test]
fn test_payment_status_wire_values() {
    assert_eq!(PaymentStatus::Paid.as_str(), "Lunas");
    assert_eq!(PaymentStatus::Unpaid.as_str(), "Belum Lunas");
    assert_eq!(PaymentStatus::parse("Lunas").unwrap(), PaymentStatus::Paid);
    assert_eq!(
        PaymentStatus::parse("Belum Lunas").unwrap(),
        PaymentStatus::Unpaid
    );
    assert!(PaymentStatus::parse("Paid").is_err());
}

#[test]
fn test_payment_method_wire_values() {
    assert_eq!(PaymentMethod::parse("Transfer").unwrap(), PaymentMethod::Transfer);
    assert_eq!(PaymentMethod::parse("Tunai").unwrap(), PaymentMethod::Cash);
    assert_eq!(PaymentMethod::parse("QRIS").unwrap(), PaymentMethod::Qris);
    assert!(PaymentMethod::parse("Cash").is_err());
}

#[test]
fn test_distance_accepts_contested_distances_only() {
    for meters in Distance::CONTESTED_METERS {
        assert_eq!(Distance::new(meters).unwrap().meters(), meters);
    }
    assert!(matches!(
        Distance::new(75),
        Err(DomainError::InvalidDistance { meters: 75 })
    ));
}

#[test]
fn test_stroke_display_order_is_fixed() {
    assert_eq!(
        Stroke::DISPLAY_ORDER,
        [
            Stroke::Butterfly,
            Stroke::Backstroke,
            Stroke::Breaststroke,
            Stroke::Freestyle,
        ]
    );
    assert!(Stroke::Butterfly.display_rank() < Stroke::Backstroke.display_rank());
    assert!(Stroke::Breaststroke.display_rank() < Stroke::Freestyle.display_rank());
}

#[test]
fn test_new_athlete_has_no_linked_account() {
    let athlete: Athlete = Athlete::new(
        String::from("ath-1"),
        String::from("Test Athlete"),
        String::from("2010-01-01"),
        Level::new(2).unwrap(),
        Gender::Girl,
    );

    assert_eq!(athlete.id, "ath-1");
    assert_eq!(athlete.linked_account_id, None);
}
