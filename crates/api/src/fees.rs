// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly fee (SPP) operations.

use crate::activity::log_activity;
use crate::athletes::paginate;
use crate::attendance::validate_date;
use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::clock::now_iso8601;
use crate::error::{ApiError, translate_domain_error};
use ksac_domain::{Athlete, DomainError, Level, PaymentMethod, PaymentStatus};
use ksac_store::{MemoryStore, PaymentDetail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default monthly fee amount in rupiah.
pub const DEFAULT_FEE_AMOUNT: u64 = 250_000;

/// Page size of the fee status list.
pub const FEES_PER_PAGE: usize = 7;

/// Month display names used in report filenames.
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Builds the `YYYY-MM` document key for a month.
///
/// # Errors
///
/// Returns an error if the month is outside 1-12.
pub fn month_key(year: i32, month: u8) -> Result<String, ApiError> {
    if !(1..=12).contains(&month) {
        return Err(translate_domain_error(DomainError::InvalidMonth { month }));
    }
    Ok(format!("{year:04}-{month:02}"))
}

/// One row of the fee status list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeStatusRow {
    /// The athlete identifier.
    pub athlete_id: String,
    /// The athlete's name.
    pub name: String,
    /// The athlete's level.
    pub level: u8,
    /// The payment status. Defaults to unpaid when no record exists.
    pub status: PaymentStatus,
    /// The recorded amount, 0 when unpaid.
    pub amount: u64,
    /// The full payment detail, if one has been recorded.
    pub detail: Option<PaymentDetail>,
}

/// A page of fee status rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeStatusPage {
    /// The rows on this page.
    pub rows: Vec<FeeStatusRow>,
    /// The page number (1-based, clamped to the available pages).
    pub page: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Total number of rows matching the filter.
    pub total_matching: usize,
}

/// Filters applied to the fee status list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeStatusFilter {
    /// Case-insensitive name substring.
    pub name_query: Option<String>,
    /// Restrict to one level.
    pub level: Option<u8>,
    /// Restrict to one payment status.
    pub status: Option<PaymentStatus>,
}

/// The monthly collection summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Athletes whose fee is settled.
    pub paid_count: usize,
    /// Athletes whose fee is outstanding.
    pub unpaid_count: usize,
    /// Sum of recorded amounts in rupiah.
    pub total_collected: u64,
    /// Share of athletes settled, 0-100.
    pub completion_percent: f64,
}

/// Request to record one athlete's fee payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    /// Amount paid in rupiah.
    pub amount: u64,
    /// Payment date as `YYYY-MM-DD`.
    pub payment_date: String,
    /// Payment method wire value (`Transfer`, `Tunai`, `QRIS`).
    pub method: String,
    /// Optional free-text notes.
    pub notes: String,
}

/// Left-joins the roster against one month's sparse payment map.
fn status_rows(
    roster: &[Athlete],
    payments: &BTreeMap<String, PaymentDetail>,
) -> Vec<FeeStatusRow> {
    roster
        .iter()
        .map(|athlete| {
            let detail: Option<PaymentDetail> = payments.get(&athlete.id).cloned();
            FeeStatusRow {
                athlete_id: athlete.id.clone(),
                name: athlete.name.clone(),
                level: athlete.level.number(),
                status: detail
                    .as_ref()
                    .map_or(PaymentStatus::Unpaid, |d| d.status),
                amount: detail.as_ref().map_or(0, |d| d.amount),
                detail,
            }
        })
        .collect()
}

/// Applies the fee list filter to rows.
fn apply_filter(
    rows: Vec<FeeStatusRow>,
    filter: &FeeStatusFilter,
) -> Result<Vec<FeeStatusRow>, ApiError> {
    let level: Option<Level> = filter
        .level
        .map(Level::new)
        .transpose()
        .map_err(translate_domain_error)?;
    let name_query: Option<String> = filter
        .name_query
        .as_deref()
        .map(str::to_lowercase)
        .filter(|q| !q.is_empty());

    Ok(rows
        .into_iter()
        .filter(|row| level.is_none_or(|l| row.level == l.number()))
        .filter(|row| filter.status.is_none_or(|s| row.status == s))
        .filter(|row| {
            name_query
                .as_deref()
                .is_none_or(|q| row.name.to_lowercase().contains(q))
        })
        .collect())
}

/// Returns the full (unpaginated) fee status rows for one month.
pub(crate) fn fee_status_rows(
    store: &MemoryStore,
    year: i32,
    month: u8,
    filter: &FeeStatusFilter,
) -> Result<Vec<FeeStatusRow>, ApiError> {
    let key: String = month_key(year, month)?;
    let payments: BTreeMap<String, PaymentDetail> = store.fee_payments_for(&key);
    apply_filter(status_rows(&store.athletes_by_name(), &payments), filter)
}

/// Lists the fee status of every athlete for one month.
///
/// Athletes absent from the month's payment map default to unpaid with a
/// zero amount.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be admin or coach)
/// * `year` - The calendar year
/// * `month` - The month (1-12)
/// * `filter` - List filters
/// * `page` - The 1-based page to return
///
/// # Errors
///
/// Returns an error if the actor is not authorized or the month or filter
/// is invalid.
pub fn fee_status(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    year: i32,
    month: u8,
    filter: &FeeStatusFilter,
    page: usize,
) -> Result<FeeStatusPage, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    let rows: Vec<FeeStatusRow> = fee_status_rows(store, year, month, filter)?;
    let total_matching: usize = rows.len();
    let (rows, page, total_pages) = paginate(&rows, page, FEES_PER_PAGE);

    Ok(FeeStatusPage {
        rows,
        page,
        total_pages,
        total_matching,
    })
}

/// Computes the monthly collection summary.
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be admin or coach)
/// * `year` - The calendar year
/// * `month` - The month (1-12)
///
/// # Errors
///
/// Returns an error if the actor is not authorized or the month is
/// invalid.
pub fn monthly_summary(
    store: &MemoryStore,
    actor: &AuthenticatedUser,
    year: i32,
    month: u8,
) -> Result<MonthlySummary, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    let rows: Vec<FeeStatusRow> =
        fee_status_rows(store, year, month, &FeeStatusFilter::default())?;

    let paid_count: usize = rows
        .iter()
        .filter(|row| row.status == PaymentStatus::Paid)
        .count();
    let total_collected: u64 = rows.iter().map(|row| row.amount).sum();
    let total: usize = rows.len();

    #[allow(clippy::cast_precision_loss)]
    let completion_percent: f64 = if total == 0 {
        0.0
    } else {
        paid_count as f64 / total as f64 * 100.0
    };

    Ok(MonthlySummary {
        paid_count,
        unpaid_count: total - paid_count,
        total_collected,
        completion_percent,
    })
}

/// Records one athlete's fee payment for a month.
///
/// The write merges into the month's document keyed by athlete identifier:
/// other athletes' entries are untouched, and a repeated write for the same
/// athlete replaces the earlier one (last writer wins).
///
/// # Arguments
///
/// * `store` - The document store
/// * `actor` - The authenticated user (must be admin or coach)
/// * `year` - The calendar year
/// * `month` - The month (1-12)
/// * `athlete_id` - The athlete being settled
/// * `request` - The payment detail
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the month is invalid,
/// the athlete does not exist, or the payment fields are invalid.
pub fn record_payment(
    store: &mut MemoryStore,
    actor: &AuthenticatedUser,
    year: i32,
    month: u8,
    athlete_id: &str,
    request: RecordPaymentRequest,
) -> Result<FeeStatusRow, ApiError> {
    AuthorizationService::authorize_manage_club(actor)?;

    let key: String = month_key(year, month)?;
    let athlete: Athlete = store.athlete(athlete_id)?;
    let method: PaymentMethod =
        PaymentMethod::parse(&request.method).map_err(translate_domain_error)?;
    validate_date(&request.payment_date)?;

    let detail: PaymentDetail = PaymentDetail {
        status: PaymentStatus::Paid,
        amount: request.amount,
        payment_date: request.payment_date,
        method,
        notes: request.notes,
        updated_by: actor.display_name.clone(),
        updated_at: now_iso8601(),
    };

    store.merge_fee_payment(&key, athlete_id, detail.clone());

    log_activity(
        store,
        actor,
        &format!("SPP payment for '{}' ({key}) recorded.", athlete.name),
    );

    Ok(FeeStatusRow {
        athlete_id: athlete.id,
        name: athlete.name,
        level: athlete.level.number(),
        status: detail.status,
        amount: detail.amount,
        detail: Some(detail),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ksac_domain::{Gender, Role};

    fn coach() -> AuthenticatedUser {
        AuthenticatedUser::new(
            String::from("uid-coach"),
            String::from("Head Coach"),
            Role::Coach,
        )
    }

    fn store_with_roster() -> MemoryStore {
        let mut store: MemoryStore = MemoryStore::new();
        for name in ["Alice", "Bob"] {
            store.add_athlete(
                String::from(name),
                String::from("2012-05-01"),
                Level::new(1).unwrap(),
                Gender::Girl,
            );
        }
        store
    }

    fn payment_request() -> RecordPaymentRequest {
        RecordPaymentRequest {
            amount: DEFAULT_FEE_AMOUNT,
            payment_date: String::from("2026-03-05"),
            method: String::from("Transfer"),
            notes: String::new(),
        }
    }

    #[test]
    fn test_month_key_format_and_validation() {
        assert_eq!(month_key(2026, 3).unwrap(), "2026-03");
        assert_eq!(month_key(2026, 12).unwrap(), "2026-12");
        assert!(month_key(2026, 0).is_err());
        assert!(month_key(2026, 13).is_err());
    }

    #[test]
    fn test_status_defaults_to_unpaid() {
        let store: MemoryStore = store_with_roster();

        let page: FeeStatusPage = fee_status(
            &store,
            &coach(),
            2026,
            3,
            &FeeStatusFilter::default(),
            1,
        )
        .unwrap();

        assert_eq!(page.total_matching, 2);
        assert!(page
            .rows
            .iter()
            .all(|row| row.status == PaymentStatus::Unpaid && row.amount == 0));
    }

    #[test]
    fn test_recorded_payment_merges_against_roster() {
        let mut store: MemoryStore = store_with_roster();
        let alice_id: String = store.athletes_by_name()[0].id.clone();

        record_payment(&mut store, &coach(), 2026, 3, &alice_id, payment_request()).unwrap();

        let page: FeeStatusPage = fee_status(
            &store,
            &coach(),
            2026,
            3,
            &FeeStatusFilter::default(),
            1,
        )
        .unwrap();

        let alice = page.rows.iter().find(|r| r.athlete_id == alice_id).unwrap();
        assert_eq!(alice.status, PaymentStatus::Paid);
        assert_eq!(alice.amount, DEFAULT_FEE_AMOUNT);
        let bob = page.rows.iter().find(|r| r.athlete_id != alice_id).unwrap();
        assert_eq!(bob.status, PaymentStatus::Unpaid);
    }

    #[test]
    fn test_payment_detail_carries_attribution() {
        let mut store: MemoryStore = store_with_roster();
        let alice_id: String = store.athletes_by_name()[0].id.clone();

        let row: FeeStatusRow =
            record_payment(&mut store, &coach(), 2026, 3, &alice_id, payment_request()).unwrap();

        let detail: PaymentDetail = row.detail.unwrap();
        assert_eq!(detail.updated_by, "Head Coach");
        assert_eq!(detail.method, PaymentMethod::Transfer);
    }

    #[test]
    fn test_payments_are_scoped_to_their_month() {
        let mut store: MemoryStore = store_with_roster();
        let alice_id: String = store.athletes_by_name()[0].id.clone();

        record_payment(&mut store, &coach(), 2026, 3, &alice_id, payment_request()).unwrap();

        let april: FeeStatusPage = fee_status(
            &store,
            &coach(),
            2026,
            4,
            &FeeStatusFilter::default(),
            1,
        )
        .unwrap();

        assert!(april
            .rows
            .iter()
            .all(|row| row.status == PaymentStatus::Unpaid));
    }

    #[test]
    fn test_monthly_summary_counts_and_totals() {
        let mut store: MemoryStore = store_with_roster();
        let alice_id: String = store.athletes_by_name()[0].id.clone();
        record_payment(&mut store, &coach(), 2026, 3, &alice_id, payment_request()).unwrap();

        let summary: MonthlySummary = monthly_summary(&store, &coach(), 2026, 3).unwrap();

        assert_eq!(summary.paid_count, 1);
        assert_eq!(summary.unpaid_count, 1);
        assert_eq!(summary.total_collected, DEFAULT_FEE_AMOUNT);
        assert!((summary.completion_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_roster_summary_is_zero() {
        let store: MemoryStore = MemoryStore::new();

        let summary: MonthlySummary = monthly_summary(&store, &coach(), 2026, 3).unwrap();

        assert_eq!(summary.paid_count, 0);
        assert!((summary.completion_percent - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_filter() {
        let mut store: MemoryStore = store_with_roster();
        let alice_id: String = store.athletes_by_name()[0].id.clone();
        record_payment(&mut store, &coach(), 2026, 3, &alice_id, payment_request()).unwrap();

        let filter: FeeStatusFilter = FeeStatusFilter {
            name_query: None,
            level: None,
            status: Some(PaymentStatus::Unpaid),
        };
        let page: FeeStatusPage = fee_status(&store, &coach(), 2026, 3, &filter, 1).unwrap();

        assert_eq!(page.total_matching, 1);
        assert_eq!(page.rows[0].name, "Bob");
    }

    #[test]
    fn test_unknown_athlete_payment_is_rejected() {
        let mut store: MemoryStore = store_with_roster();

        let result = record_payment(
            &mut store,
            &coach(),
            2026,
            3,
            "missing",
            payment_request(),
        );

        assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
    }

    #[test]
    fn test_invalid_method_is_rejected_before_write() {
        let mut store: MemoryStore = store_with_roster();
        let alice_id: String = store.athletes_by_name()[0].id.clone();

        let mut request: RecordPaymentRequest = payment_request();
        request.method = String::from("Barter");
        let result = record_payment(&mut store, &coach(), 2026, 3, &alice_id, request);

        assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
        assert!(store.fee_payments_for("2026-03").is_empty());
    }

    #[test]
    fn test_fees_are_denied_for_parents() {
        let store: MemoryStore = store_with_roster();
        let parent: AuthenticatedUser = AuthenticatedUser::new(
            String::from("uid-parent"),
            String::from("A Parent"),
            Role::Parent,
        );

        assert!(matches!(
            fee_status(&store, &parent, 2026, 3, &FeeStatusFilter::default(), 1),
            Err(ApiError::Unauthorized { .. })
        ));
    }
}
