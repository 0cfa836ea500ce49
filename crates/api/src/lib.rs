// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the KSAC Club Management System.
//!
//! Every operation takes an [`AuthenticatedUser`], enforces role-based
//! authorization up front, validates its inputs before any write, appends
//! an activity-log entry for mutations, and translates lower-layer errors
//! into the [`ApiError`] contract.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod accounts;
mod activity;
mod athletes;
mod attendance;
mod auth;
mod clock;
mod error;
mod export;
mod fees;
mod performance;
mod policy;
mod view_state;

pub use accounts::{
    CreateUserRequest, LinkageIssue, UpdateUserRequest, check_linkage_consistency, create_user,
    delete_user, list_users, unlinked_athletes, update_user,
};
pub use activity::{DEFAULT_ACTIVITY_LIMIT, log_activity, recent_activity};
pub use athletes::{
    ATHLETES_PER_PAGE, AddAthleteRequest, AthleteFilter, AthletePage, AthleteRow,
    UpdateAthleteRequest, add_athlete, delete_athlete, list_athletes, update_athlete,
};
pub use attendance::{
    AttendanceReportRow, AttendanceSheetRow, attendance_report, attendance_sheet, save_attendance,
};
pub use auth::{AuthenticatedUser, AuthorizationService, LoginResult, SessionService};
pub use error::{ApiError, AuthError, translate_domain_error};
pub use export::{
    CsvExport, export_athletes, export_attendance, export_fees, export_performance,
    export_personal_bests,
};
pub use fees::{
    DEFAULT_FEE_AMOUNT, FEES_PER_PAGE, FeeStatusFilter, FeeStatusPage, FeeStatusRow,
    MONTH_NAMES, MonthlySummary, RecordPaymentRequest, fee_status, month_key, monthly_summary,
    record_payment,
};
pub use performance::{
    NewPerformanceRequest, PerformanceFilter, PersonalBestResponse, PersonalBestRow,
    ProgressPoint, UpdatePerformanceRequest, add_performance, delete_performance,
    list_performance, personal_bests_for, progress_series, update_performance,
};
pub use policy::{AccountPolicyError, validate_email, validate_password};
pub use view_state::{SessionViewState, navigation};
