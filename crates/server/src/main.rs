// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
};
use clap::Parser;
use ksac_api::{
    AddAthleteRequest, ApiError, AthleteFilter, AthletePage, AttendanceReportRow,
    AttendanceSheetRow, CreateUserRequest, CsvExport, DEFAULT_ACTIVITY_LIMIT,
    FeeStatusFilter, FeeStatusPage, LinkageIssue, LoginResult, MonthlySummary,
    NewPerformanceRequest, PerformanceFilter, PersonalBestResponse, ProgressPoint,
    RecordPaymentRequest, SessionService, UpdateAthleteRequest, UpdatePerformanceRequest,
    UpdateUserRequest, add_athlete, add_performance, attendance_report, attendance_sheet,
    check_linkage_consistency, create_user, delete_athlete, delete_performance, delete_user,
    export_athletes, export_attendance, export_fees, export_performance, export_personal_bests,
    fee_status, list_athletes, list_performance, list_users, monthly_summary, navigation,
    personal_bests_for, progress_series, recent_activity, record_payment, save_attendance,
    unlinked_athletes, update_athlete, update_performance, update_user,
};
use ksac_audit::ActivityEntry;
use ksac_domain::{Athlete, AttendanceStatus, PaymentStatus, PerformanceRecord, Role, View};
use ksac_store::{AuthProvider, MemoryStore, RosterCache, UserAccount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};

mod session;

use session::SessionUser;

/// KSAC Club Server - HTTP server for the KSAC Club Management System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Time-to-live of the athlete roster cache, in seconds
    #[arg(long, default_value_t = 30)]
    roster_cache_ttl_secs: u64,

    /// Email for the initial admin account (created at startup when set)
    #[arg(long)]
    admin_email: Option<String>,

    /// Password for the initial admin account
    #[arg(long)]
    admin_password: Option<String>,

    /// Display name for the initial admin account
    #[arg(long, default_value = "Site Administrator")]
    admin_name: String,
}

/// Application state shared across handlers.
///
/// The store, auth provider, and roster cache are each wrapped in a Mutex
/// to allow safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The document store.
    store: Arc<Mutex<MemoryStore>>,
    /// The auth provider.
    auth: Arc<Mutex<AuthProvider>>,
    /// The roster read-through cache.
    roster_cache: Arc<Mutex<RosterCache>>,
}

impl AppState {
    /// Creates application state with empty backends.
    fn new(roster_cache_ttl: Duration) -> Self {
        Self {
            store: Arc::new(Mutex::new(MemoryStore::new())),
            auth: Arc::new(Mutex::new(AuthProvider::new())),
            roster_cache: Arc::new(Mutex::new(RosterCache::new(roster_cache_ttl))),
        }
    }
}

/// API request for logging in.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiRequest {
    /// The login email.
    email: String,
    /// The login password.
    password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiResponse {
    /// The opaque session token.
    session_token: String,
    /// The user's display name.
    display_name: String,
    /// The user's role.
    role: Role,
}

/// API request for a password reset.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ResetPasswordApiRequest {
    /// The email to send the reset link to.
    email: String,
}

/// API response for the navigation menu.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct NavigationApiResponse {
    /// The user's role.
    role: Role,
    /// The views the role may navigate to.
    views: Vec<View>,
}

/// API request for saving one day's attendance.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SaveAttendanceApiRequest {
    /// Status per athlete identifier.
    records: BTreeMap<String, AttendanceStatus>,
}

/// API response for write operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } | ApiError::EmptyReport => StatusCode::NOT_FOUND,
            ApiError::Backend { .. } => {
                error!(error = %err, "Store error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Query parameters for the roster listing.
#[derive(Debug, Deserialize)]
struct AthleteListQuery {
    /// Case-insensitive name substring.
    name_query: Option<String>,
    /// Restrict to one level.
    level: Option<u8>,
    /// Restrict to one age group label.
    age_group: Option<String>,
    /// Restrict to one gender.
    gender: Option<String>,
    /// The 1-based page to return.
    page: Option<usize>,
}

impl AthleteListQuery {
    /// Converts the query into the API filter.
    fn into_filter(self) -> (AthleteFilter, usize) {
        let page: usize = self.page.unwrap_or(1);
        (
            AthleteFilter {
                name_query: self.name_query,
                level: self.level,
                age_group: self.age_group,
                gender: self.gender,
            },
            page,
        )
    }
}

/// Query parameters for the attendance sheet.
#[derive(Debug, Deserialize)]
struct AttendanceSheetQuery {
    /// The training date as `YYYY-MM-DD`.
    date: String,
    /// Restrict to one level.
    level: Option<u8>,
}

/// Query parameters for the attendance report and export.
#[derive(Debug, Deserialize)]
struct AttendanceReportQuery {
    /// Range start date (inclusive).
    start: String,
    /// Range end date (inclusive).
    end: String,
    /// Restrict to one level.
    level: Option<u8>,
    /// Restrict to one status wire value.
    status: Option<String>,
}

/// Query parameters selecting a fee month.
#[derive(Debug, Deserialize)]
struct FeeMonthQuery {
    /// The calendar year.
    year: i32,
    /// The month (1-12).
    month: u8,
}

/// Query parameters for the fee status listing and export.
#[derive(Debug, Deserialize)]
struct FeeStatusQuery {
    /// The calendar year.
    year: i32,
    /// The month (1-12).
    month: u8,
    /// Case-insensitive name substring.
    name_query: Option<String>,
    /// Restrict to one level.
    level: Option<u8>,
    /// Restrict to one payment status wire value.
    status: Option<String>,
    /// The 1-based page to return.
    page: Option<usize>,
}

impl FeeStatusQuery {
    /// Converts the query into the API filter.
    fn into_filter(self) -> Result<(i32, u8, FeeStatusFilter, usize), HttpError> {
        let status: Option<PaymentStatus> = self
            .status
            .as_deref()
            .map(PaymentStatus::parse)
            .transpose()
            .map_err(|e| HttpError::from(ksac_api::translate_domain_error(e)))?;
        Ok((
            self.year,
            self.month,
            FeeStatusFilter {
                name_query: self.name_query,
                level: self.level,
                status,
            },
            self.page.unwrap_or(1),
        ))
    }
}

/// Query parameters for the performance listing and export.
#[derive(Debug, Deserialize)]
struct PerformanceListQuery {
    /// Restrict to one athlete.
    athlete_id: Option<String>,
    /// Restrict to one stroke wire value.
    stroke: Option<String>,
    /// Restrict to one distance in meters.
    distance: Option<u16>,
    /// Keep only the most recent N records.
    last_n: Option<usize>,
}

impl PerformanceListQuery {
    /// Converts the query into the API filter.
    fn into_filter(self) -> PerformanceFilter {
        PerformanceFilter {
            athlete_id: self.athlete_id,
            stroke: self.stroke,
            distance: self.distance,
            last_n: self.last_n,
        }
    }
}

/// Query parameters for the progress series.
#[derive(Debug, Deserialize)]
struct ProgressQuery {
    /// The athlete.
    athlete_id: String,
    /// Stroke wire value.
    stroke: String,
    /// Distance in meters.
    distance: u16,
}

/// Query parameters for personal bests.
#[derive(Debug, Deserialize)]
struct PersonalBestQuery {
    /// The athlete to view, where the role allows a choice.
    athlete_id: Option<String>,
    /// Optional stroke wire value.
    stroke: Option<String>,
}

/// Query parameters for the activity log.
#[derive(Debug, Deserialize)]
struct ActivityQuery {
    /// Maximum number of entries to return.
    limit: Option<usize>,
}

/// Parses an attendance status filter value.
fn parse_status_filter(status: Option<&str>) -> Result<Option<AttendanceStatus>, HttpError> {
    status
        .map(AttendanceStatus::parse)
        .transpose()
        .map_err(|e| HttpError::from(ksac_api::translate_domain_error(e)))
}

/// Handler for POST `/auth/login`.
async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<LoginApiRequest>,
) -> Result<Json<LoginApiResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let mut store = state.store.lock().await;
    let provider = state.auth.lock().await;
    let result: LoginResult =
        SessionService::login(&mut store, &provider, &req.email, &req.password)?;
    drop(provider);
    drop(store);

    Ok(Json(LoginApiResponse {
        session_token: result.session_token,
        display_name: result.user.display_name,
        role: result.user.role,
    }))
}

/// Handler for POST `/auth/logout`.
async fn handle_logout(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    headers: HeaderMap,
) -> Result<Json<WriteResponse>, HttpError> {
    let token: String = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
        .unwrap_or_default();

    let mut store = state.store.lock().await;
    SessionService::logout(&mut store, &user, &token);
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Logged out")),
    }))
}

/// Handler for POST `/auth/reset_password`.
async fn handle_reset_password(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ResetPasswordApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(email = %req.email, "Handling password reset request");

    let store = state.store.lock().await;
    let mut provider = state.auth.lock().await;
    SessionService::request_password_reset(&store, &mut provider, &req.email)?;
    drop(provider);
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("A password reset link has been sent")),
    }))
}

/// Handler for GET `/navigation`.
async fn handle_navigation(
    SessionUser(user): SessionUser,
) -> Json<NavigationApiResponse> {
    Json(NavigationApiResponse {
        role: user.role,
        views: navigation(user.role),
    })
}

/// Handler for GET `/athletes`.
async fn handle_list_athletes(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<AthleteListQuery>,
) -> Result<Json<AthletePage>, HttpError> {
    let (filter, page) = query.into_filter();

    let store = state.store.lock().await;
    let mut cache = state.roster_cache.lock().await;
    let result: AthletePage = list_athletes(&store, &mut cache, &user, &filter, page)?;
    drop(cache);
    drop(store);

    Ok(Json(result))
}

/// Handler for POST `/athletes`.
async fn handle_add_athlete(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<AddAthleteRequest>,
) -> Result<Json<ksac_api::AthleteRow>, HttpError> {
    info!(name = %req.name, "Handling add_athlete request");

    let mut store = state.store.lock().await;
    let mut cache = state.roster_cache.lock().await;
    let row = add_athlete(&mut store, &mut cache, &user, req)?;
    drop(cache);
    drop(store);

    Ok(Json(row))
}

/// Handler for PATCH `/athletes/{athlete_id}`.
async fn handle_update_athlete(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(athlete_id): Path<String>,
    Json(req): Json<UpdateAthleteRequest>,
) -> Result<Json<ksac_api::AthleteRow>, HttpError> {
    let mut store = state.store.lock().await;
    let mut cache = state.roster_cache.lock().await;
    let row = update_athlete(&mut store, &mut cache, &user, &athlete_id, req)?;
    drop(cache);
    drop(store);

    Ok(Json(row))
}

/// Handler for DELETE `/athletes/{athlete_id}`.
async fn handle_delete_athlete(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(athlete_id): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut store = state.store.lock().await;
    let mut cache = state.roster_cache.lock().await;
    delete_athlete(&mut store, &mut cache, &user, &athlete_id)?;
    drop(cache);
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Athlete deleted")),
    }))
}

/// Handler for GET `/athletes/unlinked`.
async fn handle_unlinked_athletes(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<Vec<Athlete>>, HttpError> {
    let store = state.store.lock().await;
    let athletes: Vec<Athlete> = unlinked_athletes(&store, &user)?;
    drop(store);

    Ok(Json(athletes))
}

/// Handler for GET `/attendance`.
async fn handle_attendance_sheet(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<AttendanceSheetQuery>,
) -> Result<Json<Vec<AttendanceSheetRow>>, HttpError> {
    let store = state.store.lock().await;
    let rows: Vec<AttendanceSheetRow> =
        attendance_sheet(&store, &user, &query.date, query.level)?;
    drop(store);

    Ok(Json(rows))
}

/// Handler for PUT `/attendance/{date}`.
async fn handle_save_attendance(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(date): Path<String>,
    Json(req): Json<SaveAttendanceApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(date = %date, rows = req.records.len(), "Handling save_attendance request");

    let mut store = state.store.lock().await;
    save_attendance(&mut store, &user, &date, req.records)?;
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Attendance for {date} saved")),
    }))
}

/// Handler for GET `/attendance/report`.
async fn handle_attendance_report(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<AttendanceReportQuery>,
) -> Result<Json<Vec<AttendanceReportRow>>, HttpError> {
    let status: Option<AttendanceStatus> = parse_status_filter(query.status.as_deref())?;

    let store = state.store.lock().await;
    let rows: Vec<AttendanceReportRow> = attendance_report(
        &store,
        &user,
        &query.start,
        &query.end,
        query.level,
        status,
    )?;
    drop(store);

    Ok(Json(rows))
}

/// Handler for GET `/fees`.
async fn handle_fee_status(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<FeeStatusQuery>,
) -> Result<Json<FeeStatusPage>, HttpError> {
    let (year, month, filter, page) = query.into_filter()?;

    let store = state.store.lock().await;
    let result: FeeStatusPage = fee_status(&store, &user, year, month, &filter, page)?;
    drop(store);

    Ok(Json(result))
}

/// Handler for GET `/fees/summary`.
async fn handle_fee_summary(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<FeeMonthQuery>,
) -> Result<Json<MonthlySummary>, HttpError> {
    let store = state.store.lock().await;
    let summary: MonthlySummary = monthly_summary(&store, &user, query.year, query.month)?;
    drop(store);

    Ok(Json(summary))
}

/// Handler for POST `/fees/{athlete_id}`.
async fn handle_record_payment(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(athlete_id): Path<String>,
    Query(query): Query<FeeMonthQuery>,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<Json<ksac_api::FeeStatusRow>, HttpError> {
    info!(athlete_id = %athlete_id, year = query.year, month = query.month, "Handling record_payment request");

    let mut store = state.store.lock().await;
    let row = record_payment(&mut store, &user, query.year, query.month, &athlete_id, req)?;
    drop(store);

    Ok(Json(row))
}

/// Handler for GET `/performance`.
async fn handle_list_performance(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<PerformanceListQuery>,
) -> Result<Json<Vec<PerformanceRecord>>, HttpError> {
    let store = state.store.lock().await;
    let records: Vec<PerformanceRecord> =
        list_performance(&store, &user, &query.into_filter())?;
    drop(store);

    Ok(Json(records))
}

/// Handler for POST `/performance`.
async fn handle_add_performance(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<NewPerformanceRequest>,
) -> Result<Json<PerformanceRecord>, HttpError> {
    info!(athlete_id = %req.athlete_id, "Handling add_performance request");

    let mut store = state.store.lock().await;
    let record: PerformanceRecord = add_performance(&mut store, &user, req)?;
    drop(store);

    Ok(Json(record))
}

/// Handler for PATCH `/performance/{record_id}`.
async fn handle_update_performance(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(record_id): Path<String>,
    Json(req): Json<UpdatePerformanceRequest>,
) -> Result<Json<PerformanceRecord>, HttpError> {
    let mut store = state.store.lock().await;
    let record: PerformanceRecord = update_performance(&mut store, &user, &record_id, req)?;
    drop(store);

    Ok(Json(record))
}

/// Handler for DELETE `/performance/{record_id}`.
async fn handle_delete_performance(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(record_id): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut store = state.store.lock().await;
    delete_performance(&mut store, &user, &record_id)?;
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Performance record deleted")),
    }))
}

/// Handler for GET `/performance/progress`.
async fn handle_progress(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<Vec<ProgressPoint>>, HttpError> {
    let store = state.store.lock().await;
    let points: Vec<ProgressPoint> = progress_series(
        &store,
        &user,
        &query.athlete_id,
        &query.stroke,
        query.distance,
    )?;
    drop(store);

    Ok(Json(points))
}

/// Handler for GET `/personal_bests`.
async fn handle_personal_bests(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<PersonalBestQuery>,
) -> Result<Json<PersonalBestResponse>, HttpError> {
    let store = state.store.lock().await;
    let response: PersonalBestResponse = personal_bests_for(
        &store,
        &user,
        query.athlete_id.as_deref(),
        query.stroke.as_deref(),
    )?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/users`.
async fn handle_list_users(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<Vec<UserAccount>>, HttpError> {
    let store = state.store.lock().await;
    let users: Vec<UserAccount> = list_users(&store, &user)?;
    drop(store);

    Ok(Json(users))
}

/// Handler for POST `/users`.
async fn handle_create_user(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<UserAccount>, HttpError> {
    info!(email = %req.email, role = %req.role, "Handling create_user request");

    let mut store = state.store.lock().await;
    let mut provider = state.auth.lock().await;
    let account: UserAccount = create_user(&mut store, &mut provider, &user, req)?;
    drop(provider);
    drop(store);

    Ok(Json(account))
}

/// Handler for PATCH `/users/{uid}`.
async fn handle_update_user(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(uid): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserAccount>, HttpError> {
    let mut store = state.store.lock().await;
    let mut provider = state.auth.lock().await;
    let account: UserAccount = update_user(&mut store, &mut provider, &user, &uid, req)?;
    drop(provider);
    drop(store);

    Ok(Json(account))
}

/// Handler for DELETE `/users/{uid}`.
async fn handle_delete_user(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Path(uid): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut store = state.store.lock().await;
    let mut provider = state.auth.lock().await;
    delete_user(&mut store, &mut provider, &user, &uid)?;
    drop(provider);
    drop(store);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("User deleted")),
    }))
}

/// Handler for GET `/users/consistency`.
async fn handle_consistency(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<Vec<LinkageIssue>>, HttpError> {
    let store = state.store.lock().await;
    let issues: Vec<LinkageIssue> = check_linkage_consistency(&store, &user)?;
    drop(store);

    Ok(Json(issues))
}

/// Handler for GET `/activity`.
async fn handle_activity(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityEntry>>, HttpError> {
    let store = state.store.lock().await;
    let entries: Vec<ActivityEntry> = recent_activity(
        &store,
        &user,
        query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT),
    )?;
    drop(store);

    Ok(Json(entries))
}

/// Handler for GET `/exports/athletes`.
async fn handle_export_athletes(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<AthleteListQuery>,
) -> Result<Json<CsvExport>, HttpError> {
    let (filter, _) = query.into_filter();

    let store = state.store.lock().await;
    let export: CsvExport = export_athletes(&store, &user, &filter)?;
    drop(store);

    Ok(Json(export))
}

/// Handler for GET `/exports/attendance`.
async fn handle_export_attendance(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<AttendanceReportQuery>,
) -> Result<Json<CsvExport>, HttpError> {
    let status: Option<AttendanceStatus> = parse_status_filter(query.status.as_deref())?;

    let store = state.store.lock().await;
    let export: CsvExport = export_attendance(
        &store,
        &user,
        &query.start,
        &query.end,
        query.level,
        status,
    )?;
    drop(store);

    Ok(Json(export))
}

/// Handler for GET `/exports/fees`.
async fn handle_export_fees(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<FeeStatusQuery>,
) -> Result<Json<CsvExport>, HttpError> {
    let (year, month, filter, _) = query.into_filter()?;

    let store = state.store.lock().await;
    let export: CsvExport = export_fees(&store, &user, year, month, &filter)?;
    drop(store);

    Ok(Json(export))
}

/// Handler for GET `/exports/performance`.
async fn handle_export_performance(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<PerformanceListQuery>,
) -> Result<Json<CsvExport>, HttpError> {
    let store = state.store.lock().await;
    let export: CsvExport = export_performance(&store, &user, &query.into_filter())?;
    drop(store);

    Ok(Json(export))
}

/// Handler for GET `/exports/personal_bests`.
async fn handle_export_personal_bests(
    AxumState(state): AxumState<AppState>,
    SessionUser(user): SessionUser,
    Query(query): Query<PersonalBestQuery>,
) -> Result<Json<CsvExport>, HttpError> {
    let store = state.store.lock().await;
    let export: CsvExport = export_personal_bests(
        &store,
        &user,
        query.athlete_id.as_deref(),
        query.stroke.as_deref(),
    )?;
    drop(store);

    Ok(Json(export))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/reset_password", post(handle_reset_password))
        .route("/navigation", get(handle_navigation))
        .route("/athletes", get(handle_list_athletes))
        .route("/athletes", post(handle_add_athlete))
        .route("/athletes/unlinked", get(handle_unlinked_athletes))
        .route("/athletes/{athlete_id}", patch(handle_update_athlete))
        .route("/athletes/{athlete_id}", delete(handle_delete_athlete))
        .route("/attendance", get(handle_attendance_sheet))
        .route("/attendance/report", get(handle_attendance_report))
        .route("/attendance/{date}", put(handle_save_attendance))
        .route("/fees", get(handle_fee_status))
        .route("/fees/summary", get(handle_fee_summary))
        .route("/fees/{athlete_id}", post(handle_record_payment))
        .route("/performance", get(handle_list_performance))
        .route("/performance", post(handle_add_performance))
        .route("/performance/progress", get(handle_progress))
        .route("/performance/{record_id}", patch(handle_update_performance))
        .route("/performance/{record_id}", delete(handle_delete_performance))
        .route("/personal_bests", get(handle_personal_bests))
        .route("/users", get(handle_list_users))
        .route("/users", post(handle_create_user))
        .route("/users/consistency", get(handle_consistency))
        .route("/users/{uid}", patch(handle_update_user))
        .route("/users/{uid}", delete(handle_delete_user))
        .route("/activity", get(handle_activity))
        .route("/exports/athletes", get(handle_export_athletes))
        .route("/exports/attendance", get(handle_export_attendance))
        .route("/exports/fees", get(handle_export_fees))
        .route("/exports/performance", get(handle_export_performance))
        .route(
            "/exports/personal_bests",
            get(handle_export_personal_bests),
        )
        .with_state(app_state)
}

/// Seeds the initial admin account when credentials are provided.
async fn seed_admin(
    state: &AppState,
    email: &str,
    password: &str,
    display_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut provider = state.auth.lock().await;
    if provider.account_exists(email) {
        return Ok(());
    }

    let uid: String = provider.create_account(email, password)?;
    provider.set_role_claim(&uid, Role::Admin)?;
    drop(provider);

    let mut store = state.store.lock().await;
    store.insert_user(UserAccount {
        uid,
        display_name: display_name.to_string(),
        email: email.to_lowercase(),
        role: Role::Admin,
        child_athlete_ids: Vec::new(),
    })?;
    drop(store);

    info!(email = %email, "Seeded initial admin account");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing KSAC Club Server");

    let app_state: AppState =
        AppState::new(Duration::from_secs(args.roster_cache_ttl_secs));

    if let (Some(email), Some(password)) = (&args.admin_email, &args.admin_password) {
        seed_admin(&app_state, email, password, &args.admin_name).await?;
    }

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
