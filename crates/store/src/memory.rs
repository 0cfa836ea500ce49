// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory document store backend.

use crate::documents::{
    AttendanceDocument, FeeDocument, PaymentDetail, PerformanceUpdate, SessionData, UserAccount,
};
use crate::error::StoreError;
use ksac_audit::ActivityEntry;
use ksac_domain::{Athlete, AttendanceStatus, Gender, Level, PerformanceRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// An in-memory document store.
///
/// Collections are keyed maps; documents are the typed structures from
/// [`crate::documents`] and the domain crate. Write operations mirror the
/// hosted store's surface: `add` allocates an identifier, `update` replaces
/// named fields, `delete` removes a document, and the attendance and fee
/// collections support partial merges keyed inside the document.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// The `athletes` collection, keyed by athlete identifier.
    athletes: BTreeMap<String, Athlete>,
    /// The `attendance_records` collection, keyed by date.
    attendance: BTreeMap<String, AttendanceDocument>,
    /// The `spp_payments` collection, keyed by `YYYY-MM`.
    fees: BTreeMap<String, FeeDocument>,
    /// The `performance_records` collection, keyed by record identifier.
    performance: BTreeMap<String, PerformanceRecord>,
    /// The `users` collection, keyed by auth identity.
    users: BTreeMap<String, UserAccount>,
    /// The append-only `activity_logs` collection.
    activity_log: Vec<ActivityEntry>,
    /// Active sessions, keyed by token.
    sessions: BTreeMap<String, SessionData>,
    /// Monotonic counter backing identifier allocation.
    next_id: u64,
    /// Fault-injection switch for activity-log appends (tests only).
    fail_activity_appends: bool,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next document identifier with the given prefix.
    fn allocate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    // --- athletes ---

    /// Adds a new athlete and returns the stored record.
    pub fn add_athlete(
        &mut self,
        name: String,
        date_of_birth: String,
        level: Level,
        gender: Gender,
    ) -> Athlete {
        let id: String = self.allocate_id("ath");
        let athlete: Athlete = Athlete::new(id.clone(), name, date_of_birth, level, gender);
        debug!(athlete_id = %id, "Stored new athlete");
        self.athletes.insert(id, athlete.clone());
        athlete
    }

    /// Returns all athletes ordered by name (case-insensitive).
    #[must_use]
    pub fn athletes_by_name(&self) -> Vec<Athlete> {
        let mut athletes: Vec<Athlete> = self.athletes.values().cloned().collect();
        athletes.sort_by_key(|athlete| athlete.name.to_lowercase());
        athletes
    }

    /// Returns one athlete by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no athlete carries the identifier.
    pub fn athlete(&self, athlete_id: &str) -> Result<Athlete, StoreError> {
        self.athletes
            .get(athlete_id)
            .cloned()
            .ok_or_else(|| StoreError::AthleteNotFound(athlete_id.to_string()))
    }

    /// Replaces the editable fields of an athlete.
    ///
    /// The linked-account back-reference is left untouched; use
    /// [`Self::set_linked_account`] for that.
    ///
    /// # Errors
    ///
    /// Returns an error if no athlete carries the identifier.
    pub fn update_athlete(
        &mut self,
        athlete_id: &str,
        name: String,
        date_of_birth: String,
        level: Level,
        gender: Gender,
    ) -> Result<Athlete, StoreError> {
        let athlete: &mut Athlete = self
            .athletes
            .get_mut(athlete_id)
            .ok_or_else(|| StoreError::AthleteNotFound(athlete_id.to_string()))?;

        athlete.name = name;
        athlete.date_of_birth = date_of_birth;
        athlete.level = level;
        athlete.gender = gender;

        Ok(athlete.clone())
    }

    /// Sets or clears an athlete's linked-account back-reference.
    ///
    /// # Errors
    ///
    /// Returns an error if no athlete carries the identifier.
    pub fn set_linked_account(
        &mut self,
        athlete_id: &str,
        account_uid: Option<String>,
    ) -> Result<(), StoreError> {
        let athlete: &mut Athlete = self
            .athletes
            .get_mut(athlete_id)
            .ok_or_else(|| StoreError::AthleteNotFound(athlete_id.to_string()))?;

        athlete.linked_account_id = account_uid;
        Ok(())
    }

    /// Deletes an athlete and returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns an error if no athlete carries the identifier.
    pub fn delete_athlete(&mut self, athlete_id: &str) -> Result<Athlete, StoreError> {
        self.athletes
            .remove(athlete_id)
            .ok_or_else(|| StoreError::AthleteNotFound(athlete_id.to_string()))
    }

    /// Returns all athletes without a linked account, ordered by name.
    #[must_use]
    pub fn unlinked_athletes(&self) -> Vec<Athlete> {
        self.athletes_by_name()
            .into_iter()
            .filter(|athlete| athlete.linked_account_id.is_none())
            .collect()
    }

    /// Returns the athlete linked to the given account, if any.
    #[must_use]
    pub fn athlete_by_linked_account(&self, account_uid: &str) -> Option<Athlete> {
        self.athletes
            .values()
            .find(|athlete| athlete.linked_account_id.as_deref() == Some(account_uid))
            .cloned()
    }

    // --- attendance ---

    /// Returns the attendance records for one date.
    ///
    /// A date without a document yields an empty map.
    #[must_use]
    pub fn attendance_for_date(&self, date: &str) -> BTreeMap<String, AttendanceStatus> {
        self.attendance
            .get(date)
            .map(|doc| doc.records.clone())
            .unwrap_or_default()
    }

    /// Merges attendance records into one date's document.
    ///
    /// Existing entries for athletes not present in `records` are preserved.
    pub fn merge_attendance(
        &mut self,
        date: &str,
        records: BTreeMap<String, AttendanceStatus>,
        recorded_by: &str,
    ) {
        let document: &mut AttendanceDocument =
            self.attendance
                .entry(date.to_string())
                .or_insert_with(|| AttendanceDocument {
                    date: date.to_string(),
                    records: BTreeMap::new(),
                    recorded_by: String::new(),
                });

        document.records.extend(records);
        document.recorded_by = recorded_by.to_string();
        debug!(date = %date, "Merged attendance document");
    }

    /// Returns all attendance documents with dates in `[start, end]`.
    ///
    /// ISO `YYYY-MM-DD` dates compare lexicographically in chronological
    /// order, so the range is evaluated on the raw strings.
    #[must_use]
    pub fn attendance_in_range(&self, start: &str, end: &str) -> Vec<AttendanceDocument> {
        if start > end {
            return Vec::new();
        }
        self.attendance
            .range(start.to_string()..=end.to_string())
            .map(|(_, doc)| doc.clone())
            .collect()
    }

    // --- fees ---

    /// Returns the fee payments recorded for one month.
    ///
    /// A month without a document yields an empty map.
    #[must_use]
    pub fn fee_payments_for(&self, month_key: &str) -> BTreeMap<String, PaymentDetail> {
        self.fees
            .get(month_key)
            .map(|doc| doc.payments.clone())
            .unwrap_or_default()
    }

    /// Merges one athlete's payment detail into a month's document.
    ///
    /// Other athletes' entries in the same month are preserved; a second
    /// write for the same athlete replaces the earlier one.
    pub fn merge_fee_payment(&mut self, month_key: &str, athlete_id: &str, detail: PaymentDetail) {
        let document: &mut FeeDocument =
            self.fees
                .entry(month_key.to_string())
                .or_insert_with(|| FeeDocument {
                    month_key: month_key.to_string(),
                    payments: BTreeMap::new(),
                });

        document.payments.insert(athlete_id.to_string(), detail);
        debug!(month = %month_key, athlete_id = %athlete_id, "Merged fee payment");
    }

    // --- performance records ---

    /// Adds a performance record, assigning its identifier.
    pub fn add_performance_record(&mut self, mut record: PerformanceRecord) -> PerformanceRecord {
        record.id = self.allocate_id("perf");
        self.performance.insert(record.id.clone(), record.clone());
        record
    }

    /// Returns all performance records in insertion order.
    #[must_use]
    pub fn performance_records(&self) -> Vec<PerformanceRecord> {
        let mut records: Vec<PerformanceRecord> = self.performance.values().cloned().collect();
        records.sort_by_key(|record| {
            record
                .id
                .rsplit('-')
                .next()
                .and_then(|n| n.parse::<u64>().ok())
                .unwrap_or(u64::MAX)
        });
        records
    }

    /// Returns all performance records for one athlete in insertion order.
    #[must_use]
    pub fn performance_records_for(&self, athlete_id: &str) -> Vec<PerformanceRecord> {
        self.performance_records()
            .into_iter()
            .filter(|record| record.athlete_id == athlete_id)
            .collect()
    }

    /// Returns one performance record by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no record carries the identifier.
    pub fn performance_record(&self, record_id: &str) -> Result<PerformanceRecord, StoreError> {
        self.performance
            .get(record_id)
            .cloned()
            .ok_or_else(|| StoreError::PerformanceRecordNotFound(record_id.to_string()))
    }

    /// Applies an update to a performance record's editable fields.
    ///
    /// The athlete linkage and the age/age-group snapshots are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if no record carries the identifier.
    pub fn update_performance_record(
        &mut self,
        record_id: &str,
        update: PerformanceUpdate,
    ) -> Result<PerformanceRecord, StoreError> {
        let record: &mut PerformanceRecord = self
            .performance
            .get_mut(record_id)
            .ok_or_else(|| StoreError::PerformanceRecordNotFound(record_id.to_string()))?;

        record.competition_name = update.competition_name;
        record.event_date = update.event_date;
        record.stroke = update.stroke;
        record.distance = update.distance;
        record.time_ms = update.time_ms;
        record.time_formatted = update.time_formatted;

        Ok(record.clone())
    }

    /// Deletes a performance record and returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns an error if no record carries the identifier.
    pub fn delete_performance_record(
        &mut self,
        record_id: &str,
    ) -> Result<PerformanceRecord, StoreError> {
        self.performance
            .remove(record_id)
            .ok_or_else(|| StoreError::PerformanceRecordNotFound(record_id.to_string()))
    }

    // --- users ---

    /// Inserts a user profile.
    ///
    /// # Errors
    ///
    /// Returns an error if a profile already exists for the identity.
    pub fn insert_user(&mut self, account: UserAccount) -> Result<(), StoreError> {
        if self.users.contains_key(&account.uid) {
            return Err(StoreError::DuplicateKey(account.uid));
        }
        self.users.insert(account.uid.clone(), account);
        Ok(())
    }

    /// Returns one user profile by identity.
    ///
    /// # Errors
    ///
    /// Returns an error if no profile exists for the identity.
    pub fn user(&self, uid: &str) -> Result<UserAccount, StoreError> {
        self.users
            .get(uid)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(uid.to_string()))
    }

    /// Returns the user profile carrying the given email, if any.
    ///
    /// Comparison is case-insensitive.
    #[must_use]
    pub fn user_by_email(&self, email: &str) -> Option<UserAccount> {
        let needle: String = email.to_lowercase();
        self.users
            .values()
            .find(|account| account.email.to_lowercase() == needle)
            .cloned()
    }

    /// Returns all user profiles ordered by identity.
    #[must_use]
    pub fn all_users(&self) -> Vec<UserAccount> {
        self.users.values().cloned().collect()
    }

    /// Replaces a user profile.
    ///
    /// # Errors
    ///
    /// Returns an error if no profile exists for the identity.
    pub fn update_user(&mut self, account: UserAccount) -> Result<(), StoreError> {
        if !self.users.contains_key(&account.uid) {
            return Err(StoreError::UserNotFound(account.uid));
        }
        self.users.insert(account.uid.clone(), account);
        Ok(())
    }

    /// Deletes a user profile and returns the removed account.
    ///
    /// # Errors
    ///
    /// Returns an error if no profile exists for the identity.
    pub fn delete_user(&mut self, uid: &str) -> Result<UserAccount, StoreError> {
        self.users
            .remove(uid)
            .ok_or_else(|| StoreError::UserNotFound(uid.to_string()))
    }

    // --- activity log ---

    /// Appends an activity-log entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the append (only under the
    /// fault-injection switch).
    pub fn append_activity(&mut self, entry: ActivityEntry) -> Result<(), StoreError> {
        if self.fail_activity_appends {
            return Err(StoreError::Backend(String::from(
                "activity log write rejected",
            )));
        }
        self.activity_log.push(entry);
        Ok(())
    }

    /// Returns the most recent activity entries, newest first.
    #[must_use]
    pub fn recent_activity(&self, limit: usize) -> Vec<ActivityEntry> {
        self.activity_log.iter().rev().take(limit).cloned().collect()
    }

    /// Makes subsequent [`Self::append_activity`] calls fail. Test hook.
    pub const fn set_fail_activity_appends(&mut self, fail: bool) {
        self.fail_activity_appends = fail;
    }

    // --- sessions ---

    /// Stores a session.
    pub fn put_session(&mut self, session: SessionData) {
        self.sessions.insert(session.token.clone(), session);
    }

    /// Returns a session by token, if present.
    #[must_use]
    pub fn session(&self, token: &str) -> Option<SessionData> {
        self.sessions.get(token).cloned()
    }

    /// Deletes a session by token. Deleting an unknown token is a no-op.
    pub fn delete_session(&mut self, token: &str) {
        self.sessions.remove(token);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use ksac_audit::Actor;
    use ksac_domain::{PaymentMethod, PaymentStatus, Role};

    fn store_with_athletes(names: &[&str]) -> MemoryStore {
        let mut store: MemoryStore = MemoryStore::new();
        for name in names {
            store.add_athlete(
                String::from(*name),
                String::from("2012-05-01"),
                Level::new(1).unwrap(),
                Gender::Boy,
            );
        }
        store
    }

    #[test]
    fn test_athletes_are_ordered_by_name_case_insensitively() {
        let store: MemoryStore = store_with_athletes(&["charlie", "Alice", "bob"]);

        let names: Vec<String> = store
            .athletes_by_name()
            .into_iter()
            .map(|a| a.name)
            .collect();

        assert_eq!(names, vec!["Alice", "bob", "charlie"]);
    }

    #[test]
    fn test_athlete_ids_are_unique_and_stable() {
        let mut store: MemoryStore = MemoryStore::new();
        let first: Athlete = store.add_athlete(
            String::from("First"),
            String::from("2010-01-01"),
            Level::new(1).unwrap(),
            Gender::Boy,
        );
        let second: Athlete = store.add_athlete(
            String::from("Second"),
            String::from("2011-01-01"),
            Level::new(2).unwrap(),
            Gender::Girl,
        );

        assert_ne!(first.id, second.id);
        assert_eq!(store.athlete(&first.id).unwrap().name, "First");
    }

    #[test]
    fn test_unknown_athlete_is_not_found() {
        let store: MemoryStore = MemoryStore::new();
        assert_eq!(
            store.athlete("missing"),
            Err(StoreError::AthleteNotFound(String::from("missing")))
        );
    }

    #[test]
    fn test_update_athlete_preserves_linked_account() {
        let mut store: MemoryStore = store_with_athletes(&["Linked Kid"]);
        let id: String = store.athletes_by_name()[0].id.clone();
        store
            .set_linked_account(&id, Some(String::from("uid-9")))
            .unwrap();

        store
            .update_athlete(
                &id,
                String::from("Renamed Kid"),
                String::from("2012-05-01"),
                Level::new(3).unwrap(),
                Gender::Boy,
            )
            .unwrap();

        let athlete: Athlete = store.athlete(&id).unwrap();
        assert_eq!(athlete.name, "Renamed Kid");
        assert_eq!(athlete.linked_account_id, Some(String::from("uid-9")));
    }

    #[test]
    fn test_unlinked_athletes_excludes_linked_ones() {
        let mut store: MemoryStore = store_with_athletes(&["Alpha", "Beta"]);
        let alpha_id: String = store.athletes_by_name()[0].id.clone();
        store
            .set_linked_account(&alpha_id, Some(String::from("uid-1")))
            .unwrap();

        let unlinked: Vec<Athlete> = store.unlinked_athletes();

        assert_eq!(unlinked.len(), 1);
        assert_eq!(unlinked[0].name, "Beta");
        assert_eq!(
            store.athlete_by_linked_account("uid-1").unwrap().name,
            "Alpha"
        );
    }

    #[test]
    fn test_attendance_merge_preserves_other_athletes() {
        let mut store: MemoryStore = MemoryStore::new();

        let mut first: BTreeMap<String, AttendanceStatus> = BTreeMap::new();
        first.insert(String::from("ath-1"), AttendanceStatus::Sick);
        store.merge_attendance("2026-01-10", first, "Coach One");

        let mut second: BTreeMap<String, AttendanceStatus> = BTreeMap::new();
        second.insert(String::from("ath-2"), AttendanceStatus::Excused);
        store.merge_attendance("2026-01-10", second, "Coach Two");

        let records: BTreeMap<String, AttendanceStatus> =
            store.attendance_for_date("2026-01-10");
        assert_eq!(records.get("ath-1"), Some(&AttendanceStatus::Sick));
        assert_eq!(records.get("ath-2"), Some(&AttendanceStatus::Excused));
    }

    #[test]
    fn test_attendance_merge_same_athlete_is_last_writer_wins() {
        let mut store: MemoryStore = MemoryStore::new();

        let mut first: BTreeMap<String, AttendanceStatus> = BTreeMap::new();
        first.insert(String::from("ath-1"), AttendanceStatus::Sick);
        store.merge_attendance("2026-01-10", first, "Coach One");

        let mut second: BTreeMap<String, AttendanceStatus> = BTreeMap::new();
        second.insert(String::from("ath-1"), AttendanceStatus::Present);
        store.merge_attendance("2026-01-10", second, "Coach Two");

        let records: BTreeMap<String, AttendanceStatus> =
            store.attendance_for_date("2026-01-10");
        assert_eq!(records.get("ath-1"), Some(&AttendanceStatus::Present));
    }

    #[test]
    fn test_attendance_range_is_inclusive() {
        let mut store: MemoryStore = MemoryStore::new();
        for date in ["2026-01-01", "2026-01-15", "2026-02-01"] {
            let mut records: BTreeMap<String, AttendanceStatus> = BTreeMap::new();
            records.insert(String::from("ath-1"), AttendanceStatus::Present);
            store.merge_attendance(date, records, "Coach");
        }

        let in_range: Vec<AttendanceDocument> =
            store.attendance_in_range("2026-01-01", "2026-01-31");

        let dates: Vec<String> = in_range.into_iter().map(|d| d.date).collect();
        assert_eq!(dates, vec!["2026-01-01", "2026-01-15"]);
    }

    #[test]
    fn test_fee_merge_keeps_other_athletes_in_month() {
        let mut store: MemoryStore = MemoryStore::new();
        let detail = |amount: u64| PaymentDetail {
            status: PaymentStatus::Paid,
            amount,
            payment_date: String::from("2026-03-05"),
            method: PaymentMethod::Transfer,
            notes: String::new(),
            updated_by: String::from("Admin"),
            updated_at: String::from("2026-03-05T08:00:00Z"),
        };

        store.merge_fee_payment("2026-03", "ath-1", detail(250_000));
        store.merge_fee_payment("2026-03", "ath-2", detail(250_000));
        store.merge_fee_payment("2026-03", "ath-1", detail(300_000));

        let payments: BTreeMap<String, PaymentDetail> = store.fee_payments_for("2026-03");
        assert_eq!(payments.len(), 2);
        assert_eq!(payments.get("ath-1").unwrap().amount, 300_000);
        assert_eq!(payments.get("ath-2").unwrap().amount, 250_000);
    }

    #[test]
    fn test_performance_records_keep_insertion_order() {
        let mut store: MemoryStore = MemoryStore::new();
        for (name, ms) in [("older", 30_000), ("newer", 29_000)] {
            let record: PerformanceRecord = PerformanceRecord {
                id: String::new(),
                athlete_id: String::from("ath-1"),
                athlete_name: String::from("Swimmer"),
                competition_name: String::from(name),
                event_date: String::from("2026-01-01"),
                stroke: ksac_domain::Stroke::Freestyle,
                distance: ksac_domain::Distance::new(50).unwrap(),
                time_ms: ms,
                time_formatted: String::from("00:30.00"),
                age_at_event: 14,
                age_group_at_event: String::from("Group 2"),
                recorded_by: String::from("coach"),
            };
            store.add_performance_record(record);
        }

        let records: Vec<PerformanceRecord> = store.performance_records_for("ath-1");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].competition_name, "older");
        assert_eq!(records[1].competition_name, "newer");
    }

    #[test]
    fn test_users_round_trip_and_duplicate_rejection() {
        let mut store: MemoryStore = MemoryStore::new();
        let account: UserAccount = UserAccount {
            uid: String::from("uid-1"),
            display_name: String::from("Head Coach"),
            email: String::from("coach@example.com"),
            role: Role::Coach,
            child_athlete_ids: Vec::new(),
        };

        store.insert_user(account.clone()).unwrap();
        assert_eq!(store.user("uid-1").unwrap(), account);
        assert_eq!(
            store.user_by_email("COACH@example.com").unwrap().uid,
            "uid-1"
        );
        assert_eq!(
            store.insert_user(account),
            Err(StoreError::DuplicateKey(String::from("uid-1")))
        );
    }

    #[test]
    fn test_recent_activity_is_newest_first_and_limited() {
        let mut store: MemoryStore = MemoryStore::new();
        let actor: Actor = Actor::new(String::from("uid-1"), String::from("Admin"), Role::Admin);
        for i in 0..5 {
            store
                .append_activity(ActivityEntry::new(
                    format!("2026-01-0{}T00:00:00Z", i + 1),
                    actor.clone(),
                    format!("action {i}"),
                ))
                .unwrap();
        }

        let recent: Vec<ActivityEntry> = store.recent_activity(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].action, "action 4");
        assert_eq!(recent[2].action, "action 2");
    }

    #[test]
    fn test_activity_append_fault_injection() {
        let mut store: MemoryStore = MemoryStore::new();
        store.set_fail_activity_appends(true);
        let actor: Actor = Actor::new(String::from("uid-1"), String::from("Admin"), Role::Admin);

        let result = store.append_activity(ActivityEntry::new(
            String::from("2026-01-01T00:00:00Z"),
            actor,
            String::from("doomed"),
        ));

        assert!(matches!(result, Err(StoreError::Backend(_))));
        assert!(store.recent_activity(10).is_empty());
    }

    #[test]
    fn test_sessions_round_trip() {
        let mut store: MemoryStore = MemoryStore::new();
        store.put_session(SessionData {
            token: String::from("tok-1"),
            uid: String::from("uid-1"),
            expires_at: String::from("2027-01-01T00:00:00Z"),
        });

        assert_eq!(store.session("tok-1").unwrap().uid, "uid-1");
        store.delete_session("tok-1");
        assert!(store.session("tok-1").is_none());
    }
}
