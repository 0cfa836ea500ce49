// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::StoreError;
use ksac_domain::Athlete;
use std::time::{Duration, Instant};
use tracing::debug;

/// A read-through cache in front of the athlete roster.
///
/// Roster reads inside the time-to-live window are served from the cached
/// copy and may be stale by up to that interval. Every athlete write must
/// invalidate the cache eagerly.
#[derive(Debug)]
pub struct RosterCache {
    /// The cached roster, if any.
    cached: Option<CachedRoster>,
    /// How long a cached roster stays valid.
    ttl: Duration,
}

#[derive(Debug)]
struct CachedRoster {
    /// When the roster was loaded.
    fetched_at: Instant,
    /// The cached athlete list.
    athletes: Vec<Athlete>,
}

impl RosterCache {
    /// Creates a new cache with the given time-to-live.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { cached: None, ttl }
    }

    /// Returns the cached roster, loading it through `load` when the cache
    /// is empty or expired.
    ///
    /// # Errors
    ///
    /// Propagates any error from `load`. A failed load leaves the cache
    /// empty.
    pub fn get_or_refresh<F>(&mut self, load: F) -> Result<Vec<Athlete>, StoreError>
    where
        F: FnOnce() -> Result<Vec<Athlete>, StoreError>,
    {
        if let Some(cached) = &self.cached
            && cached.fetched_at.elapsed() < self.ttl
        {
            return Ok(cached.athletes.clone());
        }

        debug!("Roster cache miss; loading from store");
        let athletes: Vec<Athlete> = load()?;
        self.cached = Some(CachedRoster {
            fetched_at: Instant::now(),
            athletes: athletes.clone(),
        });

        Ok(athletes)
    }

    /// Drops the cached roster so the next read reloads from the store.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
