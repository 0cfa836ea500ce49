// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

/// Returns the current UTC time as an ISO 8601 string.
///
/// Formatting the current instant cannot realistically fail; if it ever
/// does, an empty string is stored rather than failing the caller's write.
pub(crate) fn now_iso8601() -> String {
    OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .unwrap_or_default()
}

/// Returns the current UTC calendar year.
pub(crate) fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}
