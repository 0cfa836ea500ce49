// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::performance::{PerformanceRecord, Stroke};

/// Reduces a set of performance records to personal bests.
///
/// For every distinct (distance, stroke) pair present in the input, the
/// record with the minimum `time_ms` is selected. Ties are broken by input
/// order: the first occurrence wins. An optional stroke filter restricts the
/// result to one stroke; `None` passes everything through.
///
/// Result rows are sorted by the fixed stroke presentation order
/// ([`Stroke::DISPLAY_ORDER`]), then by ascending distance.
///
/// Empty input yields an empty result. The reducer does not distinguish
/// "no input" from "nothing matched the filter" - callers that need that
/// distinction must inspect the input themselves.
#[must_use]
pub fn personal_bests(
    records: &[PerformanceRecord],
    stroke_filter: Option<Stroke>,
) -> Vec<PerformanceRecord> {
    let mut best: Vec<PerformanceRecord> = Vec::new();

    for record in records {
        match best
            .iter_mut()
            .find(|b| b.distance == record.distance && b.stroke == record.stroke)
        {
            Some(current) => {
                // Strict comparison keeps the first occurrence on ties.
                if record.time_ms < current.time_ms {
                    *current = record.clone();
                }
            }
            None => best.push(record.clone()),
        }
    }

    if let Some(stroke) = stroke_filter {
        best.retain(|record| record.stroke == stroke);
    }

    best.sort_by_key(|record| (record.stroke.display_rank(), record.distance.meters()));

    best
}
