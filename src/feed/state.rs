// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use super::record::AlertRecord;

/// The alert feed proper: an ordered, newest-first sequence of records plus
/// the monitoring flag and the current selection.
///
/// This type owns no clock, no random source and no lock; it is a plain state
/// machine. Timing lives in `feed::manager`, rendering in the responder, so
/// every transition here can be exercised directly in tests.
#[derive(Default)]
pub struct AlertFeed {
    monitoring: bool,
    alerts: Vec<AlertRecord>,
    selected: Option<String>,
}

impl AlertFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn monitoring(&self) -> bool {
        self.monitoring
    }

    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    /// Resolve the current selection against the live sequence. A selection
    /// whose record is no longer present resolves to `None` without being
    /// cleared.
    pub fn selected(&self) -> Option<&AlertRecord> {
        let id = self.selected.as_deref()?;
        self.alerts.iter().find(|record| record.id == id)
    }

    /// Begin monitoring. Returns `false` when the feed was already being
    /// monitored, in which case nothing changed; the caller must not arm a
    /// second ticker.
    pub fn start(&mut self) -> bool {
        if self.monitoring {
            return false;
        }

        self.monitoring = true;
        true
    }

    /// Stop monitoring. Safe to call when not running.
    pub fn pause(&mut self) -> bool {
        if !self.monitoring {
            return false;
        }

        self.monitoring = false;
        true
    }

    /// Insert a record at the front of the sequence, unconditionally. No
    /// deduplication, no bound on length.
    pub fn receive(&mut self, record: AlertRecord) {
        self.alerts.insert(0, record);
    }

    /// Order-preserving projection of the sequence onto the checked kinds.
    ///
    /// An empty set yields an empty view: unchecking every box means "show
    /// nothing", not "show all". The underlying sequence is never touched.
    pub fn filter(&self, kinds: &HashSet<String>) -> Vec<&AlertRecord> {
        if kinds.is_empty() {
            return Vec::new();
        }

        self.alerts
            .iter()
            .filter(|record| kinds.contains(&record.kind))
            .collect()
    }

    /// Select the record with the given id. Returns `false` (leaving any
    /// previous selection in place) when no such record exists.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.alerts.iter().any(|record| record.id == id) {
            return false;
        }

        self.selected = Some(id.to_string());
        true
    }
}
