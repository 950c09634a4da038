// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::feed::manager::Store;
use crate::feed::record::{AlertRecord, GENERATED_KINDS};
use crate::APP_CONF;

pub static INDEX_CONFIG: Lazy<IndexConfig> = Lazy::new(|| IndexConfig {
    page_title: APP_CONF.branding.page_title.as_str(),
    page_url: APP_CONF.branding.page_url.as_str(),
    company_name: APP_CONF.branding.company_name.as_str(),
});

pub static INDEX_ENVIRONMENT: Lazy<IndexEnvironment> = Lazy::new(|| IndexEnvironment {
    version: env!("CARGO_PKG_VERSION"),
});

#[derive(Serialize)]
pub struct IndexConfig {
    pub page_title: &'static str,
    pub page_url: &'static str,
    pub company_name: &'static str,
}

#[derive(Serialize)]
pub struct IndexEnvironment {
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct IndexContext<'a> {
    pub alerts: Vec<AlertRow<'a>>,
    pub selected: Option<&'a AlertRecord>,
    pub monitoring: bool,
    pub error: Option<&'a str>,
    pub kinds: Vec<KindToggle>,
    pub config: &'a IndexConfig,
    pub environment: &'a IndexEnvironment,
}

#[derive(Serialize)]
pub struct AlertRow<'a> {
    #[serde(flatten)]
    pub record: &'a AlertRecord,
    pub selected: bool,
}

#[derive(Serialize)]
pub struct KindToggle {
    pub value: &'static str,
    pub checked: bool,
}

impl<'a> IndexContext<'a> {
    /// Project the store onto the dashboard view.
    ///
    /// `checked_kinds` of `None` means the page carried no filter parameter
    /// at all, which renders every kind; `Some` of an empty set renders an
    /// empty table. State is read, never written.
    pub fn build(
        store: &'a Store,
        checked_kinds: Option<&HashSet<String>>,
        config: &'a IndexConfig,
        environment: &'a IndexEnvironment,
    ) -> Self {
        let all_kinds: HashSet<String> = GENERATED_KINDS
            .iter()
            .map(|kind| kind.to_string())
            .collect();
        let effective = checked_kinds.unwrap_or(&all_kinds);

        let selected_id = store.feed.selected().map(|record| record.id.as_str());
        let alerts = store
            .feed
            .filter(effective)
            .into_iter()
            .map(|record| AlertRow {
                selected: Some(record.id.as_str()) == selected_id,
                record,
            })
            .collect();

        let kinds = GENERATED_KINDS
            .iter()
            .map(|kind| KindToggle {
                value: kind,
                checked: effective.contains(*kind),
            })
            .collect();

        IndexContext {
            alerts,
            selected: store.feed.selected(),
            monitoring: store.feed.monitoring(),
            error: store.error.as_deref(),
            kinds,
            config,
            environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::record::Significance;
    use crate::feed::state::AlertFeed;

    static TEST_CONFIG: IndexConfig = IndexConfig {
        page_title: "Test Dashboard",
        page_url: "https://stjarnvakt.local/",
        company_name: "Test Observatory",
    };

    static TEST_ENVIRONMENT: IndexEnvironment = IndexEnvironment { version: "0.0.0" };

    fn record(id: &str, kind: &str) -> AlertRecord {
        AlertRecord {
            id: id.to_string(),
            kind: kind.to_string(),
            time: "2024-03-31T12:00:00Z".to_string(),
            ra: "08h02m25s".to_string(),
            dec: "40d51m25s".to_string(),
            significance: Significance::Low,
            details: "test".to_string(),
        }
    }

    fn store_with(records: &[(&str, &str)]) -> Store {
        let mut feed = AlertFeed::new();
        for (id, kind) in records.iter().rev() {
            feed.receive(record(id, kind));
        }

        Store { feed, error: None }
    }

    #[test]
    fn no_filter_parameter_shows_every_kind() {
        let store = store_with(&[("GRB240331A", "GRB"), ("GW240330B", "GW")]);

        let context = IndexContext::build(&store, None, &TEST_CONFIG, &TEST_ENVIRONMENT);

        assert_eq!(context.alerts.len(), 2);
        assert!(context.kinds.iter().all(|toggle| toggle.checked));
    }

    #[test]
    fn empty_filter_set_shows_nothing() {
        let store = store_with(&[("GRB240331A", "GRB"), ("GW240330B", "GW")]);
        let none = HashSet::new();

        let context = IndexContext::build(&store, Some(&none), &TEST_CONFIG, &TEST_ENVIRONMENT);

        assert!(context.alerts.is_empty());
        assert!(context.kinds.iter().all(|toggle| !toggle.checked));
    }

    #[test]
    fn exactly_one_row_carries_the_selected_marker() {
        let mut store = store_with(&[
            ("Test240401C", "Test"),
            ("GRB240331A", "GRB"),
            ("GW240330B", "GW"),
        ]);
        store.feed.select("GRB240331A");

        let context = IndexContext::build(&store, None, &TEST_CONFIG, &TEST_ENVIRONMENT);

        let marked: Vec<&AlertRow<'_>> =
            context.alerts.iter().filter(|row| row.selected).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].record.id, "GRB240331A");
        assert_eq!(context.selected.map(|r| r.id.as_str()), Some("GRB240331A"));
    }

    #[test]
    fn selection_marker_survives_a_new_arrival() {
        let mut store = store_with(&[("GRB240331A", "GRB"), ("GW240330B", "GW")]);
        store.feed.select("GW240330B");
        store.feed.receive(record("Test240401C", "Test"));

        let context = IndexContext::build(&store, None, &TEST_CONFIG, &TEST_ENVIRONMENT);

        assert_eq!(context.alerts.len(), 3);
        let marked: Vec<&AlertRow<'_>> =
            context.alerts.iter().filter(|row| row.selected).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].record.id, "GW240330B");
    }

    #[test]
    fn load_error_is_surfaced_in_the_context() {
        let mut store = store_with(&[]);
        store.error = Some("could not read alert seed file".to_string());

        let context = IndexContext::build(&store, None, &TEST_CONFIG, &TEST_ENVIRONMENT);

        assert!(context.alerts.is_empty());
        assert_eq!(context.error, Some("could not read alert seed file"));
    }
}
