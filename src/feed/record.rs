// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

/// Alert kinds produced by the simulated feed. The `kind` field itself is an
/// open string set; real brokers emit more than these.
pub const GENERATED_KINDS: &[&str] = &["GRB", "GW", "Test"];

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Significance {
    #[serde(rename = "Low")]
    Low,

    #[serde(rename = "Medium")]
    Medium,

    #[serde(rename = "High")]
    High,
}

impl Significance {
    pub const ALL: [Significance; 3] =
        [Significance::Low, Significance::Medium, Significance::High];
}

/// One transient event candidate as delivered by the alert feed.
///
/// `ra` and `dec` are sexagesimal strings carried verbatim; nothing in this
/// system parses or validates them. Ids are not deduplicated.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AlertRecord {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub time: String,

    pub ra: String,
    pub dec: String,

    pub significance: Significance,
    pub details: String,
}
