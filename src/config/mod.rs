// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

mod defaults;

pub mod logger;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

#[derive(Deserialize)]
pub struct Config {
    pub server: Server,
    pub assets: Assets,
    pub branding: Branding,
    #[serde(default)]
    pub feed: Feed,
    #[serde(default)]
    pub query: Query,
}

impl Config {
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        let s = config::Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("stjarnvakt"))
            .build()?;

        s.try_deserialize()
    }
}

#[derive(Deserialize)]
pub struct Server {
    #[serde(default = "defaults::server_log_level")]
    pub log_level: String,

    #[serde(default = "defaults::server_inet")]
    pub inet: SocketAddr,
}

#[derive(Deserialize)]
pub struct Assets {
    #[serde(default = "defaults::assets_path")]
    pub path: PathBuf,
}

#[derive(Deserialize)]
pub struct Branding {
    #[serde(default = "defaults::branding_page_title")]
    pub page_title: String,

    pub page_url: Url,
    pub company_name: String,
}

#[derive(Deserialize)]
pub struct Feed {
    /// Seconds between ticks of the periodic generator.
    #[serde(default = "defaults::feed_tick_interval")]
    pub tick_interval: u64,

    /// Probability that a tick produces an alert while monitoring.
    #[serde(default = "defaults::feed_tick_probability")]
    pub tick_probability: f64,

    #[serde(default = "defaults::feed_burst_size")]
    pub burst_size: u32,

    /// Seconds between consecutive burst insertions.
    #[serde(default = "defaults::feed_burst_spacing")]
    pub burst_spacing: u64,

    #[serde(default = "defaults::feed_recent_limit")]
    pub recent_limit: usize,

    /// Optional JSON file holding the initial alert sequence (newest first).
    /// When unset, a builtin two-record seed is used.
    pub seed_path: Option<PathBuf>,
}

impl Default for Feed {
    fn default() -> Self {
        Self {
            tick_interval: defaults::feed_tick_interval(),
            tick_probability: defaults::feed_tick_probability(),
            burst_size: defaults::feed_burst_size(),
            burst_spacing: defaults::feed_burst_spacing(),
            recent_limit: defaults::feed_recent_limit(),
            seed_path: None,
        }
    }
}

#[derive(Deserialize)]
pub struct Query {
    /// Instruments drawn from when a query requests none.
    #[serde(default = "defaults::query_instruments")]
    pub instruments: Vec<String>,

    /// Bands drawn from when a query requests none.
    #[serde(default = "defaults::query_bands")]
    pub bands: Vec<String>,

    #[serde(default = "defaults::query_max_results")]
    pub max_results: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            instruments: defaults::query_instruments(),
            bands: defaults::query_bands(),
            max_results: defaults::query_max_results(),
        }
    }
}
