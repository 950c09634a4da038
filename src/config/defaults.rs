// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::net::SocketAddr;
use std::path::PathBuf;

pub fn server_log_level() -> String {
    "info".to_string()
}

pub fn server_inet() -> SocketAddr {
    "[::]:8080".parse().unwrap()
}

pub fn assets_path() -> PathBuf {
    PathBuf::from("./res/assets/")
}

pub fn branding_page_title() -> String {
    "Transient Alert Dashboard".to_string()
}

pub fn feed_tick_interval() -> u64 {
    5
}

pub fn feed_tick_probability() -> f64 {
    0.3
}

pub fn feed_burst_size() -> u32 {
    3
}

pub fn feed_burst_spacing() -> u64 {
    1
}

pub fn feed_recent_limit() -> usize {
    3
}

pub fn query_instruments() -> Vec<String> {
    vec![
        "ZTF".to_string(),
        "ATLAS".to_string(),
        "Pan-STARRS".to_string(),
    ]
}

pub fn query_bands() -> Vec<String> {
    vec!["g".to_string(), "r".to_string(), "i".to_string()]
}

pub fn query_max_results() -> usize {
    5
}
