// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing_subscriber::EnvFilter;

pub struct ConfigLogger;

impl ConfigLogger {
    /// Install the global subscriber from the configured level. The
    /// `STJARNVAKT_LOG` environment variable overrides it when set.
    pub fn init(level: &str) -> anyhow::Result<()> {
        let filter = match std::env::var("STJARNVAKT_LOG") {
            Ok(directives) => EnvFilter::try_new(directives)?,
            Err(_) => EnvFilter::try_new(level)?,
        };

        tracing_subscriber::fmt().with_env_filter(filter).init();

        Ok(())
    }
}
