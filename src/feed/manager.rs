// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rand::Rng;
use time::OffsetDateTime;

use super::generator;
use super::record::AlertRecord;
use super::state::AlertFeed;
use crate::APP_CONF;

pub static STORE: Lazy<Arc<RwLock<Store>>> = Lazy::new(|| {
    Arc::new(RwLock::new(Store {
        feed: AlertFeed::new(),
        error: None,
    }))
});

pub struct Store {
    pub feed: AlertFeed,

    /// Set when the initial load failed; the dashboard renders this inline
    /// in place of the alert table.
    pub error: Option<String>,
}

/// Seed the store with the initial alert sequence.
///
/// A failed load is caught here rather than propagated: the message is kept
/// on the store and the feed stays empty, so the responder can show an error
/// panel instead of tearing the process down.
pub fn initialize_store() {
    let mut store = STORE.write();

    match load_initial_alerts() {
        Ok(alerts) => {
            // Seed lists are newest-first on disk; reverse so that prepending
            // reproduces that order.
            for alert in alerts.into_iter().rev() {
                tracing::debug!("feed store: seeded alert {}", alert.id);

                store.feed.receive(alert);
            }
        }
        Err(err) => {
            tracing::error!("failed to load initial alerts: {:?}", err);

            store.error = Some(format!("{:#}", err));
        }
    }

    tracing::info!("initialized feed store");
}

fn load_initial_alerts() -> anyhow::Result<Vec<AlertRecord>> {
    match &APP_CONF.feed.seed_path {
        Some(path) => {
            let raw = fs::read(path)
                .with_context(|| format!("could not read alert seed file: {:?}", path))?;

            serde_json::from_slice(&raw).context("could not parse alert seed file")
        }
        None => Ok(generator::seed_alerts(OffsetDateTime::now_utc())),
    }
}

/// The periodic generator loop. Exactly one such thread exists per process;
/// `start`/`pause` only flip the flag on the feed, which is how a repeated
/// start can never arm a second ticker.
pub fn run() {
    let mut rng = rand::thread_rng();
    let tick = Duration::from_secs(APP_CONF.feed.tick_interval);

    loop {
        thread::sleep(tick);

        if !STORE.read().feed.monitoring() {
            continue;
        }

        if rng.gen_bool(APP_CONF.feed.tick_probability) {
            let record = generator::generate_random(&mut rng, OffsetDateTime::now_utc());

            tracing::info!("feed tick: received simulated alert {}", record.id);

            STORE.write().feed.receive(record);
        } else {
            tracing::debug!("feed tick: no alert this interval");
        }
    }
}

pub fn start_monitoring() -> bool {
    let changed = STORE.write().feed.start();

    if changed {
        tracing::info!("starting alert monitoring");
    } else {
        tracing::debug!("alert monitoring already running");
    }

    changed
}

pub fn pause_monitoring() -> bool {
    let changed = STORE.write().feed.pause();

    if changed {
        tracing::info!("alert monitoring paused");
    }

    changed
}

/// Schedule a burst of simulated alerts at staggered offsets.
///
/// Bursts run whether or not the periodic generator is active, and cannot be
/// cancelled once scheduled; a burst may interleave with ticker insertions.
pub fn simulate_burst() {
    let count = APP_CONF.feed.burst_size;
    let spacing = Duration::from_secs(APP_CONF.feed.burst_spacing);

    tracing::info!("scheduling a burst of {} simulated alerts", count);

    thread::spawn(move || {
        let mut rng = rand::thread_rng();

        for index in 0..count {
            if index > 0 {
                thread::sleep(spacing);
            }

            let record = generator::generate_random(&mut rng, OffsetDateTime::now_utc());

            tracing::info!("burst: received simulated alert {}", record.id);

            STORE.write().feed.receive(record);
        }
    });
}
