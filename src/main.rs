// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

#![deny(rust_2018_idioms)]

mod config;
mod feed;
mod plot;
mod query;
mod responder;

use std::ops::Deref;
use std::path::Path;
use std::thread;
use std::time::Duration;

use clap::{Arg, Command};
use once_cell::sync::Lazy;

use crate::config::logger::ConfigLogger;
use crate::config::Config;
use crate::feed::manager::{initialize_store, run as run_feed_ticker};

struct AppArgs {
    config: String,
}

pub static THREAD_NAME_FEED_TICKER: &str = "stjarnvakt-feed-ticker";

macro_rules! gen_spawn_managed {
    ($name:expr, $method:ident, $thread_name:ident, $managed_fn:ident) => {
        fn $method() {
            tracing::debug!("spawn managed thread: {}", $name);

            let worker = thread::Builder::new()
                .name($thread_name.to_string())
                .spawn($managed_fn);

            // Block on worker thread (join it)
            let has_error = if let Ok(worker_thread) = worker {
                worker_thread.join().is_err()
            } else {
                true
            };

            // Worker thread crashed?
            if has_error {
                tracing::error!("managed thread crashed ({}), setting it up again", $name);

                // Prevents thread start loop floods
                thread::sleep(Duration::from_secs(1));

                $method();
            }
        }
    };
}

static APP_ARGS: Lazy<AppArgs> = Lazy::new(make_app_args);
static APP_CONF: Lazy<Config> = Lazy::new(|| {
    Config::new(Path::new(&APP_ARGS.config)).expect("could not load configuration")
});

gen_spawn_managed!(
    "feed-ticker",
    spawn_feed_ticker,
    THREAD_NAME_FEED_TICKER,
    run_feed_ticker
);

fn make_app_args() -> AppArgs {
    let matches = Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file")
                .default_value("./stjarnvakt.toml"),
        )
        .get_matches();

    // Generate owned app arguments
    AppArgs {
        config: matches
            .get_one::<String>("config")
            .expect("invalid config value")
            .to_string(),
    }
}

fn ensure_states() {
    // Ensure all statics are valid (a `deref` is enough to lazily initialize them)
    let (_, _) = (APP_ARGS.deref(), APP_CONF.deref());

    // Ensure assets path exists
    assert!(
        APP_CONF.assets.path.exists(),
        "assets directory not found: {:?}",
        APP_CONF.assets.path
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize shared logger
    ConfigLogger::init(&APP_CONF.server.log_level)?;

    tracing::info!("starting up");

    // Ensure all states are bound
    ensure_states();

    // Seed the alert feed store
    initialize_store();

    // Spawn the periodic alert generator (background thread)
    thread::spawn(spawn_feed_ticker);

    // Spawn Web responder (foreground thread)
    responder::manager::run().await?;

    tracing::info!("shutting down server");
    Ok(())
}
