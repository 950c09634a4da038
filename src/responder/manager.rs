// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use poem::{
    endpoint::StaticFilesEndpoint,
    get,
    listener::TcpListener,
    middleware::{NormalizePath, TrailingSlash},
    post, EndpointExt, Route, Server,
};
use tera::Tera;

use super::routes;
use crate::APP_CONF;

pub async fn run() -> std::io::Result<()> {
    let templates: String = APP_CONF
        .assets
        .path
        .canonicalize()
        .expect("assets path does not resolve")
        .join("templates")
        .join("*")
        .to_str()
        .expect("assets path is not valid unicode")
        .into();

    let tera = Tera::new(&templates).expect("could not load templates");

    let app = Route::new()
        .at("/", get(routes::index))
        .at("/status/text", get(routes::status_text))
        .at("/api/alerts", get(routes::alerts))
        .at("/api/alerts/recent", get(routes::alerts_recent))
        .at("/api/alerts/select", post(routes::alerts_select))
        .at("/api/alerts/simulate", post(routes::alerts_simulate))
        .at("/api/monitor/start", post(routes::monitor_start))
        .at("/api/monitor/pause", post(routes::monitor_pause))
        .at("/api/query", post(routes::query_execute))
        .at("/api/visualization", get(routes::visualization))
        .nest("/assets", StaticFilesEndpoint::new(&APP_CONF.assets.path))
        .data(tera)
        .with(NormalizePath::new(TrailingSlash::Trim));

    Server::new(TcpListener::bind(APP_CONF.server.inet))
        .run(app)
        .await?;

    Ok(())
}
