// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use poem::error::InternalServerError;
use poem::http::StatusCode;
use poem::web::{Data, Html, Json, Query};
use poem::{handler, IntoResponse, Request};
use serde::{Deserialize, Serialize};
use tera::Tera;
use time::OffsetDateTime;

use super::context::{IndexContext, INDEX_CONFIG, INDEX_ENVIRONMENT};
use crate::feed::manager::{self, STORE};
use crate::feed::record::AlertRecord;
use crate::plot;
use crate::query;
use crate::APP_CONF;

#[derive(Deserialize)]
pub(crate) struct SelectParams {
    id: String,
}

#[derive(Deserialize)]
pub(crate) struct VisualizationParams {
    #[serde(rename = "type")]
    kind: String,
    source: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct MonitorState {
    monitoring: bool,
}

#[derive(Serialize)]
pub(crate) struct BurstScheduled {
    scheduled: u32,
}

#[derive(Serialize)]
pub(crate) struct Selected {
    selected: String,
}

#[derive(Serialize)]
pub(crate) struct VisualizationPayload {
    #[serde(rename = "type")]
    kind: plot::PlotKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,

    data: plot::PlotSeries,
}

/// Filter parameters from the dashboard form. `kinds` may repeat (one value
/// per checked box) and each value may itself be a comma-separated list; the
/// bare `filter` marker distinguishes a submit with every box unchecked
/// (empty set, empty table) from a request carrying no filter at all
/// (`None`, every kind shown).
fn parse_filter_query(raw: &str) -> Option<HashSet<String>> {
    let mut kinds = HashSet::new();
    let mut filtered = false;

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match &*key {
            "kinds" => {
                filtered = true;

                kinds.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|kind| !kind.is_empty())
                        .map(str::to_string),
                );
            }
            "filter" => filtered = true,
            _ => {}
        }
    }

    filtered.then_some(kinds)
}

#[handler]
pub(crate) async fn index(tera: Data<&Tera>, request: &Request) -> poem::Result<Html<String>> {
    let checked = parse_filter_query(request.uri().query().unwrap_or(""));

    // Notice acquire lock in a block to release it ASAP (ie. before template renders)
    let render = {
        let store = STORE.read();
        let context =
            IndexContext::build(&store, checked.as_ref(), &INDEX_CONFIG, &INDEX_ENVIRONMENT);

        tera.render(
            "index.tera",
            &tera::Context::from_serialize(context).map_err(InternalServerError)?,
        )
    };

    match render {
        Ok(page) => Ok(Html(page)),
        Err(err) => Err(InternalServerError(err)),
    }
}

#[handler]
pub(crate) async fn status_text() -> &'static str {
    if STORE.read().feed.monitoring() {
        "monitoring"
    } else {
        "paused"
    }
}

#[handler]
pub(crate) async fn alerts() -> poem::Result<Json<Vec<AlertRecord>>> {
    let store = STORE.read();

    if let Some(ref message) = store.error {
        return Err(poem::Error::from_string(
            message.clone(),
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }

    Ok(Json(store.feed.alerts().to_vec()))
}

#[handler]
pub(crate) async fn alerts_recent() -> poem::Result<Json<Vec<AlertRecord>>> {
    let store = STORE.read();

    if let Some(ref message) = store.error {
        return Err(poem::Error::from_string(
            message.clone(),
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }

    let limit = APP_CONF.feed.recent_limit;

    Ok(Json(
        store.feed.alerts().iter().take(limit).cloned().collect(),
    ))
}

#[handler]
pub(crate) async fn alerts_select(Json(params): Json<SelectParams>) -> poem::Result<Json<Selected>> {
    if !STORE.write().feed.select(&params.id) {
        return Err(poem::Error::from_string(
            format!("no alert with id: {}", params.id),
            StatusCode::NOT_FOUND,
        ));
    }

    Ok(Json(Selected {
        selected: params.id,
    }))
}

#[handler]
pub(crate) async fn alerts_simulate() -> impl IntoResponse {
    manager::simulate_burst();

    (
        StatusCode::ACCEPTED,
        Json(BurstScheduled {
            scheduled: APP_CONF.feed.burst_size,
        }),
    )
}

#[handler]
pub(crate) async fn monitor_start() -> Json<MonitorState> {
    manager::start_monitoring();

    Json(MonitorState { monitoring: true })
}

#[handler]
pub(crate) async fn monitor_pause() -> Json<MonitorState> {
    manager::pause_monitoring();

    Json(MonitorState { monitoring: false })
}

#[handler]
pub(crate) async fn query_execute(
    Json(request): Json<query::QueryRequest>,
) -> poem::Result<Json<query::QueryResponse>> {
    tracing::debug!(
        "archive query for {:?} (radius {})",
        request.object_id,
        request.radius
    );

    let mut rng = rand::thread_rng();

    match query::execute(&request, &APP_CONF.query, &mut rng, OffsetDateTime::now_utc()) {
        Ok(response) => Ok(Json(response)),
        Err(err) => Err(poem::Error::from_string(
            err.to_string(),
            StatusCode::UNPROCESSABLE_ENTITY,
        )),
    }
}

#[handler]
pub(crate) async fn visualization(
    Query(params): Query<VisualizationParams>,
) -> poem::Result<Json<VisualizationPayload>> {
    let kind = plot::PlotKind::parse(&params.kind)
        .map_err(|err| poem::Error::from_string(err.to_string(), StatusCode::BAD_REQUEST))?;

    let mut rng = rand::thread_rng();

    Ok(Json(VisualizationPayload {
        kind,
        source: params.source,
        data: plot::generate(kind, &mut rng),
    }))
}
