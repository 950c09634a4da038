// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mock archive query engine.
//!
//! This is the seam where a real data archive would be queried; for now the
//! engine synthesizes a response with the same schema, from an injected
//! random source.

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::config;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub object_id: String,

    #[serde(default)]
    pub radius: f64,

    #[serde(default)]
    pub instruments: Vec<String>,

    #[serde(default)]
    pub bands: Vec<String>,

    #[serde(default)]
    pub validate: bool,
}

#[derive(Serialize, Debug)]
pub struct QueryResponse {
    pub results: Vec<QueryResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
}

#[derive(Serialize, Debug)]
pub struct QueryResult {
    pub instrument: String,
    pub band: String,
    pub date: String,
    pub exposure: String,
    pub url: String,
}

#[derive(Serialize, Debug)]
pub struct ValidationReport {
    pub astrometry: AstrometryValidation,
    pub photometry: PhotometryValidation,
    pub matching: MatchingValidation,
}

#[derive(Serialize, Debug)]
pub struct AstrometryValidation {
    pub status: String,
    pub total_rms: String,
    pub offset: String,
}

#[derive(Serialize, Debug)]
pub struct PhotometryValidation {
    pub status: String,
    pub zp_offset: String,
    pub mag_offset: String,
}

#[derive(Serialize, Debug)]
pub struct MatchingValidation {
    pub status: String,
    pub n_matches: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("an object id or coordinates must be provided")]
    MissingObjectId,

    #[error("no instruments are available to draw from")]
    NoInstruments,

    #[error("no bands are available to draw from")]
    NoBands,
}

/// Run a query against the mock archive.
///
/// The only blocking validation is the required object id; everything else is
/// accepted as-is. Instruments and bands are drawn from the requested lists,
/// falling back on the configured defaults when a list is empty.
pub fn execute(
    request: &QueryRequest,
    defaults: &config::Query,
    rng: &mut impl Rng,
    now: OffsetDateTime,
) -> Result<QueryResponse, Error> {
    if request.object_id.trim().is_empty() {
        return Err(Error::MissingObjectId);
    }

    let instruments = if request.instruments.is_empty() {
        &defaults.instruments
    } else {
        &request.instruments
    };
    let bands = if request.bands.is_empty() {
        &defaults.bands
    } else {
        &request.bands
    };

    // The configured fallback lists may themselves be empty; refuse rather
    // than sample an empty range.
    if instruments.is_empty() {
        return Err(Error::NoInstruments);
    }
    if bands.is_empty() {
        return Err(Error::NoBands);
    }

    let date = now
        .format(&Rfc3339)
        .expect("well-formed timestamp formats as RFC 3339");

    let count = rng.gen_range(1..=defaults.max_results.max(1));
    let results = (0..count)
        .map(|index| QueryResult {
            instrument: instruments[rng.gen_range(0..instruments.len())].clone(),
            band: bands[rng.gen_range(0..bands.len())].clone(),
            date: date.clone(),
            exposure: format!("{:.0} seconds", rng.gen_range(100.0..1100.0)),
            url: format!(
                "https://archive.example.com/data/{}_{}.fits",
                request.object_id, index
            ),
        })
        .collect();

    let validation = request.validate.then(|| ValidationReport {
        astrometry: AstrometryValidation {
            status: "Success".to_string(),
            total_rms: format!("{:.2} arcsec", rng.gen_range(0.1..0.6)),
            offset: format!("{:.2} arcsec", rng.gen_range(0.05..0.35)),
        },
        photometry: PhotometryValidation {
            status: "Success".to_string(),
            zp_offset: format!("{:.2} mag", rng.gen_range(0.01..0.21)),
            mag_offset: format!("{:.2} mag", rng.gen_range(0.01..0.16)),
        },
        matching: MatchingValidation {
            status: "Success".to_string(),
            n_matches: rng.gen_range(10..60),
        },
    });

    Ok(QueryResponse {
        results,
        validation,
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use time::macros::datetime;

    use super::*;

    fn request(object_id: &str) -> QueryRequest {
        QueryRequest {
            object_id: object_id.to_string(),
            radius: 0.5,
            instruments: vec!["ZTF".to_string()],
            bands: vec!["r".to_string()],
            validate: false,
        }
    }

    fn now() -> OffsetDateTime {
        datetime!(2024-03-31 12:00:00 UTC)
    }

    #[test]
    fn missing_object_id_is_a_blocking_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let defaults = config::Query::default();

        let result = execute(&request("  "), &defaults, &mut rng, now());

        assert!(matches!(result, Err(Error::MissingObjectId)));
    }

    #[test]
    fn results_follow_the_requested_lists() {
        let mut rng = StdRng::seed_from_u64(2);
        let defaults = config::Query::default();

        let response = execute(&request("AT2024abc"), &defaults, &mut rng, now()).unwrap();

        assert!(!response.results.is_empty());
        assert!(response.results.len() <= defaults.max_results);

        for (index, result) in response.results.iter().enumerate() {
            assert_eq!(result.instrument, "ZTF");
            assert_eq!(result.band, "r");
            assert_eq!(result.date, "2024-03-31T12:00:00Z");
            assert!(result.exposure.ends_with(" seconds"));
            assert_eq!(
                result.url,
                format!("https://archive.example.com/data/AT2024abc_{}.fits", index)
            );
        }

        assert!(response.validation.is_none());
    }

    #[test]
    fn empty_lists_fall_back_on_defaults() {
        let mut rng = StdRng::seed_from_u64(3);
        let defaults = config::Query::default();

        let mut query = request("AT2024abc");
        query.instruments.clear();
        query.bands.clear();

        let response = execute(&query, &defaults, &mut rng, now()).unwrap();

        for result in &response.results {
            assert!(defaults.instruments.contains(&result.instrument));
            assert!(defaults.bands.contains(&result.band));
        }
    }

    #[test]
    fn empty_catalogs_are_rejected_not_sampled() {
        let mut rng = StdRng::seed_from_u64(5);
        let defaults = config::Query {
            instruments: Vec::new(),
            bands: Vec::new(),
            max_results: 5,
        };

        let mut query = request("AT2024abc");
        query.instruments.clear();
        query.bands.clear();

        let result = execute(&query, &defaults, &mut rng, now());
        assert!(matches!(result, Err(Error::NoInstruments)));

        // A request-side instrument list is not enough when no bands exist.
        query.instruments.push("ZTF".to_string());

        let result = execute(&query, &defaults, &mut rng, now());
        assert!(matches!(result, Err(Error::NoBands)));
    }

    #[test]
    fn validation_report_has_the_fixed_schema() {
        let mut rng = StdRng::seed_from_u64(4);
        let defaults = config::Query::default();

        let mut query = request("AT2024abc");
        query.validate = true;

        let response = execute(&query, &defaults, &mut rng, now()).unwrap();
        let validation = response.validation.expect("validation requested");

        assert_eq!(validation.astrometry.status, "Success");
        assert!(validation.astrometry.total_rms.ends_with(" arcsec"));
        assert!(validation.astrometry.offset.ends_with(" arcsec"));
        assert!(validation.photometry.zp_offset.ends_with(" mag"));
        assert!(validation.photometry.mag_offset.ends_with(" mag"));
        assert!((10..60).contains(&validation.matching.n_matches));
    }

    #[test]
    fn request_accepts_the_wire_field_names() {
        let raw = r#"{
            "objectId": "AT2024abc",
            "radius": 0.5,
            "instruments": ["ZTF"],
            "bands": ["g", "r"],
            "validate": true
        }"#;

        let request: QueryRequest = serde_json::from_str(raw).unwrap();

        assert_eq!(request.object_id, "AT2024abc");
        assert_eq!(request.radius, 0.5);
        assert_eq!(request.bands.len(), 2);
        assert!(request.validate);
    }
}
