// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mock visualization series, one generator per plot kind.
//!
//! Shapes match what the plotting front-end consumes; a real pipeline would
//! be substituted behind `generate` without changing them.

use rand::Rng;
use serde::{Deserialize, Serialize};

const LIGHT_CURVE_POINTS: usize = 20;
const FINDING_CHART_SOURCES: usize = 50;
const COLOR_MAGNITUDE_STARS: usize = 100;
const COLOR_MAGNITUDE_OUTLIERS: usize = 5;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum PlotKind {
    LightCurve,
    FindingChart,
    ColorMagnitude,
}

impl PlotKind {
    pub fn parse(raw: &str) -> Result<Self, Error> {
        match raw {
            "light-curve" => Ok(PlotKind::LightCurve),
            "finding-chart" => Ok(PlotKind::FindingChart),
            "color-magnitude" => Ok(PlotKind::ColorMagnitude),
            _ => Err(Error::UnknownKind(raw.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown plot type: {0}")]
    UnknownKind(String),
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum PlotSeries {
    LightCurve(LightCurveSeries),
    FindingChart(FindingChartSeries),
    ColorMagnitude(ColorMagnitudeSeries),
}

/// 20 points over 10 days, magnitudes on a noisy sinusoid.
#[derive(Serialize, Debug)]
pub struct LightCurveSeries {
    pub times: Vec<f64>,
    pub magnitudes: Vec<f64>,
    pub errors: Vec<f64>,
}

/// Field sources scattered around the pointing, with one bright transient
/// pinned at the center (appended last).
#[derive(Serialize, Debug)]
pub struct FindingChartSeries {
    pub ra: Vec<f64>,
    pub dec: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

/// A synthetic main sequence plus a handful of outliers.
#[derive(Serialize, Debug)]
pub struct ColorMagnitudeSeries {
    pub colors: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

pub fn generate(kind: PlotKind, rng: &mut impl Rng) -> PlotSeries {
    match kind {
        PlotKind::LightCurve => PlotSeries::LightCurve(generate_light_curve(rng)),
        PlotKind::FindingChart => PlotSeries::FindingChart(generate_finding_chart(rng)),
        PlotKind::ColorMagnitude => PlotSeries::ColorMagnitude(generate_color_magnitude(rng)),
    }
}

fn generate_light_curve(rng: &mut impl Rng) -> LightCurveSeries {
    let mut series = LightCurveSeries {
        times: Vec::with_capacity(LIGHT_CURVE_POINTS),
        magnitudes: Vec::with_capacity(LIGHT_CURVE_POINTS),
        errors: Vec::with_capacity(LIGHT_CURVE_POINTS),
    };

    for index in 0..LIGHT_CURVE_POINTS {
        series.times.push(index as f64 * 0.5);
        series
            .magnitudes
            .push(16.0 + (index as f64 / 3.0).sin() * 2.0 + rng.gen_range(0.0..0.3));
        series.errors.push(0.1 + rng.gen_range(0.0..0.1));
    }

    series
}

fn generate_finding_chart(rng: &mut impl Rng) -> FindingChartSeries {
    let mut series = FindingChartSeries {
        ra: Vec::with_capacity(FINDING_CHART_SOURCES + 1),
        dec: Vec::with_capacity(FINDING_CHART_SOURCES + 1),
        magnitudes: Vec::with_capacity(FINDING_CHART_SOURCES + 1),
    };

    for _ in 0..FINDING_CHART_SOURCES {
        series.ra.push(120.0 + rng.gen_range(-5.0..5.0));
        series.dec.push(40.0 + rng.gen_range(-5.0..5.0));
        series.magnitudes.push(15.0 + rng.gen_range(0.0..5.0));
    }

    // The transient itself, bright and centered.
    series.ra.push(120.0);
    series.dec.push(40.0);
    series.magnitudes.push(12.0);

    series
}

fn generate_color_magnitude(rng: &mut impl Rng) -> ColorMagnitudeSeries {
    let mut series = ColorMagnitudeSeries {
        colors: Vec::with_capacity(COLOR_MAGNITUDE_STARS + COLOR_MAGNITUDE_OUTLIERS),
        magnitudes: Vec::with_capacity(COLOR_MAGNITUDE_STARS + COLOR_MAGNITUDE_OUTLIERS),
    };

    for _ in 0..COLOR_MAGNITUDE_STARS {
        let color = 0.5 + rng.gen_range(0.0..2.0);

        series.colors.push(color);
        series
            .magnitudes
            .push(10.0 + color * 2.0 + rng.gen_range(-0.5..0.5));
    }

    for _ in 0..COLOR_MAGNITUDE_OUTLIERS {
        series.colors.push(1.0 + rng.gen_range(0.0..1.0));
        series.magnitudes.push(12.0 + rng.gen_range(0.0..3.0));
    }

    series
}
