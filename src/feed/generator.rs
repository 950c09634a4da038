// SPDX-License-Identifier: MPL-2.0
//
// Stjärnvakt
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use rand::Rng;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use super::record::{AlertRecord, Significance, GENERATED_KINDS};

const ID_SUFFIX_RANGE: u32 = 26;

/// Produce one simulated alert from the given random source and clock value.
///
/// Both inputs are injected so that callers under test can pin outcomes with a
/// seeded RNG and a fixed timestamp. The id token is drawn independently from
/// the `kind` field, so the two may disagree; the upstream feed simulator
/// behaves the same way and consumers must not rely on the prefix.
pub fn generate_random(rng: &mut impl Rng, now: OffsetDateTime) -> AlertRecord {
    let id_token = GENERATED_KINDS[rng.gen_range(0..GENERATED_KINDS.len())];
    let suffix = char::from(b'A' + rng.gen_range(0..ID_SUFFIX_RANGE) as u8);

    // TODO: randomize the declination sign; every simulated alert currently
    //   lands in the northern sky.
    let ra = format!(
        "{:02}h{:02}m{:02}s",
        rng.gen_range(0..24),
        rng.gen_range(0..60),
        rng.gen_range(0..60)
    );
    let dec = format!(
        "{}d{:02}m{:02}s",
        rng.gen_range(0..90),
        rng.gen_range(0..60),
        rng.gen_range(0..60)
    );

    AlertRecord {
        id: format!("{}{}{}", id_token, format_compact_date(now), suffix),
        kind: GENERATED_KINDS[rng.gen_range(0..GENERATED_KINDS.len())].to_string(),
        time: format_time(now),
        ra,
        dec,
        significance: Significance::ALL[rng.gen_range(0..Significance::ALL.len())],
        details: "Simulated alert for testing purposes".to_string(),
    }
}

/// The two fixed records every fresh session starts from when no seed file is
/// configured.
pub fn seed_alerts(now: OffsetDateTime) -> Vec<AlertRecord> {
    vec![
        AlertRecord {
            id: "GRB240331A".to_string(),
            kind: "GRB".to_string(),
            time: format_time(now),
            ra: "08h02m25.44s".to_string(),
            dec: "+40d51m25.5s".to_string(),
            significance: Significance::High,
            details: "Gamma-ray burst detected by Fermi GBM".to_string(),
        },
        AlertRecord {
            id: "GW240330B".to_string(),
            kind: "GW".to_string(),
            time: format_time(now - Duration::hours(1)),
            ra: "12h30m45.67s".to_string(),
            dec: "-05d12m34.5s".to_string(),
            significance: Significance::Medium,
            details: "Gravitational wave candidate from LIGO/Virgo".to_string(),
        },
    ]
}

fn format_time(instant: OffsetDateTime) -> String {
    instant
        .format(&Rfc3339)
        .expect("well-formed timestamp formats as RFC 3339")
}

fn format_compact_date(instant: OffsetDateTime) -> String {
    instant
        .format(format_description!("[year][month][day]"))
        .expect("well-formed timestamp formats as a compact date")
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn generated_alerts_stay_within_fixed_sets() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = datetime!(2024-03-31 12:00:00 UTC);
        let id_pattern = Regex::new(r"^[A-Za-z]+[0-9]{8}[A-Z]$").unwrap();

        for _ in 0..1000 {
            let record = generate_random(&mut rng, now);

            assert!(GENERATED_KINDS.contains(&record.kind.as_str()));
            assert!(Significance::ALL.contains(&record.significance));
            assert!(id_pattern.is_match(&record.id), "bad id: {}", record.id);
            assert!(record.id.contains("20240331"));
        }
    }

    #[test]
    fn generated_coordinates_match_sexagesimal_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = datetime!(2024-03-31 12:00:00 UTC);
        let ra_pattern = Regex::new(r"^([01][0-9]|2[0-3])h[0-5][0-9]m[0-5][0-9]s$").unwrap();
        let dec_pattern = Regex::new(r"^([0-9]|[1-8][0-9])d[0-5][0-9]m[0-5][0-9]s$").unwrap();

        for _ in 0..1000 {
            let record = generate_random(&mut rng, now);

            assert!(ra_pattern.is_match(&record.ra), "bad ra: {}", record.ra);
            assert!(dec_pattern.is_match(&record.dec), "bad dec: {}", record.dec);

            // Declination never carries a sign (see the TODO in the generator).
            assert!(!record.dec.starts_with('+'));
            assert!(!record.dec.starts_with('-'));
        }
    }

    #[test]
    fn generated_time_is_rfc3339() {
        let mut rng = StdRng::seed_from_u64(3);
        let now = datetime!(2024-03-31 08:30:00 UTC);

        let record = generate_random(&mut rng, now);

        assert_eq!(record.time, "2024-03-31T08:30:00Z");
    }

    #[test]
    fn seed_contains_the_two_fixed_records() {
        let now = datetime!(2024-03-31 12:00:00 UTC);
        let seed = seed_alerts(now);

        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].id, "GRB240331A");
        assert_eq!(seed[0].kind, "GRB");
        assert_eq!(seed[0].significance, Significance::High);
        assert_eq!(seed[1].id, "GW240330B");
        assert_eq!(seed[1].time, "2024-03-31T11:00:00Z");
    }
}
