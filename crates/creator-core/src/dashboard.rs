use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const DEFAULT_SERIES_DAYS: usize = 30;
pub const MAX_SERIES_DAYS: usize = 366;
pub const MIN_DAILY_VIEWS: u32 = 3_000;
pub const MAX_DAILY_VIEWS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_views: u64,
    pub subscribers: u64,
    pub revenue: u64,
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsPoint {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub views: u32,
}

pub fn default_series_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 1).unwrap_or_default()
}

pub fn overview() -> Overview {
    Overview {
        total_views: 100_000,
        subscribers: 5_000,
        revenue: 20_000,
        engagement_rate: 7.5,
    }
}

pub fn revenue_breakdown() -> Vec<RevenueEntry> {
    [
        ("Videos", 4_200),
        ("Shorts", 1_800),
        ("Live Streams", 3_100),
        ("Memberships", 2_400),
        ("Sponsorships", 5_200),
    ]
    .into_iter()
    .map(|(kind, revenue)| RevenueEntry {
        kind: kind.to_string(),
        revenue,
    })
    .collect()
}

pub fn views_series<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    days: usize,
) -> Result<Vec<ViewsPoint>, CoreError> {
    if days == 0 || days > MAX_SERIES_DAYS {
        return Err(CoreError::InvalidSeriesLength {
            requested: days,
            max: MAX_SERIES_DAYS,
        });
    }

    let mut out = Vec::with_capacity(days);
    for offset in 0..days as u64 {
        let date = start
            .checked_add_days(Days::new(offset))
            .ok_or(CoreError::SeriesDateOutOfRange)?;
        out.push(ViewsPoint {
            date,
            views: rng.gen_range(MIN_DAILY_VIEWS..=MAX_DAILY_VIEWS),
        });
    }
    Ok(out)
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn overview_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(overview()).expect("serialize");
        assert_eq!(json["totalViews"], 100_000);
        assert_eq!(json["subscribers"], 5_000);
        assert_eq!(json["revenue"], 20_000);
        assert_eq!(json["engagementRate"], 7.5);
    }

    #[test]
    fn revenue_breakdown_uses_type_key() {
        let items = revenue_breakdown();
        assert_eq!(items.len(), 5);
        let json = serde_json::to_value(&items).expect("serialize");
        assert_eq!(json[0]["type"], "Videos");
        assert_eq!(json[4]["revenue"], 5_200);
    }

    #[test]
    fn views_series_has_consecutive_real_dates() {
        let mut rng = StdRng::seed_from_u64(7);
        let series =
            views_series(&mut rng, default_series_start(), DEFAULT_SERIES_DAYS).expect("series");
        assert_eq!(series.len(), 30);
        assert_eq!(series[0].date.to_string(), "2026-02-01");
        assert_eq!(series[27].date.to_string(), "2026-02-28");
        assert_eq!(series[28].date.to_string(), "2026-03-01");
        assert!(series
            .iter()
            .all(|point| (MIN_DAILY_VIEWS..=MAX_DAILY_VIEWS).contains(&point.views)));
    }

    #[test]
    fn views_series_is_reproducible_with_seed() {
        let a = views_series(&mut StdRng::seed_from_u64(42), default_series_start(), 10)
            .expect("series");
        let b = views_series(&mut StdRng::seed_from_u64(42), default_series_start(), 10)
            .expect("series");
        assert_eq!(a, b);
    }

    #[test]
    fn views_series_rejects_bad_lengths() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            views_series(&mut rng, default_series_start(), 0),
            Err(CoreError::InvalidSeriesLength {
                requested: 0,
                max: MAX_SERIES_DAYS
            })
        );
        assert!(views_series(&mut rng, default_series_start(), MAX_SERIES_DAYS + 1).is_err());
    }

    #[test]
    fn views_point_round_trips_date_format() {
        let json = r#"{"date":"2026-02-03","views":4000}"#;
        let point: ViewsPoint = serde_json::from_str(json).expect("parse");
        assert_eq!(point.views, 4000);
        assert_eq!(serde_json::to_string(&point).expect("serialize"), json);
    }
}
