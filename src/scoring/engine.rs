use super::config::DimensionConfig;
use crate::usecase::Quadrant;
use std::collections::BTreeMap;

/// Composite scores plus the quadrant they land in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub business_value: f64,
    pub feasibility: f64,
    pub quadrant: Quadrant,
}

/// Score a set of ratings against the configured dimensions.
///
/// Pure and total: missing ratings take the configured default, out-of-range
/// ratings are clamped to the scale bounds, and inverted (complexity-type)
/// dimensions are reversed against the scale max before averaging. Both
/// composites are rounded to one decimal place.
pub fn score(ratings: &BTreeMap<String, i64>, config: &DimensionConfig) -> ScoreSummary {
    let business_value = round_one_decimal(group_mean(ratings, &config.value, config, false));
    let feasibility = round_one_decimal(group_mean(ratings, &config.feasibility, config, true));
    let quadrant = classify(business_value, feasibility, config.threshold());

    ScoreSummary {
        business_value,
        feasibility,
        quadrant,
    }
}

/// Classify a (business value, feasibility) pair against a threshold.
///
/// Ties go to the `>=` branch: a use case sitting exactly on the threshold in
/// both axes is a Quick Win.
pub fn classify(business_value: f64, feasibility: f64, threshold: f64) -> Quadrant {
    if business_value >= threshold && feasibility >= threshold {
        Quadrant::QuickWins
    } else if business_value >= threshold {
        Quadrant::StrategicInitiatives
    } else if feasibility >= threshold {
        Quadrant::IncrementalImprovements
    } else {
        Quadrant::Deprioritize
    }
}

fn group_mean(
    ratings: &BTreeMap<String, i64>,
    group: &[String],
    config: &DimensionConfig,
    apply_inversion: bool,
) -> f64 {
    if group.is_empty() {
        // Misconfiguration is caught by validation; the engine itself never fails.
        return config.scale.min;
    }

    let sum: f64 = group
        .iter()
        .map(|name| {
            let raw = rating_value(ratings, name, config);
            if apply_inversion && config.inverted.iter().any(|d| d == name) {
                config.scale.max - raw
            } else {
                raw
            }
        })
        .sum();

    sum / group.len() as f64
}

/// Resolve one dimension's rating: default if absent, then clamp to scale.
fn rating_value(ratings: &BTreeMap<String, i64>, name: &str, config: &DimensionConfig) -> f64 {
    let raw = ratings
        .get(name)
        .map(|v| *v as f64)
        .unwrap_or_else(|| config.default_rating());
    raw.max(config.scale.min).min(config.scale.max)
}

fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
