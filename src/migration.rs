//! Schema-drift adapter for imported use-case records.
//!
//! Field names have changed several times over the life of this tool. Import
//! accepts records written under any prior naming convention, folds retired
//! fields into their successors, and produces fully-populated current-schema
//! records. The only hard requirement is a non-empty title; everything else
//! defaults.

use crate::scoring::{self, DimensionConfig};
use crate::usecase::UseCase;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field renames across schema versions: (old name, current name).
/// Applied only when the current field is absent or blank.
const RENAMES: &[(&str, &str)] = &[
    ("useCaseTitle", "title"),
    ("valueChain", "businessProcess"),
    ("problemStatement", "painPoints"),
    ("rootCause", "opportunities"),
    ("regulatory", "piiConsiderations"),
    ("potentialSolution", "aiImpact"),
    ("timestamp", "createdAt"),
];

/// Retired fields folded into `additionalInformation`, with their prefixes.
const FOLDED: &[(&str, &str)] = &[("estimatedCost", "Cost"), ("timeToComplete", "Time")];

/// Result of a batch import: the accepted records plus how many were dropped.
#[derive(Debug)]
pub struct ImportOutcome {
    pub use_cases: Vec<UseCase>,
    pub skipped: usize,
}

/// Migrate a single record from any prior schema version.
///
/// Returns `None` only when no usable title survives migration. Derived
/// scores are recomputed from the migrated ratings so imported records can
/// never carry stale values.
pub fn migrate_record(
    record: &Map<String, Value>,
    config: &DimensionConfig,
    now: DateTime<Utc>,
) -> Option<UseCase> {
    let mut fields = record.clone();

    for (old, new) in RENAMES {
        if !non_blank(fields.get(*new)) && non_blank(fields.get(*old)) {
            let value = fields
                .get(*old)
                .cloned()
                .unwrap_or(Value::Null);
            fields.insert((*new).to_string(), value);
        }
    }

    fold_retired_fields(&mut fields);

    let title = text(&fields, "title")?;

    let ratings = collect_ratings(&fields, config);
    let summary = scoring::score(&ratings, config);

    let created_at = timestamp(&fields, "createdAt").unwrap_or(now);
    let last_modified = timestamp(&fields, "lastModified").unwrap_or(now);

    Some(UseCase {
        id: record_id(&fields),
        title,
        business_process: text(&fields, "businessProcess").unwrap_or_default(),
        pain_points: text(&fields, "painPoints").unwrap_or_default(),
        opportunities: text(&fields, "opportunities").unwrap_or_default(),
        pii_considerations: text(&fields, "piiConsiderations").unwrap_or_default(),
        data_availability: text(&fields, "dataAvailability").unwrap_or_default(),
        ai_impact: text(&fields, "aiImpact").unwrap_or_default(),
        additional_information: text(&fields, "additionalInformation").unwrap_or_default(),
        ratings,
        business_value: summary.business_value,
        feasibility: summary.feasibility,
        quadrant: summary.quadrant,
        created_at,
        last_modified,
    })
}

/// Migrate a whole import file.
///
/// Accepts a bare JSON array or an object with a `useCases` array. Invalid
/// individual records are skipped; an import in which nothing survives is an
/// error so the caller leaves existing data untouched.
pub fn import_collection(
    data: &str,
    config: &DimensionConfig,
    now: DateTime<Utc>,
) -> Result<ImportOutcome> {
    let parsed: Value = serde_json::from_str(data).context("Import file is not valid JSON")?;

    let records = match &parsed {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("useCases") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => bail!(
                "Import file must be a JSON array of use cases or an object with a `useCases` array"
            ),
        },
        _ => bail!(
            "Import file must be a JSON array of use cases or an object with a `useCases` array"
        ),
    };

    let mut use_cases = Vec::new();
    let mut skipped = 0;
    for record in records {
        match record.as_object().and_then(|m| migrate_record(m, config, now)) {
            Some(uc) => use_cases.push(uc),
            None => skipped += 1,
        }
    }

    if use_cases.is_empty() {
        bail!("No valid use cases found in file");
    }

    Ok(ImportOutcome { use_cases, skipped })
}

/// Fold `estimatedCost` / `timeToComplete` into `additionalInformation`,
/// comma-joined with each other and newline-separated from pre-existing
/// content.
fn fold_retired_fields(fields: &mut Map<String, Value>) {
    let parts: Vec<String> = FOLDED
        .iter()
        .filter_map(|(field, prefix)| {
            text(fields, field).map(|v| format!("{}: {}", prefix, v))
        })
        .collect();

    if parts.is_empty() {
        return;
    }

    let merged = parts.join(", ");
    let combined = match text(fields, "additionalInformation") {
        Some(existing) => format!("{}\n\n{}", existing, merged),
        None => merged,
    };
    fields.insert(
        "additionalInformation".to_string(),
        Value::String(combined),
    );
}

/// True when the field holds something worth migrating over.
fn non_blank(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

/// Read a field as trimmed text; numbers are rendered, blanks are `None`.
fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn timestamp(fields: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    fields.get(key)?.as_str()?.parse().ok()
}

/// Preserve an existing id (numbers from old exports become strings);
/// otherwise mint a fresh one.
fn record_id(fields: &Map<String, Value>) -> String {
    match fields.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => UseCase::new_id(),
    }
}

/// Collect ratings: a current-schema `ratings` map wins (unknown dimensions
/// carried through); legacy records keep them as loose top-level fields,
/// often as strings.
fn collect_ratings(fields: &Map<String, Value>, config: &DimensionConfig) -> BTreeMap<String, i64> {
    let mut ratings = BTreeMap::new();

    if let Some(Value::Object(map)) = fields.get("ratings") {
        for (name, value) in map {
            if let Some(n) = coerce_rating(value) {
                ratings.insert(name.clone(), n);
            }
        }
        return ratings;
    }

    for name in config.all_dimensions() {
        if let Some(value) = fields.get(name) {
            if let Some(n) = coerce_rating(value) {
                ratings.insert(name.clone(), n);
            }
        }
    }
    ratings
}

/// Coerce a rating to an integer; non-numeric input is treated as absent.
fn coerce_rating(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.round() as i64))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::Quadrant;
    use serde_json::json;

    fn config() -> DimensionConfig {
        DimensionConfig::default()
    }

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_legacy_record_migrates_renamed_fields() {
        let record = as_map(json!({
            "useCaseTitle": "Invoice triage",
            "valueChain": "Accounts payable",
            "problemStatement": "Manual data entry",
            "rootCause": "Automate extraction",
            "regulatory": "Supplier bank details",
            "potentialSolution": "Document AI",
            "economicImpact": "5",
            "hsec": "3",
            "esg": "4",
            "productivity": "2"
        }));
        let uc = migrate_record(&record, &config(), Utc::now()).unwrap();

        assert_eq!(uc.title, "Invoice triage");
        assert_eq!(uc.business_process, "Accounts payable");
        assert_eq!(uc.pain_points, "Manual data entry");
        assert_eq!(uc.opportunities, "Automate extraction");
        assert_eq!(uc.pii_considerations, "Supplier bank details");
        assert_eq!(uc.ai_impact, "Document AI");
        // Legacy slider values are strings; they coerce to integers.
        assert_eq!(uc.ratings["economicImpact"], 5);
        assert_eq!(uc.business_value, 3.5);
    }

    #[test]
    fn test_rename_does_not_clobber_populated_field() {
        let record = as_map(json!({
            "title": "Current title",
            "useCaseTitle": "Old title"
        }));
        let uc = migrate_record(&record, &config(), Utc::now()).unwrap();
        assert_eq!(uc.title, "Current title");
    }

    #[test]
    fn test_cost_and_time_fold_into_additional_information() {
        let record = as_map(json!({
            "title": "Forecasting",
            "estimatedCost": "$50k",
            "timeToComplete": "3 months"
        }));
        let uc = migrate_record(&record, &config(), Utc::now()).unwrap();
        assert_eq!(uc.additional_information, "Cost: $50k, Time: 3 months");
    }

    #[test]
    fn test_fold_appends_to_existing_content() {
        let record = as_map(json!({
            "title": "Forecasting",
            "additionalInformation": "Pilot planned for Q3",
            "estimatedCost": "$50k"
        }));
        let uc = migrate_record(&record, &config(), Utc::now()).unwrap();
        assert_eq!(
            uc.additional_information,
            "Pilot planned for Q3\n\nCost: $50k"
        );
    }

    #[test]
    fn test_missing_title_rejects_record() {
        let record = as_map(json!({ "businessProcess": "Logistics" }));
        assert!(migrate_record(&record, &config(), Utc::now()).is_none());

        let record = as_map(json!({ "title": "   " }));
        assert!(migrate_record(&record, &config(), Utc::now()).is_none());
    }

    #[test]
    fn test_migration_is_idempotent_on_current_schema() {
        let record = as_map(json!({
            "id": "abc-123",
            "title": "Invoice triage",
            "businessProcess": "Accounts payable",
            "painPoints": "Manual entry",
            "opportunities": "Automate",
            "piiConsiderations": "Bank details",
            "dataAvailability": "ERP extracts",
            "aiImpact": "High",
            "additionalInformation": "",
            "ratings": { "economicImpact": 5, "hsec": 3, "esg": 4, "productivity": 2 },
            "createdAt": "2025-02-01T10:00:00Z",
            "lastModified": "2025-03-01T10:00:00Z"
        }));
        let now = Utc::now();
        let first = migrate_record(&record, &config(), now).unwrap();
        let reserialized = as_map(serde_json::to_value(&first).unwrap());
        let second = migrate_record(&reserialized, &config(), now).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.id, "abc-123");
        assert_eq!(
            first.created_at,
            "2025-02-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn test_numeric_id_preserved_as_string() {
        let record = as_map(json!({ "title": "Old export", "id": 1714000000000u64 }));
        let uc = migrate_record(&record, &config(), Utc::now()).unwrap();
        assert_eq!(uc.id, "1714000000000");
    }

    #[test]
    fn test_missing_id_is_minted() {
        let record = as_map(json!({ "title": "Fresh" }));
        let uc = migrate_record(&record, &config(), Utc::now()).unwrap();
        assert!(!uc.id.is_empty());
    }

    #[test]
    fn test_legacy_timestamp_becomes_created_at() {
        let record = as_map(json!({
            "title": "Old export",
            "timestamp": "2024-06-01T09:30:00Z"
        }));
        let uc = migrate_record(&record, &config(), Utc::now()).unwrap();
        assert_eq!(
            uc.created_at,
            "2024-06-01T09:30:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn test_derived_scores_recomputed_not_trusted() {
        let record = as_map(json!({
            "title": "Stale scores",
            "businessValue": 4.9,
            "feasibility": 4.9,
            "quadrant": "Quick Wins"
        }));
        let uc = migrate_record(&record, &config(), Utc::now()).unwrap();
        // No ratings: derived fields come from the engine defaults.
        assert_eq!(uc.business_value, 0.0);
        assert_eq!(uc.quadrant, Quadrant::IncrementalImprovements);
    }

    #[test]
    fn test_unknown_rating_dimensions_carried_through() {
        let record = as_map(json!({
            "title": "Extra dims",
            "ratings": { "economicImpact": 3, "customerDelight": 4 }
        }));
        let uc = migrate_record(&record, &config(), Utc::now()).unwrap();
        assert_eq!(uc.ratings["customerDelight"], 4);
    }

    #[test]
    fn test_non_numeric_rating_treated_as_absent() {
        let record = as_map(json!({
            "title": "Messy",
            "ratings": { "economicImpact": "high", "hsec": "4" }
        }));
        let uc = migrate_record(&record, &config(), Utc::now()).unwrap();
        assert!(!uc.ratings.contains_key("economicImpact"));
        assert_eq!(uc.ratings["hsec"], 4);
    }

    #[test]
    fn test_import_bare_array() {
        let data = r#"[{"title": "One"}, {"title": "Two"}]"#;
        let outcome = import_collection(data, &config(), Utc::now()).unwrap();
        assert_eq!(outcome.use_cases.len(), 2);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_import_wrapped_object() {
        let data = r#"{"useCases": [{"title": "One"}]}"#;
        let outcome = import_collection(data, &config(), Utc::now()).unwrap();
        assert_eq!(outcome.use_cases.len(), 1);
    }

    #[test]
    fn test_import_rejects_wrong_shape() {
        let err = import_collection(r#"{"cases": []}"#, &config(), Utc::now()).unwrap_err();
        assert!(err.to_string().contains("useCases"));

        assert!(import_collection("42", &config(), Utc::now()).is_err());
        assert!(import_collection("not json", &config(), Utc::now()).is_err());
    }

    #[test]
    fn test_import_skips_invalid_records() {
        let data = r#"[{"title": "Kept"}, {"businessProcess": "No title"}, 7]"#;
        let outcome = import_collection(data, &config(), Utc::now()).unwrap();
        assert_eq!(outcome.use_cases.len(), 1);
        assert_eq!(outcome.skipped, 2);
    }

    #[test]
    fn test_export_import_round_trip() {
        let config = config();
        let now = Utc::now();
        let data = r#"[
            {"title": "Invoice triage",
             "businessProcess": "Accounts payable",
             "ratings": {"economicImpact": 5, "hsec": 3, "esg": 4, "productivity": 2}},
            {"title": "Forecasting",
             "ratings": {"economicImpact": 1, "dataReadiness": 5}}
        ]"#;
        let original = import_collection(data, &config, now).unwrap().use_cases;

        let json = crate::export::generate_json(&original).unwrap();
        let reimported = import_collection(&json, &config, now).unwrap().use_cases;

        assert_eq!(original, reimported);
        assert_eq!(reimported[0].business_value, 3.5);
        assert_eq!(reimported[0].quadrant, original[0].quadrant);
    }

    #[test]
    fn test_import_fails_when_nothing_survives() {
        let data = r#"[{"businessProcess": "No title"}]"#;
        let err = import_collection(data, &config(), Utc::now()).unwrap_err();
        assert!(err.to_string().contains("No valid use cases"));

        assert!(import_collection("[]", &config(), Utc::now()).is_err());
    }
}
