use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the four priority buckets a use case lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Quadrant {
    #[serde(rename = "Quick Wins")]
    QuickWins,
    #[serde(rename = "Strategic Initiatives")]
    StrategicInitiatives,
    #[serde(rename = "Incremental Improvements")]
    IncrementalImprovements,
    #[serde(rename = "Deprioritize")]
    #[default]
    Deprioritize,
}

impl Quadrant {
    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::QuickWins => "Quick Wins",
            Quadrant::StrategicInitiatives => "Strategic Initiatives",
            Quadrant::IncrementalImprovements => "Incremental Improvements",
            Quadrant::Deprioritize => "Deprioritize",
        }
    }

    /// All quadrants in report order (highest priority first).
    pub fn all() -> [Quadrant; 4] {
        [
            Quadrant::QuickWins,
            Quadrant::StrategicInitiatives,
            Quadrant::IncrementalImprovements,
            Quadrant::Deprioritize,
        ]
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A candidate automation/AI opportunity.
///
/// Serialized as camelCase JSON so files written by earlier versions of the
/// tool import cleanly. `business_value`, `feasibility` and `quadrant` are
/// derived from `ratings` and are recomputed on every save; they are never
/// edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCase {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub business_process: String,
    #[serde(default)]
    pub pain_points: String,
    #[serde(default)]
    pub opportunities: String,
    #[serde(default)]
    pub pii_considerations: String,
    #[serde(default)]
    pub data_availability: String,
    #[serde(default)]
    pub ai_impact: String,
    #[serde(default)]
    pub additional_information: String,
    /// Dimension name -> raw integer rating on the configured scale.
    #[serde(default)]
    pub ratings: BTreeMap<String, i64>,
    #[serde(default)]
    pub business_value: f64,
    #[serde(default)]
    pub feasibility: f64,
    #[serde(default)]
    pub quadrant: Quadrant,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl UseCase {
    /// Generate a fresh opaque id for a new record.
    pub fn new_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_labels() {
        assert_eq!(Quadrant::QuickWins.to_string(), "Quick Wins");
        assert_eq!(Quadrant::Deprioritize.to_string(), "Deprioritize");
    }

    #[test]
    fn test_quadrant_serde_uses_display_labels() {
        let json = serde_json::to_string(&Quadrant::StrategicInitiatives).unwrap();
        assert_eq!(json, "\"Strategic Initiatives\"");

        let parsed: Quadrant = serde_json::from_str("\"Incremental Improvements\"").unwrap();
        assert_eq!(parsed, Quadrant::IncrementalImprovements);
    }

    #[test]
    fn test_quadrant_default_is_deprioritize() {
        assert_eq!(Quadrant::default(), Quadrant::Deprioritize);
    }

    #[test]
    fn test_use_case_serializes_camel_case() {
        let uc = UseCase {
            id: "1".to_string(),
            title: "Invoice triage".to_string(),
            business_process: "Accounts payable".to_string(),
            pain_points: String::new(),
            opportunities: String::new(),
            pii_considerations: String::new(),
            data_availability: String::new(),
            ai_impact: String::new(),
            additional_information: String::new(),
            ratings: BTreeMap::new(),
            business_value: 3.5,
            feasibility: 2.0,
            quadrant: Quadrant::StrategicInitiatives,
            created_at: Utc::now(),
            last_modified: Utc::now(),
        };

        let json = serde_json::to_value(&uc).unwrap();
        assert_eq!(json["businessProcess"], "Accounts payable");
        assert_eq!(json["businessValue"], 3.5);
        assert_eq!(json["quadrant"], "Strategic Initiatives");
        assert!(json.get("business_process").is_none());
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(UseCase::new_id(), UseCase::new_id());
    }
}
