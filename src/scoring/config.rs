use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rating-dimension configuration.
///
/// Defines the dimension set, the rating scale, how missing values default,
/// and which dimensions feed each composite score. Two incompatible dimension
/// sets have shipped over the life of this tool (a 0-5 scale with four value
/// and four feasibility dimensions, and a 1-10 scale with three and four), so
/// none of this is hardcoded.
///
/// Example YAML:
/// ```yaml
/// dimensions:
///   scale: { min: 0, max: 5 }
///   default_policy: zero
///   value: [economicImpact, hsec, esg, productivity]
///   feasibility: [dataReadiness, technicalComplexity, aiComplexity, organisationalCapability]
///   inverted: [technicalComplexity, aiComplexity]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DimensionConfig {
    /// Rating scale bounds (default: 0-5)
    #[serde(default)]
    pub scale: Scale,

    /// How a missing rating is treated: `zero` or `midpoint`
    #[serde(default)]
    pub default_policy: DefaultPolicy,

    /// Dimensions averaged into the business-value score
    pub value: Vec<String>,

    /// Dimensions averaged into the feasibility score
    pub feasibility: Vec<String>,

    /// Feasibility dimensions where higher ratings mean *lower* feasibility
    /// (complexity-type dimensions); reversed against the scale max before
    /// averaging
    #[serde(default)]
    pub inverted: Vec<String>,

    /// Quadrant threshold override; defaults to the scale midpoint
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Display labels keyed by dimension name; unlisted dimensions fall back
    /// to their raw name
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl Default for DimensionConfig {
    fn default() -> Self {
        let labels = [
            ("economicImpact", "Economic Impact"),
            ("hsec", "HSEC"),
            ("esg", "ESG"),
            ("productivity", "Productivity"),
            ("dataReadiness", "Data Readiness"),
            ("technicalComplexity", "Technical Complexity"),
            ("aiComplexity", "AI Complexity"),
            ("organisationalCapability", "Organisational Capability"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            scale: Scale::default(),
            default_policy: DefaultPolicy::Zero,
            value: vec![
                "economicImpact".to_string(),
                "hsec".to_string(),
                "esg".to_string(),
                "productivity".to_string(),
            ],
            feasibility: vec![
                "dataReadiness".to_string(),
                "technicalComplexity".to_string(),
                "aiComplexity".to_string(),
                "organisationalCapability".to_string(),
            ],
            inverted: vec![
                "technicalComplexity".to_string(),
                "aiComplexity".to_string(),
            ],
            threshold: None,
            labels,
        }
    }
}

impl DimensionConfig {
    /// Effective quadrant threshold: explicit override, or the scale midpoint.
    pub fn threshold(&self) -> f64 {
        self.threshold
            .unwrap_or((self.scale.min + self.scale.max) / 2.0)
    }

    /// Value substituted for a missing rating, before clamping.
    pub fn default_rating(&self) -> f64 {
        match self.default_policy {
            DefaultPolicy::Zero => 0.0,
            DefaultPolicy::Midpoint => (self.scale.min + self.scale.max) / 2.0,
        }
    }

    /// Display label for a dimension, falling back to the raw name.
    pub fn label_for<'a>(&'a self, name: &'a str) -> &'a str {
        self.labels.get(name).map(String::as_str).unwrap_or(name)
    }

    /// All dimensions in form order: value group first, then feasibility.
    pub fn all_dimensions(&self) -> impl Iterator<Item = &String> {
        self.value.iter().chain(self.feasibility.iter())
    }
}

/// Inclusive rating scale bounds.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self { min: 0.0, max: 5.0 }
    }
}

/// Convention for missing ratings. Both exist in the field: the 0-5 variant
/// treats an untouched slider as 0, the 1-10 variant as the scale midpoint.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DefaultPolicy {
    #[default]
    Zero,
    Midpoint,
}
