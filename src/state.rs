use crate::scoring::{self, DimensionConfig};
use crate::usecase::UseCase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-progress form contents. Also the shape of the autosave snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default)]
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
    #[serde(default)]
    pub ratings: BTreeMap<String, i64>,
}

impl Draft {
    /// Populate a draft from an existing record, for edit-in-place.
    pub fn from_use_case(uc: &UseCase) -> Self {
        Self {
            title: uc.title.clone(),
            business_process: uc.business_process.clone(),
            pain_points: uc.pain_points.clone(),
            opportunities: uc.opportunities.clone(),
            pii_considerations: uc.pii_considerations.clone(),
            data_availability: uc.data_availability.clone(),
            ai_impact: uc.ai_impact.clone(),
            additional_information: uc.additional_information.clone(),
            ratings: uc.ratings.clone(),
        }
    }

    /// Names of required fields that are still blank. Presence is the only
    /// validation this tool does; `additionalInformation` is optional.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("businessProcess", &self.business_process),
            ("painPoints", &self.pain_points),
            ("opportunities", &self.opportunities),
            ("piiConsiderations", &self.pii_considerations),
            ("dataAvailability", &self.data_availability),
            ("aiImpact", &self.ai_impact),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Whether a save created a new record or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// The whole application state: the ordered collection, which record (if
/// any) the form is editing, and whether the form has unsaved edits.
///
/// Mutations keep the derived score fields consistent with the ratings; the
/// caller is responsible for mirroring the collection to the store afterward.
#[derive(Debug, Default)]
pub struct AppState {
    pub use_cases: Vec<UseCase>,
    pub editing: Option<usize>,
    pub dirty: bool,
}

impl AppState {
    pub fn new(use_cases: Vec<UseCase>) -> Self {
        Self {
            use_cases,
            editing: None,
            dirty: false,
        }
    }

    /// Save the draft: update the record being edited (keeping its identity
    /// and creation time) or append a new one. Fails with the list of blank
    /// required fields; on success the editing pointer and dirty flag reset.
    pub fn save(
        &mut self,
        draft: &Draft,
        config: &DimensionConfig,
        now: DateTime<Utc>,
    ) -> Result<SaveOutcome, Vec<&'static str>> {
        let missing = draft.missing_required();
        if !missing.is_empty() {
            return Err(missing);
        }

        let summary = scoring::score(&draft.ratings, config);
        let editing_index = self.editing.filter(|i| *i < self.use_cases.len());
        let (id, created_at) = match editing_index {
            Some(index) => {
                let existing = &self.use_cases[index];
                (existing.id.clone(), existing.created_at)
            }
            None => (UseCase::new_id(), now),
        };

        let use_case = UseCase {
            id,
            title: draft.title.trim().to_string(),
            business_process: draft.business_process.trim().to_string(),
            pain_points: draft.pain_points.trim().to_string(),
            opportunities: draft.opportunities.trim().to_string(),
            pii_considerations: draft.pii_considerations.trim().to_string(),
            data_availability: draft.data_availability.trim().to_string(),
            ai_impact: draft.ai_impact.trim().to_string(),
            additional_information: draft.additional_information.trim().to_string(),
            ratings: draft.ratings.clone(),
            business_value: summary.business_value,
            feasibility: summary.feasibility,
            quadrant: summary.quadrant,
            created_at,
            last_modified: now,
        };

        let outcome = match editing_index {
            Some(index) => {
                self.use_cases[index] = use_case;
                SaveOutcome::Updated
            }
            None => {
                self.use_cases.push(use_case);
                SaveOutcome::Created
            }
        };

        self.editing = None;
        self.dirty = false;
        Ok(outcome)
    }

    /// Load a record into a draft for editing and remember its position.
    pub fn begin_edit(&mut self, index: usize) -> Option<Draft> {
        let uc = self.use_cases.get(index)?;
        self.editing = Some(index);
        Some(Draft::from_use_case(uc))
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.dirty = false;
    }

    /// Remove a record by position, fixing up the editing pointer.
    pub fn delete(&mut self, index: usize) -> Option<UseCase> {
        if index >= self.use_cases.len() {
            return None;
        }
        let removed = self.use_cases.remove(index);
        self.editing = match self.editing {
            Some(e) if e == index => None,
            Some(e) if e > index => Some(e - 1),
            other => other,
        };
        Some(removed)
    }

    /// Drop everything: collection, editing pointer, dirty flag.
    pub fn clear(&mut self) {
        self.use_cases.clear();
        self.editing = None;
        self.dirty = false;
    }

    /// Replace the collection wholesale (successful import).
    pub fn replace_all(&mut self, use_cases: Vec<UseCase>) {
        self.use_cases = use_cases;
        self.editing = None;
        self.dirty = false;
    }
}
