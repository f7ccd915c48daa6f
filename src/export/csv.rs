use crate::usecase::UseCase;

/// Fixed CSV column order. Changing this breaks downstream spreadsheets.
const HEADERS: [&str; 7] = [
    "Title",
    "Business Process",
    "Pain Points",
    "Business Value",
    "Feasibility",
    "Quadrant",
    "Created Date",
];

/// Render the collection as CSV. The header row is always present, so an
/// empty collection yields a header-only document. Every value is wrapped in
/// double quotes with embedded quotes doubled.
pub fn generate_csv(use_cases: &[UseCase]) -> String {
    let mut csv = String::new();
    csv.push_str(&HEADERS.join(","));
    csv.push('\n');

    for uc in use_cases {
        let row = [
            quote(&uc.title),
            quote(&uc.business_process),
            quote(&uc.pain_points),
            quote(&format!("{:.1}", uc.business_value)),
            quote(&format!("{:.1}", uc.feasibility)),
            quote(uc.quadrant.label()),
            quote(&super::format_date(uc.created_at)),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::Quadrant;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn sample(title: &str) -> UseCase {
        UseCase {
            id: "1".to_string(),
            title: title.to_string(),
            business_process: "Accounts payable".to_string(),
            pain_points: "Manual entry".to_string(),
            opportunities: String::new(),
            pii_considerations: String::new(),
            data_availability: String::new(),
            ai_impact: String::new(),
            additional_information: String::new(),
            ratings: BTreeMap::new(),
            business_value: 3.5,
            feasibility: 2.0,
            quadrant: Quadrant::StrategicInitiatives,
            created_at: "2025-06-01T09:30:00Z".parse().unwrap(),
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn test_empty_collection_is_header_only() {
        let csv = generate_csv(&[]);
        assert_eq!(
            csv,
            "Title,Business Process,Pain Points,Business Value,Feasibility,Quadrant,Created Date\n"
        );
    }

    #[test]
    fn test_one_row_per_use_case() {
        let csv = generate_csv(&[sample("One"), sample("Two")]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("\"One\""));
        assert!(lines[2].starts_with("\"Two\""));
    }

    #[test]
    fn test_values_are_quoted_and_ordered() {
        let csv = generate_csv(&[sample("Invoice triage")]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[1],
            "\"Invoice triage\",\"Accounts payable\",\"Manual entry\",\"3.5\",\"2.0\",\"Strategic Initiatives\",\"Jun 1, 2025\""
        );
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut uc = sample("The \"big\" one");
        uc.pain_points = "Data is \"messy\"".to_string();
        let csv = generate_csv(&[uc]);
        assert!(csv.contains("\"The \"\"big\"\" one\""));
        assert!(csv.contains("\"Data is \"\"messy\"\"\""));
    }

    #[test]
    fn test_commas_in_values_stay_inside_quotes() {
        let mut uc = sample("Triage");
        uc.business_process = "Finance, shared services".to_string();
        let csv = generate_csv(&[uc]);
        assert!(csv.contains("\"Finance, shared services\""));
    }
}
