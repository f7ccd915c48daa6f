use crate::usecase::{Quadrant, UseCase};
use chrono::{DateTime, Utc};

/// Aggregate numbers shown at the top of the summary report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub total: usize,
    pub avg_business_value: f64,
    pub avg_feasibility: f64,
    pub quick_wins: usize,
}

impl SummaryStats {
    pub fn compute(use_cases: &[UseCase]) -> Self {
        let total = use_cases.len();
        if total == 0 {
            return Self {
                total: 0,
                avg_business_value: 0.0,
                avg_feasibility: 0.0,
                quick_wins: 0,
            };
        }

        let value_sum: f64 = use_cases.iter().map(|uc| uc.business_value).sum();
        let feasibility_sum: f64 = use_cases.iter().map(|uc| uc.feasibility).sum();
        let quick_wins = use_cases
            .iter()
            .filter(|uc| uc.quadrant == Quadrant::QuickWins)
            .count();

        Self {
            total,
            avg_business_value: value_sum / total as f64,
            avg_feasibility: feasibility_sum / total as f64,
            quick_wins,
        }
    }
}

/// Group use cases by quadrant in priority order, keeping relative order
/// within each group.
pub fn group_by_quadrant(use_cases: &[UseCase]) -> Vec<(Quadrant, Vec<&UseCase>)> {
    Quadrant::all()
        .into_iter()
        .map(|q| {
            let members = use_cases.iter().filter(|uc| uc.quadrant == q).collect();
            (q, members)
        })
        .collect()
}

/// Badge color per quadrant, shared by both HTML documents.
pub fn quadrant_hex(quadrant: Quadrant) -> &'static str {
    match quadrant {
        Quadrant::QuickWins => "#28a745",
        Quadrant::StrategicInitiatives => "#ffc107",
        Quadrant::IncrementalImprovements => "#17a2b8",
        Quadrant::Deprioritize => "#dc3545",
    }
}

const SUMMARY_CSS: &str = "\
        body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }
        .header { text-align: center; border-bottom: 3px solid #667eea; padding-bottom: 20px; margin-bottom: 30px; }
        .summary-stats { display: flex; justify-content: space-around; background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 30px; }
        .stat-item { text-align: center; }
        .stat-value { font-size: 28px; font-weight: bold; color: #667eea; }
        .quadrant-section { margin: 30px 0; }
        .quadrant-title { font-size: 18px; font-weight: bold; margin-bottom: 15px; }
        .use-case-summary { background: #f8f9fa; padding: 15px; margin-bottom: 15px; border-radius: 8px; border-left: 4px solid #667eea; }
        .use-case-title { font-weight: bold; color: #495057; margin-bottom: 5px; }
        .use-case-scores { font-size: 14px; color: #6c757d; }
        table { width: 100%; border-collapse: collapse; margin: 20px 0; }
        th, td { border: 1px solid #dee2e6; padding: 12px; text-align: left; }
        th { background: #667eea; color: white; }
";

/// Full summary document: stats, quadrant sections, detail table, roadmap.
pub fn summary_report(use_cases: &[UseCase], generated_on: DateTime<Utc>) -> String {
    let stats = SummaryStats::compute(use_cases);
    let groups = group_by_quadrant(use_cases);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <title>Use Case Assessment - Summary Report</title>\n");
    html.push_str("    <style>\n");
    html.push_str(SUMMARY_CSS);
    html.push_str("    </style>\n</head>\n<body>\n");

    html.push_str("    <div class=\"header\">\n");
    html.push_str("        <h1>AI Use Case Assessment</h1>\n");
    html.push_str("        <h2>Summary Report</h2>\n");
    html.push_str(&format!(
        "        <p>Generated on {} | Total Use Cases: {}</p>\n",
        super::format_date(generated_on),
        stats.total
    ));
    html.push_str("    </div>\n");

    html.push_str("    <div class=\"summary-stats\">\n");
    push_stat(&mut html, &stats.total.to_string(), "Total Use Cases");
    push_stat(
        &mut html,
        &format!("{:.1}", stats.avg_business_value),
        "Avg Business Value",
    );
    push_stat(
        &mut html,
        &format!("{:.1}", stats.avg_feasibility),
        "Avg Feasibility",
    );
    push_stat(&mut html, &stats.quick_wins.to_string(), "Quick Wins");
    html.push_str("    </div>\n");

    for (quadrant, members) in &groups {
        if members.is_empty() {
            continue;
        }
        let color = quadrant_hex(*quadrant);
        html.push_str("    <div class=\"quadrant-section\">\n");
        html.push_str(&format!(
            "        <div class=\"quadrant-title\" style=\"color: {};\">{} ({} use cases)</div>\n",
            color,
            quadrant.label(),
            members.len()
        ));
        for uc in members {
            html.push_str(&format!(
                "        <div class=\"use-case-summary\" style=\"border-left-color: {};\">\n",
                color
            ));
            html.push_str(&format!(
                "            <div class=\"use-case-title\">{}</div>\n",
                escape_html(&uc.title)
            ));
            html.push_str(&format!(
                "            <div class=\"use-case-scores\">Business Value: {:.1} | Feasibility: {:.1}</div>\n",
                uc.business_value, uc.feasibility
            ));
            html.push_str(&format!(
                "            <div>{}</div>\n",
                escape_html(&uc.pain_points)
            ));
            html.push_str("        </div>\n");
        }
        html.push_str("    </div>\n");
    }

    html.push_str("    <h2>Detailed Use Cases Overview</h2>\n");
    html.push_str("    <table>\n        <thead>\n            <tr>\n");
    for header in [
        "Use Case",
        "Business Process",
        "Business Value",
        "Feasibility",
        "Priority",
    ] {
        html.push_str(&format!("                <th>{}</th>\n", header));
    }
    html.push_str("            </tr>\n        </thead>\n        <tbody>\n");
    for uc in use_cases {
        html.push_str("            <tr>\n");
        html.push_str(&format!(
            "                <td><strong>{}</strong></td>\n",
            escape_html(&uc.title)
        ));
        html.push_str(&format!(
            "                <td>{}</td>\n",
            escape_html(&uc.business_process)
        ));
        html.push_str(&format!(
            "                <td>{:.1}</td>\n",
            uc.business_value
        ));
        html.push_str(&format!("                <td>{:.1}</td>\n", uc.feasibility));
        html.push_str(&format!(
            "                <td style=\"color: {};\">{}</td>\n",
            quadrant_hex(uc.quadrant),
            uc.quadrant.label()
        ));
        html.push_str("            </tr>\n");
    }
    html.push_str("        </tbody>\n    </table>\n");

    push_roadmap(&mut html, &groups);

    html.push_str("</body>\n</html>\n");
    html
}

/// Single-use-case document: overview, scores, implementation details.
pub fn use_case_report(uc: &UseCase, generated_on: DateTime<Utc>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!(
        "    <title>Use Case Report: {}</title>\n",
        escape_html(&uc.title)
    ));
    html.push_str("    <style>\n");
    html.push_str(
        "\
        body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }
        .header { text-align: center; border-bottom: 2px solid #3a165e; padding-bottom: 20px; margin-bottom: 30px; }
        .section { margin-bottom: 25px; }
        .section h3 { color: #3a165e; border-bottom: 1px solid #eee; padding-bottom: 5px; }
        .scores { display: flex; justify-content: space-around; background: #f8f9fa; padding: 20px; border-radius: 8px; }
        .score-item { text-align: center; }
        .score-value { font-size: 24px; font-weight: bold; color: #3a165e; }
",
    );
    html.push_str("    </style>\n</head>\n<body>\n");

    html.push_str("    <div class=\"header\">\n");
    html.push_str("        <h1>Use Case Assessment Report</h1>\n");
    html.push_str(&format!("        <h2>{}</h2>\n", escape_html(&uc.title)));
    html.push_str(&format!(
        "        <p>Generated on {}</p>\n",
        super::format_date(generated_on)
    ));
    html.push_str("    </div>\n");

    html.push_str("    <div class=\"section\">\n        <h3>Overview</h3>\n");
    push_field(&mut html, "Business Process", &uc.business_process);
    push_field(&mut html, "Pain Points", &uc.pain_points);
    push_field(&mut html, "Opportunities", &uc.opportunities);
    html.push_str("    </div>\n");

    html.push_str("    <div class=\"section\">\n        <h3>Assessment Scores</h3>\n");
    html.push_str("        <div class=\"scores\">\n");
    push_score(&mut html, &format!("{:.1}", uc.business_value), "Business Value");
    push_score(&mut html, &format!("{:.1}", uc.feasibility), "Feasibility");
    push_score(&mut html, uc.quadrant.label(), "Priority Category");
    html.push_str("        </div>\n    </div>\n");

    html.push_str("    <div class=\"section\">\n        <h3>Implementation Details</h3>\n");
    push_field(&mut html, "Data Availability", &uc.data_availability);
    push_field(&mut html, "AI Impact", &uc.ai_impact);
    push_field(&mut html, "PII Considerations", &uc.pii_considerations);
    if !uc.additional_information.is_empty() {
        push_field(&mut html, "Additional Information", &uc.additional_information);
    }
    html.push_str("    </div>\n</body>\n</html>\n");
    html
}

/// File name for the summary report, stamped with the generation date.
pub fn summary_report_filename(generated_on: DateTime<Utc>) -> String {
    format!(
        "use-case-summary-report-{}.html",
        generated_on.format("%Y-%m-%d")
    )
}

/// File name for a single-use-case report, slugged from its title.
pub fn use_case_filename(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    format!("{}.html", slug.trim_matches('-'))
}

fn push_stat(html: &mut String, value: &str, label: &str) {
    html.push_str("        <div class=\"stat-item\">\n");
    html.push_str(&format!(
        "            <div class=\"stat-value\">{}</div>\n",
        value
    ));
    html.push_str(&format!("            <div>{}</div>\n", label));
    html.push_str("        </div>\n");
}

fn push_score(html: &mut String, value: &str, label: &str) {
    html.push_str("            <div class=\"score-item\">\n");
    html.push_str(&format!(
        "                <div class=\"score-value\">{}</div>\n",
        value
    ));
    html.push_str(&format!("                <div>{}</div>\n", label));
    html.push_str("            </div>\n");
}

fn push_field(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "        <p><strong>{}:</strong> {}</p>\n",
        label,
        escape_html(value)
    ));
}

fn push_roadmap(html: &mut String, groups: &[(Quadrant, Vec<&UseCase>)]) {
    html.push_str("    <h2>Implementation Roadmap Recommendations</h2>\n");

    for (quadrant, members) in groups {
        let (heading, blurb) = match quadrant {
            Quadrant::QuickWins => (
                "Phase 1: Quick Wins (0-6 months)",
                "Focus on high-value, high-feasibility use cases for immediate impact:",
            ),
            Quadrant::StrategicInitiatives => (
                "Phase 2: Strategic Initiatives (6-24 months)",
                "Invest in transformative use cases that require significant planning and resources:",
            ),
            _ => continue,
        };
        if members.is_empty() {
            continue;
        }
        html.push_str(&format!("    <h3>{}</h3>\n    <p>{}</p>\n    <ul>\n", heading, blurb));
        for uc in members {
            html.push_str(&format!(
                "        <li><strong>{}</strong> - Business Value {:.1}</li>\n",
                escape_html(&uc.title),
                uc.business_value
            ));
        }
        html.push_str("    </ul>\n");
    }

    html.push_str("    <h3>Key Success Factors</h3>\n    <ul>\n");
    for factor in [
        "Establish clear success metrics and KPIs for each implementation",
        "Ensure adequate data infrastructure and quality",
        "Invest in change management and training",
        "Start with pilot projects to validate assumptions",
        "Build internal AI/automation capabilities",
    ] {
        html.push_str(&format!("        <li>{}</li>\n", factor));
    }
    html.push_str("    </ul>\n");
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
