use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::usecase::{Quadrant, UseCase};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format the collection as a table: index, scores, quadrant, title.
/// Index is 1-based, matching the indices `delete` and `report --case` take.
pub fn format_table(use_cases: &[UseCase], use_colors: bool) -> String {
    if use_cases.is_empty() {
        return "No use cases yet.".to_string();
    }

    let term_width = get_terminal_width();

    use_cases
        .iter()
        .enumerate()
        .map(|(idx, uc)| {
            let index_str = format!("{:>2}.", idx + 1);
            let scores = format!("V {:>4} F {:>4}", format!("{:.1}", uc.business_value), format!("{:.1}", uc.feasibility));
            let quadrant = format!("{:<24}", uc.quadrant.label());

            // Index(3) + space + scores(11) + 2 + quadrant(24) + 2
            let fixed_width = 3 + 1 + scores.len() + 2 + 24 + 2;
            let title = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_title(&uc.title, width - fixed_width)
                }
                Some(_) => truncate_title(&uc.title, 20),
                // No terminal (pipe), don't truncate
                None => uc.title.clone(),
            };

            if use_colors {
                format!(
                    "{} {}  {}  {}",
                    index_str.dimmed(),
                    scores.bold(),
                    colorize_quadrant(&quadrant, uc.quadrant),
                    title
                )
            } else {
                format!("{} {}  {}  {}", index_str, scores, quadrant, title)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single use case with detailed multi-line output (for verbose mode)
pub fn format_detail(uc: &UseCase, use_colors: bool) -> String {
    let quadrant = uc.quadrant.label();
    let created = crate::export::format_date(uc.created_at);

    if use_colors {
        format!(
            "{}\n  Process: {}\n  Value: {:.1}  Feasibility: {:.1}\n  Quadrant: {}\n  Created: {}",
            uc.title.bold(),
            uc.business_process.cyan(),
            uc.business_value,
            uc.feasibility,
            colorize_quadrant(quadrant, uc.quadrant),
            created
        )
    } else {
        format!(
            "{}\n  Process: {}\n  Value: {:.1}  Feasibility: {:.1}\n  Quadrant: {}\n  Created: {}",
            uc.title, uc.business_process, uc.business_value, uc.feasibility, quadrant, created
        )
    }
}

fn colorize_quadrant(text: &str, quadrant: Quadrant) -> String {
    match quadrant {
        Quadrant::QuickWins => text.green().to_string(),
        Quadrant::StrategicInitiatives => text.yellow().to_string(),
        Quadrant::IncrementalImprovements => text.cyan().to_string(),
        Quadrant::Deprioritize => text.red().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn sample(title: &str) -> UseCase {
        UseCase {
            id: "1".to_string(),
            title: title.to_string(),
            business_process: "Finance".to_string(),
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
            created_at: "2025-06-01T09:30:00Z".parse().unwrap(),
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn test_format_table_empty() {
        let result = format_table(&[], false);
        assert_eq!(result, "No use cases yet.");
    }

    #[test]
    fn test_format_table_single() {
        let use_cases = vec![sample("Invoice triage")];
        let result = format_table(&use_cases, false);
        assert!(result.contains(" 1."));
        assert!(result.contains("V  3.5"));
        assert!(result.contains("F  2.0"));
        assert!(result.contains("Strategic Initiatives"));
        assert!(result.contains("Invoice triage"));
    }

    #[test]
    fn test_format_table_indices_are_sequential() {
        let use_cases = vec![sample("First"), sample("Second")];
        let result = format_table(&use_cases, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" 1."));
        assert!(lines[1].contains(" 2."));
    }

    #[test]
    fn test_format_detail() {
        let uc = sample("Invoice triage");
        let result = format_detail(&uc, false);
        assert!(result.contains("Invoice triage"));
        assert!(result.contains("Process: Finance"));
        assert!(result.contains("Value: 3.5"));
        assert!(result.contains("Quadrant: Strategic Initiatives"));
        assert!(result.contains("Created: Jun 1, 2025"));
    }

    #[test]
    fn test_truncate_title_short() {
        assert_eq!(truncate_title("Short title", 20), "Short title");
    }

    #[test]
    fn test_truncate_title_long() {
        assert_eq!(
            truncate_title("This is a very long title", 15),
            "This is a ve..."
        );
    }

    #[test]
    fn test_truncate_title_unicode() {
        // Truncation counts chars, not bytes.
        assert_eq!(truncate_title("Héllo wörld extra", 10), "Héllo w...");
    }

    #[test]
    fn test_truncate_title_very_narrow() {
        assert_eq!(truncate_title("Hello world", 3), "Hel");
    }
}
