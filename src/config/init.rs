use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::get_config_path;

/// Starter config, written by `caseboard init`. Mirrors the shipped defaults
/// so editing it never silently changes scoring behavior.
const STARTER_CONFIG: &str = r#"# caseboard configuration
#
# Rating dimensions are fully configurable. The shipped default is the 0-5
# assessment variant; the older 1-10 variant is expressible by changing the
# scale, groups, and threshold below.

dimensions:
  # Inclusive rating scale bounds.
  scale: { min: 0, max: 5 }

  # Missing ratings count as `zero` or as the scale `midpoint`.
  default_policy: zero

  # Dimensions averaged into the business-value score.
  value: [economicImpact, hsec, esg, productivity]

  # Dimensions averaged into the feasibility score.
  feasibility: [dataReadiness, technicalComplexity, aiComplexity, organisationalCapability]

  # Complexity-type dimensions: higher ratings mean lower feasibility, so they
  # are reversed against the scale max before averaging.
  inverted: [technicalComplexity, aiComplexity]

  # Quadrant threshold. Omit to use the scale midpoint.
  # threshold: 2.5

  # Display labels for the entry form.
  labels:
    economicImpact: Economic Impact
    hsec: HSEC
    esg: ESG
    productivity: Productivity
    dataReadiness: Data Readiness
    technicalComplexity: Technical Complexity
    aiComplexity: AI Complexity
    organisationalCapability: Organisational Capability

# How often a dirty entry form is snapshotted to disk.
autosave_interval: 30s

# Where use-case data lives. Defaults to the config directory.
# data_dir: /path/to/data
"#;

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    print!("{} [{}]: ", message, hint);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    let input = input.trim().to_lowercase();

    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Write the starter config file.
///
/// Refuses to clobber an existing file unless the user confirms (or `force`
/// is set). Returns the path written, or None if the user declined.
pub fn write_starter_config(path: Option<PathBuf>, force: bool) -> Result<Option<PathBuf>> {
    let config_path = path.unwrap_or_else(get_config_path);

    if config_path.exists() && !force {
        let overwrite = prompt_yes_no(
            &format!("{} already exists. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            return Ok(None);
        }
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory at {}", parent.display())
        })?;
    }

    std::fs::write(&config_path, STARTER_CONFIG)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(Some(config_path))
}
