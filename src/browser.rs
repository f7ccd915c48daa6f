use anyhow::{Context, Result};
use std::path::Path;

/// Open an exported report in the default browser.
pub fn open_report(path: &Path) -> Result<()> {
    let target = path
        .to_str()
        .context("Report path is not valid UTF-8")?;
    webbrowser::open(target)
        .with_context(|| format!("Failed to open {} in browser", path.display()))?;
    Ok(())
}
