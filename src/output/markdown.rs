//! Markdown discovery report
//!
//! Renders a run's statistics and its URLs grouped by category.

use crate::archive::Discovery;
use crate::classify::classify_urls;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report for a discovery run
///
/// # Arguments
///
/// * `package` - Name of the analyzed package, used as the title
/// * `discovery` - The discovery result
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_report(
    package: &str,
    discovery: &Discovery,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(package, discovery);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a discovery run as markdown
pub fn format_markdown_report(package: &str, discovery: &Discovery) -> String {
    let stats = &discovery.stats;
    let mut md = String::new();

    md.push_str(&format!("# Endpoint Discovery: {}\n\n", package));

    md.push_str("## Overview\n\n");
    md.push_str(&format!("- **Unique URLs**: {}\n", discovery.urls.len()));
    md.push_str(&format!(
        "- **Candidates Found**: {}\n",
        stats.candidates_found
    ));
    md.push_str(&format!(
        "- **Acceptance Rate**: {:.2}%\n",
        stats.acceptance_rate()
    ));
    if stats.is_partial() {
        md.push_str("- **Partial**: yes (see skipped counts below)\n");
    }
    md.push('\n');

    md.push_str("## Walk Statistics\n\n");
    md.push_str("| Counter | Value |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!(
        "| Containers Walked | {} |\n",
        stats.containers_opened
    ));
    md.push_str(&format!(
        "| Nested Containers | {} |\n",
        stats.nested_containers
    ));
    md.push_str(&format!(
        "| Nested Containers Skipped | {} |\n",
        stats.nested_failures
    ));
    md.push_str(&format!("| Entries Seen | {} |\n", stats.entries_seen));
    md.push_str(&format!("| Entries Scanned | {} |\n", stats.entries_scanned));
    md.push_str(&format!(
        "| Entries Unreadable | {} |\n",
        stats.entry_failures
    ));
    md.push_str(&format!(
        "| Candidates Rejected | {} |\n\n",
        stats.candidates_rejected
    ));

    let classification = classify_urls(&discovery.urls);
    if classification.non_empty_count() > 0 {
        md.push_str("## Endpoints by Category\n\n");
        for bucket in classification.non_empty() {
            md.push_str(&format!(
                "### {} ({})\n\n",
                bucket.display_name,
                bucket.urls.len()
            ));
            for url in bucket.urls {
                md.push_str(&format!("- `{}`\n", url));
            }
            md.push('\n');
        }
    } else {
        md.push_str("No endpoints discovered.\n");
    }

    md
}
