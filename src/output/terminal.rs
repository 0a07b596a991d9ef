//! Terminal output for the `lookup` command.

use crate::processing::Lookup;
use colored::Colorize;

/// Width of the label column.
const LABEL_WIDTH: usize = 12;

/// Format a label right-aligned to `width`, followed by a colon.
///
/// # Arguments
/// * `label` - The label text
/// * `width` - The minimum width of the label column
pub fn format_label(label: &str, width: usize) -> String {
    format!("{label:>width$}:")
}

fn row(label: &str, value: Option<&str>) -> String {
    format!(
        "{} {}",
        format_label(label, LABEL_WIDTH),
        value.unwrap_or("unknown")
    )
}

/// Plain-text lines describing a lookup.
pub fn format_lookup(lookup: &Lookup) -> Vec<String> {
    let mut lines = vec![row("address", lookup.client.as_deref())];
    if !lookup.matched {
        lines.push(row("starlink", Some("no")));
        return lines;
    }
    lines.push(row("starlink", Some("yes")));
    lines.push(row("pop", lookup.pop_city.as_deref()));
    lines.push(row("pop code", lookup.pop_code.as_deref()));
    lines.push(row("hostname", lookup.annotation.as_deref()));
    if let Some([country, region, city]) = &lookup.location {
        let filed_under = format!("{country}/{region}/{city}");
        lines.push(row("filed under", Some(filed_under.as_str())));
    }
    lines
}

/// Print a lookup to stdout, highlighting the verdict.
pub fn print_lookup(lookup: &Lookup) {
    let verdict = if lookup.matched {
        "STARLINK".on_green()
    } else {
        "NOT STARLINK".on_red()
    };
    println!("#{verdict}#");
    for line in format_lookup(lookup) {
        println!("{line}");
    }
}
