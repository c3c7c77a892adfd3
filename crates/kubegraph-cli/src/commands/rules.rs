//! Rules command
//!
//! Usage: kubegraph rules

use kubegraph_core::model::Kind;
use kubegraph_core::rules::is_allowed;

/// Execute rules command
///
/// Rows are sources, columns are targets.
pub fn execute() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", render_matrix());
    Ok(())
}

fn render_matrix() -> String {
    let width = Kind::ALL
        .iter()
        .map(|k| k.display_name().len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{:width$}", "", width = width);
    for target in Kind::ALL {
        out.push_str(&format!(" {:>width$}", target.display_name(), width = width));
    }
    out.push('\n');

    for source in Kind::ALL {
        out.push_str(&format!("{:width$}", source.display_name(), width = width));
        for target in Kind::ALL {
            let cell = if is_allowed(source, target).allowed { "✓" } else { "·" };
            out.push_str(&format!(" {:>width$}", cell, width = width));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_has_header_and_one_row_per_kind() {
        let matrix = render_matrix();
        let lines: Vec<&str> = matrix.lines().collect();
        assert_eq!(lines.len(), Kind::ALL.len() + 1);
        assert!(lines[1].starts_with("Ingress"));
        assert_eq!(matrix.matches('✓').count(), 15);
    }
}
