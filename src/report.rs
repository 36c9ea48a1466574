//! Human-readable rendering of a parsed host list for the terminal.
use colored::*;

use crate::hostfile::HostList;

fn section_header(title: &str, width: usize) -> String {
    format!("\n{}\n{}\n\n", title, "─".repeat(width))
}

fn target_line(host: &str, port: &str, user: &str, password: &str) -> String {
    let host = format!("{:<24}", host).bold();
    let line = format!("  {} {:<6} {:<12} {}", host, port, user, password);
    line.trim_end().to_string()
}

/// Render the targets, then a count of rejected lines and line statistics.
/// Passwords are never printed, only whether one is set.
pub fn render_summary(list: &HostList) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Host List".bold().cyan()));

    let title = format!("Targets ({})", list.len());
    out.push_str(&section_header(
        &title.bold().cyan().to_string(),
        title.chars().count(),
    ));
    if list.is_empty() {
        out.push_str("(No targets)\n");
    }
    for t in &list.targets {
        let port = t.port.as_deref().unwrap_or("-");
        let user = t.user.as_deref().unwrap_or("-");
        let password = if t.password.is_some() {
            "(password set)".yellow().to_string()
        } else {
            String::new()
        };
        out.push_str(&target_line(&t.host, port, user, &password));
        out.push('\n');
    }

    if !list.rejected.is_empty() {
        let title = format!("Rejected Lines ({})", list.rejected.len());
        out.push_str(&section_header(
            &title.bold().red().to_string(),
            title.chars().count(),
        ));
        for r in &list.rejected {
            out.push_str(&format!(
                "  {}:{}: {}\n",
                r.source.display(),
                r.line_number,
                r.error.to_string().dimmed()
            ));
        }
    }

    let s = &list.stats;
    out.push_str(&format!(
        "\n{} lines read, {} comments, {} blank, {} parsed, {} rejected\n",
        s.lines, s.comments, s.blank, s.parsed, s.rejected
    ));
    out
}
