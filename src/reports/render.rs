//! Terminal rendering of a simulation report
use super::colors::Rgb;
use super::summary::{by_votes, chart_order, format_thousands, PartyResult};
use super::{QuotientMatrix, SimulationReport};
use colored::*;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Sort the bar chart by votes instead of input order.
    pub ordered_chart: bool,
    pub show_matrix: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ordered_chart: true,
            show_matrix: true,
        }
    }
}

fn parse_hex(hex: &str) -> Rgb {
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0x7f)
    };
    Rgb(channel(1), channel(3), channel(5))
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(unnamed)"
    } else {
        name
    }
}

fn bar_length(votes: i64, max_votes: i64) -> usize {
    if max_votes <= 0 {
        return 0;
    }
    ((votes as f64 / max_votes as f64) * BAR_WIDTH as f64).round() as usize
}

fn write_chart(out: &mut String, results: &[PartyResult], ordered: bool) {
    let rows = chart_order(results, ordered);
    let max_votes = rows.iter().map(|r| r.votes).max().unwrap_or(0);
    let label_width = rows
        .iter()
        .map(|r| display_name(&r.name).chars().count())
        .max()
        .unwrap_or(0);

    let _ = writeln!(out, "\n{}", "📊 Votes by party".bright_cyan().bold());
    for r in rows {
        let Rgb(red, green, blue) = parse_hex(&r.color);
        let bar = "█".repeat(bar_length(r.votes, max_votes));
        let name = display_name(&r.name);
        let pad = " ".repeat(label_width - name.chars().count());
        let _ = writeln!(
            out,
            "  {}{} │{} {}",
            name,
            pad,
            bar.truecolor(red, green, blue),
            format_thousands(r.votes).bright_white()
        );
    }
}

fn write_winners(out: &mut String, report: &SimulationReport) {
    let _ = writeln!(out, "\n{}", "🏆 Seats won".bright_cyan().bold());
    if report.winners.is_empty() {
        let _ = writeln!(out, "  {}", "(no seats allocated)".dimmed());
        return;
    }
    for w in &report.winners {
        let _ = writeln!(
            out,
            "  {}: {}",
            display_name(&w.name),
            w.seats.to_string().bright_green().bold()
        );
    }
}

fn write_results(out: &mut String, results: &[PartyResult]) {
    let _ = writeln!(out, "\n{}", "📑 Votes, share and seats".bright_cyan().bold());
    let _ = writeln!(out, "  {:<30} {:>12} {:>8} {:>6}", "Party", "Votes", "%", "Seats");
    for r in by_votes(results) {
        let _ = writeln!(
            out,
            "  {:<30} {:>12} {:>8.2} {:>6}",
            display_name(&r.name),
            format_thousands(r.votes),
            r.percentage,
            r.seats
        );
    }
}

fn write_matrix(out: &mut String, matrix: &QuotientMatrix) {
    let _ = writeln!(
        out,
        "\n{}",
        format!("🔍 Quotients (top {} highlighted)", matrix.divisors.len())
            .bright_cyan()
            .bold()
    );
    let mut header = format!("  {:<30}", "Party");
    for d in &matrix.divisors {
        let _ = write!(header, " {:>10}", format!("÷{}", d));
    }
    let _ = writeln!(out, "{}", header);

    for row in &matrix.rows {
        let mut line = format!("  {:<30}", display_name(&row.name));
        for cell in &row.cells {
            let value = format!("{:>10}", cell.display);
            if cell.highlighted {
                let _ = write!(line, " {}", value.white().bold().on_blue());
            } else {
                let _ = write!(line, " {}", value);
            }
        }
        let _ = writeln!(out, "{}", line);
    }
}

/// Render the whole report as coloured terminal text.
pub fn render(report: &SimulationReport, options: &RenderOptions) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        "🧮 D'Hondt seat allocation".bright_cyan().bold()
    );
    let _ = writeln!(
        out,
        "  Seats: {}   Total votes: {}",
        report.seats.to_string().bright_yellow(),
        format_thousands(report.total_votes).bright_yellow()
    );
    if let Some(d) = &report.distributor {
        let _ = writeln!(
            out,
            "  Distributor quotient: {} ({} ÷{})",
            format!("{:.2}", d.quotient).bright_yellow(),
            display_name(&d.party),
            d.divisor
        );
    }

    write_chart(&mut out, &report.results, options.ordered_chart);
    write_winners(&mut out, report);
    write_results(&mut out, &report.results);
    if options.show_matrix {
        write_matrix(&mut out, &report.matrix);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::party::sample_parties;
    use crate::tabulator::allocate;

    fn plain(report: &SimulationReport, options: &RenderOptions) -> String {
        colored::control::set_override(false);
        render(report, options)
    }

    #[test]
    fn renders_sections() {
        let parties = sample_parties();
        let allocation = allocate(&parties, 4).unwrap();
        let report = SimulationReport::build(&parties, &allocation, 4).unwrap();
        let text = plain(&report, &RenderOptions::default());

        assert!(text.contains("Total votes: 212.609"));
        assert!(text.contains("Fuerza Popular: 2"));
        assert!(text.contains("÷4"));
        assert!(text.contains("35879"));
    }

    #[test]
    fn no_seats_message() {
        let parties = sample_parties();
        let allocation = allocate(&parties, 0).unwrap();
        let report = SimulationReport::build(&parties, &allocation, 4).unwrap();
        let text = plain(
            &report,
            &RenderOptions {
                ordered_chart: false,
                show_matrix: false,
            },
        );
        assert!(text.contains("(no seats allocated)"));
        assert!(!text.contains("Quotients"));
    }

    #[test]
    fn bars_scale_to_largest() {
        assert_eq!(bar_length(50, 100), BAR_WIDTH / 2);
        assert_eq!(bar_length(100, 100), BAR_WIDTH);
        assert_eq!(bar_length(0, 0), 0);
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(parse_hex("#1f77b4"), Rgb(0x1f, 0x77, 0xb4));
    }
}
