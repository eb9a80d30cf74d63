use chrono::Local;
use sofcalc_core::{EventRow, LaytimeReport};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use unicode_width::UnicodeWidthChar;

const DESCRIPTION_WIDTH: usize = 44;

// Helper struct for Table Row
#[derive(Tabled)]
struct EventLine {
    #[tabled(rename = "#")]
    idx: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Used (h)")]
    used: String,
    #[tabled(rename = "% Allowed")]
    pct: String,
    #[tabled(rename = "Consumed (h)")]
    consumed: String,
    #[tabled(rename = "Remaining (h)")]
    remaining: String,
}

impl EventLine {
    fn from_row(idx: usize, row: &EventRow) -> Self {
        Self {
            idx: (idx + 1).to_string(),
            day: row.day.clone(),
            event: truncate_width(&row.description, DESCRIPTION_WIDTH),
            start: row.start.clone(),
            end: row.end.clone(),
            used: row.utilization.clone(),
            pct: row.pct_of_allowed.clone(),
            consumed: row.consumed.clone(),
            remaining: row.remaining.clone(),
        }
    }
}

pub fn print_events(report: &LaytimeReport) {
    let lines: Vec<EventLine> = report
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| EventLine::from_row(i, row))
        .collect();

    let mut table = Table::new(lines);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color

    println!("{}", table);
}

pub fn print_report(report: &LaytimeReport) {
    let vessel = report
        .vessel
        .vessel_name
        .as_deref()
        .unwrap_or("Unknown vessel");
    println!(
        "\n\x1b[1;36mLaytime Statement: {}\x1b[0m ({})",
        vessel,
        Local::now().format("%Y-%m-%d %H:%M")
    );
    if let (Some(from), Some(to)) = (
        report.vessel.port_of_loading.as_deref(),
        report.vessel.port_of_discharge.as_deref(),
    ) {
        println!("Voyage: {} -> {}", from, to);
    }
    if let Some(cargo) = report.vessel.cargo_description.as_deref() {
        match report.vessel.cargo_quantity.as_deref() {
            Some(qty) => println!("Cargo: {} ({})", cargo, qty),
            None => println!("Cargo: {}", cargo),
        }
    }
    println!();

    if report.rows.is_empty() {
        println!("No events on file; laytime used is taken from cargo quantity over loading rate.");
    } else {
        print_events(report);
    }

    let summary = &report.summary;
    println!();
    println!("Laytime used:    {:.2} days", summary.used_days);
    println!("Laytime allowed: {:.2} days", summary.allowed_days);
    println!(
        "Remaining:       {:.2} days",
        summary.remaining_days_display
    );

    if summary.on_demurrage {
        println!(
            "\x1b[1;31mDemurrage due:   ${:.2}\x1b[0m ({:.2} days over)",
            summary.demurrage_display(),
            summary.delta_days
        );
    } else if summary.remaining_days_display > 0.0 {
        println!(
            "\x1b[1;32mDispatch credit: ${:.2}\x1b[0m ({:.2} days saved)",
            summary.dispatch_display(),
            summary.delta_days
        );
    } else {
        println!("Laytime exactly consumed; no demurrage, no dispatch.");
    }
}

fn truncate_width(s: &str, max: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return s.to_string();
    }

    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
