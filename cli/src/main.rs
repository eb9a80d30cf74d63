mod report;
mod tui;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sofcalc_core::{
    compose_stamp, expand_key, parse_args, parse_extraction, report_for, FileSessionRepository,
    SessionRepository, SessionService, SofEvent, StatementUseCase,
};

#[derive(Parser)]
#[command(name = "sofcalc")]
#[command(about = "Statement of Facts laytime calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Import extraction backend output (vessel info + events JSON)
    Import {
        /// Path to the JSON file produced by the extraction backend
        file: PathBuf,
    },
    /// List the events in the current session
    Events,
    /// Add an event (usage: add "Loading commenced" date:21.01.2021 start:0615 end:1200)
    Add {
        /// Event description plus metadata (key:value)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Update laytime terms and vessel details (key:value pairs)
    Set {
        /// Fields to update, e.g. allowed:2.5 demurrage:25000 dispatch:12500
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Compute the laytime statement and print the full report
    Calc,
    /// Drop the current session
    Clear,
    /// Open the interactive review screen
    Tui,
}

const EVENT_KEYS: [&str; 5] = ["date", "start", "end", "day", "remarks"];
const TERM_KEYS: [&str; 11] = [
    "allowed",
    "demurrage",
    "dispatch",
    "rate",
    "quantity",
    "vessel",
    "master",
    "agent",
    "loading",
    "discharge",
    "cargo",
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let repo = FileSessionRepository::new(None)?;
    let service = SessionService::new(repo);

    match cli.command {
        Some(Commands::Import { file }) => {
            let raw = std::fs::read_to_string(&file)?;
            let (vessel, events) = parse_extraction(&raw)?;
            let count = service.import(vessel, events)?;
            if count == 0 {
                println!("Warning: no events found in '{}'.", file.display());
            } else {
                println!("Imported {} events from '{}'.", count, file.display());
            }
            if let Some(name) = &service.session()?.vessel.vessel_name {
                println!("  Vessel: {}", name);
            }
        }
        Some(Commands::Events) => {
            let session = service.session()?;
            if session.events.is_empty() {
                println!("No events in the current session.");
            } else {
                report::print_events(&report_for(&session));
            }
        }
        Some(Commands::Add { args }) => add_event(&service, args)?,
        Some(Commands::Set { args }) => set_fields(&service, args)?,
        Some(Commands::Calc) => {
            let laytime_report = StatementUseCase::new(service.repo()).build_report()?;
            report::print_report(&laytime_report);
        }
        Some(Commands::Clear) => {
            service.repo().clear()?;
            println!("Session cleared.");
        }
        Some(Commands::Tui) | None => {
            tui::run()?;
        }
    }
    Ok(())
}

fn add_event(service: &SessionService<FileSessionRepository>, args: Vec<String>) -> Result<()> {
    if args.is_empty() {
        println!("Error: Event description is required.");
        return Ok(());
    }

    let parsed = parse_args(&args);
    if parsed.text.is_empty() {
        println!("Error: Event description is required.");
        return Ok(());
    }

    // Normalize metadata keys
    let mut normalized = HashMap::new();
    for (key, value) in parsed.metadata {
        match expand_key(&key, &EVENT_KEYS) {
            Ok(full_key) => {
                normalized.insert(full_key, value);
            }
            Err(e) => {
                println!("Warning: {}", e);
            }
        }
    }

    let date = normalized.get("date").map(String::as_str);
    let start = compose_stamp(date, normalized.get("start").map(String::as_str));
    let end = compose_stamp(date, normalized.get("end").map(String::as_str));

    let mut event = SofEvent::new(parsed.text, start, end);
    event.day = normalized.get("day").cloned();
    event.remarks = normalized.get("remarks").cloned();

    let created = service.add_event(event)?;
    println!("Event added: {} (ID: {})", created.description, created.id);
    if let Some(s) = &created.start {
        println!("  Start: {}", s);
    }
    if let Some(e) = &created.end {
        println!("  End: {}", e);
    }
    Ok(())
}

fn set_fields(service: &SessionService<FileSessionRepository>, args: Vec<String>) -> Result<()> {
    let parsed = parse_args(&args);
    let mut session = service.session()?;

    if parsed.metadata.is_empty() {
        let terms = &session.terms;
        println!("Current terms:");
        println!("  allowed:   {} days", terms.allowed_laytime_days);
        println!("  demurrage: {} per day", terms.demurrage_rate_per_day);
        println!("  dispatch:  {} per day", terms.dispatch_rate_per_day);
        println!("  rate:      {} per day", terms.loading_rate);
        println!("  quantity:  {}", terms.cargo_quantity);
        if let Some(name) = &session.vessel.vessel_name {
            println!("  vessel:    {}", name);
        }
        return Ok(());
    }

    for (key, value) in parsed.metadata {
        match expand_key(&key, &TERM_KEYS) {
            Ok(full_key) => match full_key.as_str() {
                "allowed" => {
                    if let Some(v) = parse_num(&value, "allowed") {
                        session.terms.allowed_laytime_days = v;
                    }
                }
                "demurrage" => {
                    if let Some(v) = parse_num(&value, "demurrage") {
                        session.terms.demurrage_rate_per_day = v;
                    }
                }
                "dispatch" => {
                    if let Some(v) = parse_num(&value, "dispatch") {
                        session.terms.dispatch_rate_per_day = v;
                    }
                }
                "rate" => {
                    if let Some(v) = parse_num(&value, "rate") {
                        session.terms.loading_rate = v;
                    }
                }
                "quantity" => {
                    if let Some(v) = parse_num(&value, "quantity") {
                        session.terms.cargo_quantity = v;
                    }
                }
                "vessel" => session.vessel.vessel_name = Some(value),
                "master" => session.vessel.master = Some(value),
                "agent" => session.vessel.agent = Some(value),
                "loading" => session.vessel.port_of_loading = Some(value),
                "discharge" => session.vessel.port_of_discharge = Some(value),
                "cargo" => session.vessel.cargo_description = Some(value),
                _ => {}
            },
            Err(e) => {
                println!("Warning: {}", e);
            }
        }
    }

    service.update_terms(session.terms)?;
    service.update_vessel(session.vessel)?;
    println!(
        "Terms updated: allowed {} days, demurrage {}/day, dispatch {}/day.",
        session.terms.allowed_laytime_days,
        session.terms.demurrage_rate_per_day,
        session.terms.dispatch_rate_per_day
    );
    Ok(())
}

fn parse_num(value: &str, label: &str) -> Option<f64> {
    match value.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            println!("Warning: ignoring {}: '{}' is not a number", label, value);
            None
        }
    }
}
