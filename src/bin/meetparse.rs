//! CLI demo: parse an extracted-text JSON document and print the results.
//!
//! ```text
//! meetparse meet.json
//! RUST_LOG=debug meetparse meet.json
//! ```

use std::env;
use std::process::ExitCode;

use meetparse::{parse_document_with_meet_info, ParseConfig, TextDocument};

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: meetparse <document.json>");
        return ExitCode::FAILURE;
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> meetparse::Result<()> {
    let doc = TextDocument::from_file(path)?;
    let (results, info) = parse_document_with_meet_info(&doc, &ParseConfig::new())?;

    if let Some(name) = &info.name {
        println!("Meet: {name}");
    }
    if let Some(date) = &info.date {
        println!("Date: {date}");
    }

    let summary = results.summary();
    println!(
        "{} results ({} individual, {} relay) across {} events, {} teams",
        summary.total_results,
        summary.individual_results,
        summary.relay_results,
        summary.events,
        summary.teams
    );

    let mut current_event = None;
    for result in &results {
        if current_event != Some(result.event_number) {
            current_event = Some(result.event_number);
            println!("\n{}", result.event_name);
        }
        let place = result
            .place
            .map_or_else(|| "---".to_string(), |p| p.to_string());
        println!(
            "  {:>3} {:<30} {:<12} {}",
            place, result.name, result.team, result.finals_time
        );
    }
    Ok(())
}
