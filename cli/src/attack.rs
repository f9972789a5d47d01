use std::{io::Write, process::ExitCode};

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_BORDERS_ONLY, Cell, Color, Table};
use crackle_core::{AttackSpec, CharSet, Event, SearchCoordinator, SearchResult};
use human_repr::{HumanCount, HumanDuration, HumanThroughput};
use tracing::info;

use crate::{BruteForce, Dictionary, Hybrid, Target};

pub fn dictionary(args: Dictionary) -> Result<ExitCode> {
    let spec = AttackSpec::Dictionary {
        source: args.words.source()?,
        apply_mutations: args.mutations,
    };

    run(&args.target, spec)
}

pub fn brute_force(args: BruteForce) -> Result<ExitCode> {
    let spec = AttackSpec::BruteForce {
        min_length: args.min_len,
        max_length: args.max_len,
        charset: CharSet::resolve(&args.charset)?,
    };
    spec.validate()?;

    if let Some(estimate) = spec.estimate() {
        if !args.target.json {
            println!("Estimated combinations: {estimate}");
        }
    }

    run(&args.target, spec)
}

pub fn hybrid(args: Hybrid) -> Result<ExitCode> {
    let spec = AttackSpec::Hybrid {
        source: args.words.source()?,
        segment_length: args.append_len,
        charset: CharSet::resolve(&args.charset)?,
        placement: args.hybrid_mode,
    };

    run(&args.target, spec)
}

/// Runs a search in the background, rendering its progress until it is finished.
/// Ctrl-C stops the search and still prints the statistics gathered so far.
fn run(target: &Target, spec: AttackSpec) -> Result<ExitCode> {
    let oracle = target.oracle()?;
    info!("Cracking a {} digest", oracle.hash_function());

    let coordinator = SearchCoordinator::builder(oracle)
        .concurrency(target.threads as usize)
        .batch_size(target.batch_size as usize)
        .build();

    let handle = coordinator.search_nonblocking(spec);

    let token = handle.token();
    ctrlc::set_handler(move || token.cancel()).context("Unable to set the Ctrl-C handler")?;

    let mut stderr = std::io::stderr();
    while let Some(event) = handle.recv() {
        match event {
            Event::Progress { attempts, elapsed } if !target.json => {
                let _ = write!(
                    stderr,
                    "\r{} attempts in {}",
                    attempts.human_count_bare(),
                    elapsed.as_secs_f64().human_duration()
                );
            }
            Event::Progress { .. } => (),
            Event::Found(password) => info!("Password found: {password}"),
        }
    }
    if !target.json {
        let _ = writeln!(stderr);
    }

    let result = handle.join()?;

    if target.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_stats(&result);
    }

    if result.interrupted() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Prints the outcome of a search.
fn print_stats(result: &SearchResult) {
    let mut display_table = Table::new();
    display_table.load_preset(UTF8_BORDERS_ONLY);
    display_table.set_header(vec!["Statistic", "Value"]);

    let status = if result.success() {
        Cell::new("Found").fg(Color::Green)
    } else if result.interrupted() {
        Cell::new("Interrupted").fg(Color::Yellow)
    } else {
        Cell::new("Exhausted").fg(Color::Red)
    };

    let password = result
        .password()
        .map(|password| Cell::new(password).fg(Color::Green))
        .unwrap_or_else(|| Cell::new("No password found").fg(Color::Grey));

    display_table.add_row(vec![Cell::new("Status"), status]);
    display_table.add_row(vec![Cell::new("Password"), password]);
    display_table.add_row(vec![
        Cell::new("Attempts"),
        Cell::new(result.attempts().human_count_bare()),
    ]);
    display_table.add_row(vec![
        Cell::new("Duration"),
        Cell::new(result.elapsed().as_secs_f64().human_duration()),
    ]);
    display_table.add_row(vec![
        Cell::new("Rate"),
        Cell::new(result.rate().human_throughput("H")),
    ]);

    println!("{display_table}");
}
