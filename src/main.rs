//! Thin CLI driver: parse → validate → explicit → symbolic → deadlock →
//! optimisation (§4.6). All of the actual analysis lives in the library;
//! this binary only wires stages together and reports results.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use petri_symbolic::net::pnml;
use petri_symbolic::{deadlock, explicit, optimize, symbolic};

const DEFAULT_PNML_PATH: &str = "example.pnml";

/// Symbolic reachability, deadlock detection and objective maximisation
/// for 1-safe Petri nets.
#[derive(Parser, Debug)]
#[command(name = "petri_symbolic", version, about)]
struct Cli {
    /// Path to a PNML file. Defaults to `example.pnml` if omitted.
    path: Option<PathBuf>,

    /// Path to a batch-objectives file: one whitespace-separated integer
    /// vector of length P per non-empty line.
    #[arg(long)]
    objectives: Option<PathBuf>,

    /// Treat validation errors as fatal (default).
    #[arg(long, conflicts_with = "lenient")]
    strict: bool,

    /// Downgrade validation errors to warnings instead of aborting.
    #[arg(long)]
    lenient: bool,

    /// Override the symbolic fixpoint's iteration cap.
    #[arg(long, default_value_t = symbolic::DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let path = cli.path.unwrap_or_else(|| {
        info!(default_path = DEFAULT_PNML_PATH, "no PNML path given, using default");
        PathBuf::from(DEFAULT_PNML_PATH)
    });

    match run(&path, cli.lenient, cli.max_iterations, cli.objectives.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "pipeline failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    path: &std::path::Path,
    lenient: bool,
    max_iterations: usize,
    objectives_path: Option<&std::path::Path>,
) -> petri_symbolic::Result<()> {
    let net = pnml::load(path)?;
    println!("Loaded: {} places, {} transitions.", net.num_places(), net.num_transitions());

    let validation = net.validate(!lenient)?;
    for warning in &validation.warnings {
        println!("[WARN] {warning}");
    }

    let explicit_set = explicit::reachable(&net);
    println!("Total reachable states (explicit): {}", explicit_set.len());

    let reach = symbolic::reachable(&net, max_iterations)?;
    println!("Total reachable states (BDD): {}", reach.count);

    if explicit_set.len() as u128 == reach.count {
        println!("[SUCCESS] explicit and symbolic counts match.");
    } else {
        println!(
            "[WARNING] Mismatch! explicit found {}, BDD found {}",
            explicit_set.len(),
            reach.count
        );
    }

    match deadlock::find(&net, &reach) {
        Some(marking) => println!("Deadlock FOUND: {marking:?}"),
        None => println!("Result: No deadlock reachable."),
    }

    let all_ones: Vec<i64> = vec![1; net.num_places()];
    match optimize::maximise(&net, &reach, &all_ones)? {
        Some((marking, value)) => println!("Max value (c=all-ones): {value}, marking: {marking:?}"),
        None => println!("Result: No reachable marking found."),
    }

    if let Some(objectives_path) = objectives_path {
        let contents = std::fs::read_to_string(objectives_path)?;
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let c: Vec<i64> =
                line.split_whitespace().map(|tok| tok.parse::<i64>()).collect::<std::result::Result<_, _>>()?;
            match optimize::maximise(&net, &reach, &c)? {
                Some((marking, value)) => {
                    let marking_str: Vec<String> = marking.iter().map(|m| m.to_string()).collect();
                    println!("Max marking: {} Max value: {value}", marking_str.join(" "));
                }
                None => println!("Result: No reachable marking found."),
            }
        }
    }

    Ok(())
}
