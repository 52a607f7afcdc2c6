//! Minimal CLI for running Monte Carlo majority experiments.
//!
//! `majority simulate` repeats the randomized majority search many times and
//! reports how the average draw count converges to `n/m`; `majority check`
//! shows which values of an array the majority predicate accepts.

use monte_majority::{
    is_majority, occurrences, parse_array, simulate_streams, simulate_with, write_report_json,
    write_series_csv, ConvergenceReport, ExperimentConfig, MajoritySampler, SimplePrng,
    DEFAULT_ARRAY,
};
use std::{
    env,
    io::{self, IsTerminal, Read},
    path::PathBuf,
    time::Instant,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

fn fatal(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn print_help() {
    println!("Usage: majority <simulate|check> ...");
    println!("  simulate [--array \"1 5 1 ...\" | --array -] [--runs <N>] [--seed <S>]");
    println!("           [--max-draws <D>] [--parallel] [--time] [--config <file.json>]");
    println!("           [--out <series.csv>] [--json-out <report.json>] [--json]");
    println!("  check [--array \"1 5 1 ...\" | --array -]");
    println!();
    println!("Environment: MAJORITY_RUNS, MAJORITY_SEED, MAJORITY_MAX_DRAWS,");
    println!("             MAJORITY_SERIES_OUT, MAJORITY_REPORT_OUT, RUST_LOG");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);
    if Registry::default().with(filter).with(fmt_layer).try_init().is_err() {
        eprintln!("tracing subscriber was already initialised");
    }
}

fn main() {
    init_tracing();
    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("simulate") => cmd_simulate(args.collect()),
        Some("check") => cmd_check(args.collect()),
        Some("-h") | Some("--help") => print_help(),
        _ => {
            eprintln!("Usage: majority <simulate|check> ... (see --help)");
            std::process::exit(1);
        }
    }
}

fn read_array_arg(value: &str) -> Vec<i64> {
    let text = if value == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|err| fatal(&format!("failed to read array from stdin: {err}")));
        buf
    } else {
        value.to_string()
    };
    parse_array(&text).unwrap_or_else(|err| fatal(&err.to_string()))
}

#[derive(Default)]
struct SimulateArgs {
    config: Option<PathBuf>,
    array: Option<Vec<i64>>,
    runs: Option<usize>,
    seed: Option<u64>,
    max_draws: Option<u64>,
    out: Option<PathBuf>,
    json_out: Option<PathBuf>,
    parallel: bool,
    timing: bool,
    json: bool,
}

fn parse_value<N: std::str::FromStr>(flag: &str, value: Option<String>) -> N {
    let value = value.unwrap_or_else(|| fatal(&format!("{flag} expects a value")));
    value
        .parse()
        .unwrap_or_else(|_| fatal(&format!("invalid {flag} value: {value}")))
}

fn cmd_simulate(args: Vec<String>) {
    let mut parsed = SimulateArgs::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(parse_value("--config", iter.next())),
            "--array" => {
                let value = iter
                    .next()
                    .unwrap_or_else(|| fatal("--array expects a value"));
                parsed.array = Some(read_array_arg(&value));
            }
            "--runs" | "--simulations" => parsed.runs = Some(parse_value("--runs", iter.next())),
            "--seed" => parsed.seed = Some(parse_value("--seed", iter.next())),
            "--max-draws" => parsed.max_draws = Some(parse_value("--max-draws", iter.next())),
            "--out" => parsed.out = Some(parse_value("--out", iter.next())),
            "--json-out" => parsed.json_out = Some(parse_value("--json-out", iter.next())),
            "--parallel" => parsed.parallel = true,
            "--time" => parsed.timing = true,
            "--json" => parsed.json = true,
            "-h" | "--help" => {
                print_help();
                return;
            }
            other => fatal(&format!("unknown argument: {other}")),
        }
    }
    let config = build_config(parsed);
    run_simulate(&config);
}

fn build_config(parsed: SimulateArgs) -> ExperimentConfig {
    let mut config = match &parsed.config {
        Some(path) => ExperimentConfig::load(path)
            .unwrap_or_else(|err| fatal(&format!("failed to load {}: {err}", path.display()))),
        None => ExperimentConfig::default(),
    };
    config
        .apply_env()
        .unwrap_or_else(|err| fatal(&err.to_string()));
    if let Some(array) = parsed.array {
        config.array = array;
    }
    if let Some(runs) = parsed.runs {
        config.runs = runs;
    }
    if parsed.seed.is_some() {
        config.seed = parsed.seed;
    }
    if parsed.max_draws.is_some() {
        config.max_draws = parsed.max_draws;
    }
    if parsed.out.is_some() {
        config.series_out = parsed.out;
    }
    if parsed.json_out.is_some() {
        config.report_out = parsed.json_out;
    }
    config.parallel |= parsed.parallel;
    config.timing |= parsed.timing;
    config.json |= parsed.json;
    config
}

fn run_simulate(config: &ExperimentConfig) {
    let profile = config
        .validate()
        .unwrap_or_else(|err| fatal(&err.to_string()));
    let mut sampler =
        MajoritySampler::new(&config.array).unwrap_or_else(|err| fatal(&err.to_string()));
    if let Some(limit) = config.max_draws {
        sampler = sampler
            .with_max_draws(limit)
            .unwrap_or_else(|err| fatal(&err.to_string()));
    }
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = SimplePrng::new(seed);
    tracing::info!(
        target: "majority",
        seed,
        runs = config.runs,
        len = profile.len,
        expected_draws = profile.expected_draws(),
        max_draws = sampler.max_draws(),
        parallel = config.parallel,
        "running experiment"
    );

    let start = Instant::now();
    let series = if config.parallel {
        simulate_streams(&sampler, config.runs, seed)
    } else {
        simulate_with(&sampler, config.runs, &mut rng)
    }
    .unwrap_or_else(|err| fatal(&err.to_string()));
    let elapsed = start.elapsed();

    let report = ConvergenceReport::build(&sampler, series, config.timing.then_some(elapsed), &mut rng)
        .unwrap_or_else(|err| fatal(&err.to_string()));

    if let Some(path) = &config.series_out {
        write_series_csv(path, &report.series, report.reference_mean)
            .unwrap_or_else(|err| fatal(&format!("failed to write {}: {err}", path.display())));
        if !config.json {
            println!("CSV exported to {}", path.display());
        }
    }

    if let Some(path) = &config.report_out {
        write_report_json(path, &report)
            .unwrap_or_else(|err| fatal(&format!("failed to write {}: {err}", path.display())));
        if !config.json {
            println!("Report exported to {}", path.display());
        }
    }

    if config.json {
        let json = report
            .to_json_string()
            .unwrap_or_else(|err| fatal(&err.to_string()));
        println!("{json}");
        return;
    }

    println!("Majority element is {}", report.majority);
    println!(
        "n = {}, m = {}, reference n/m = {:.6}",
        report.len, report.majority_count, report.reference_mean
    );
    println!("p = m/n = {:.6}", profile.success_probability());
    println!(
        "runs = {}, final average = {:.6} (relative error {:.3}%)",
        report.runs,
        report.final_average,
        report.relative_error * 100.0
    );
    if let Some(ms) = report.elapsed_ms {
        println!("elapsed: {ms:.3} ms");
    }
    println!("seed: {seed}");
}

fn cmd_check(args: Vec<String>) {
    let mut array: Option<Vec<i64>> = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--array" => {
                let value = iter
                    .next()
                    .unwrap_or_else(|| fatal("--array expects a value"));
                array = Some(read_array_arg(&value));
            }
            other => fatal(&format!("unknown argument: {other}")),
        }
    }
    let array = array.unwrap_or_else(|| DEFAULT_ARRAY.to_vec());
    let mut seen: Vec<i64> = Vec::new();
    println!("{:>12} | {:>8} | {:>8}", "value", "count", "accepted");
    println!("{}", "-".repeat(34));
    for &value in &array {
        if seen.contains(&value) {
            continue;
        }
        seen.push(value);
        let accepted = is_majority(&array, &value).unwrap_or_else(|err| fatal(&err.to_string()));
        println!(
            "{:>12} | {:>8} | {:>8}",
            value,
            occurrences(&array, &value),
            accepted
        );
    }
}
