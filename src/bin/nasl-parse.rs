//! `nasl-parse`: parse NASL scripts and report what happened.
//!
//! Every file is parsed on its own; one failing file does not stop the run.
//! The exit code is non-zero when any file failed.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use bumpalo::Bump;
use clap::Parser as CliParser;
use nasl::{AstPrinter, KindCounter, NaslError, ParseOptions, Visitor};
use rustc_hash::FxHashMap;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Parse NASL scripts and report syntax errors
#[derive(CliParser, Debug)]
#[command(name = "nasl-parse")]
#[command(version, about, long_about = None)]
struct Args {
    /// Script files to parse
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Keep going after syntax errors and report each one
    #[arg(short, long)]
    recover: bool,

    /// Give up on a file after this many syntax errors (0 for no limit)
    #[arg(long, value_name = "N", default_value_t = ParseOptions::default().max_errors)]
    max_errors: usize,

    /// Reject scripts whose blocks and expressions nest deeper than this
    #[arg(long, value_name = "N", default_value_t = ParseOptions::default().max_depth)]
    max_depth: usize,

    /// Print the parsed tree
    #[arg(long)]
    dump: bool,

    /// Print node counts by kind
    #[arg(long)]
    stats: bool,

    /// More logging; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn options(&self) -> ParseOptions {
        ParseOptions {
            recovery: self.recover,
            max_errors: self.max_errors,
            max_depth: self.max_depth,
        }
    }
}

/// How one file fared.
enum Outcome {
    Clean,
    Recovered(usize),
    Failed(NaslError),
}

#[derive(Default)]
struct Summary {
    clean: usize,
    recovered: usize,
    failed: usize,
    unreadable: usize,
    by_category: FxHashMap<&'static str, usize>,
}

impl Summary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Clean => self.clean += 1,
            Outcome::Recovered(_) => self.recovered += 1,
            Outcome::Failed(err) => {
                self.failed += 1;
                *self.by_category.entry(err.category()).or_insert(0) += 1;
            }
        }
    }

    fn is_success(&self) -> bool {
        self.failed == 0 && self.unreadable == 0
    }

    fn print(&self) {
        println!(
            "{} ok, {} recovered, {} failed, {} unreadable",
            self.clean, self.recovered, self.failed, self.unreadable
        );
        let mut categories: Vec<_> = self.by_category.iter().collect();
        categories.sort();
        for (category, count) in categories {
            println!("  {category}: {count}");
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(level);
    Registry::default().with(layer).init();
}

fn parse_file(path: &Path, args: &Args) -> Result<Outcome> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let arena = Bump::new();
    let (script, errors) = match nasl::parse_with(&source, &arena, &args.options()) {
        Ok(parsed) => parsed,
        Err(err) => {
            println!("{}: {}", path.display(), err.category());
            if let NaslError::Syntax(parse_err) | NaslError::Unimplemented(parse_err) = &err {
                println!("{}", parse_err.display_with_source(&source));
            } else {
                println!("  {err}");
            }
            return Ok(Outcome::Failed(err));
        }
    };

    for err in &errors {
        println!("{}: recovered", path.display());
        println!("{}", err.display_with_source(&source));
    }

    if args.dump {
        println!("{}", AstPrinter::new().print(script.root()));
    }
    if args.stats {
        let mut counter = KindCounter::new();
        counter.visit_script(&script);
        for (kind, count) in counter.sorted() {
            println!("  {kind}: {count}");
        }
    }

    tracing::info!(file = %path.display(), instructions = script.instructions().len(), "parsed");

    Ok(if errors.is_empty() {
        Outcome::Clean
    } else {
        Outcome::Recovered(errors.len())
    })
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut summary = Summary::default();
    for path in &args.files {
        match parse_file(path, &args) {
            Ok(outcome) => {
                if let Outcome::Recovered(count) = outcome {
                    tracing::info!(file = %path.display(), diagnostics = count, "recovered");
                }
                summary.record(&outcome);
            }
            Err(err) => {
                eprintln!("error: {err:#}");
                summary.unreadable += 1;
            }
        }
    }

    summary.print();
    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
