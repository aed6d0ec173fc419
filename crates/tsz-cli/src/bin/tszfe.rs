//! `tszfe` — demonstration binary for the front-end compilation core.
//!
//! Reads one file, runs it through [`tsz_core::parse`], and prints the
//! diagnostic log's rendered output to stderr (`spec.md` §6 "CLI
//! demonstration binary"). Exit code is `0` on a clean parse, `1`
//! otherwise — the outer bundler CLI this crate stands in for owns richer
//! exit-code semantics, out of scope here (`spec.md` §6 "Exit codes are
//! set by the outer driver").

use std::process::ExitCode;

use clap::Parser;
use rustc_hash::FxHashMap;
use tsz_cli::args::CliArgs;
use tsz_cli::driver::{self, ThresholdLog};
use tsz_common::StderrLog;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let preflight = tsz_common::preparse_log_args(&argv);

    let args = CliArgs::parse();
    let color = driver::resolve_color_mode(&args, &preflight);
    let limit = driver::resolve_log_limit(&args, &preflight);
    let level = driver::resolve_log_level(&args, &preflight);

    let base_log = StderrLog::new(limit, FxHashMap::default(), color);
    let log = ThresholdLog::new(&base_log, level);

    let source = match driver::read_source(&args.path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("tszfe: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    base_log.register_source(source.clone());

    match driver::run(&args, &source, &log) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("tszfe: {err:#}");
            ExitCode::FAILURE
        }
    }
}
