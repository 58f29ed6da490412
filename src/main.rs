//! Command line runner: `fuzzaction <action> [argument ...]`
//!
//! Every argument is read in literal syntax (`123`, `"text"`, `true`,
//! `[1, 2]`, `foo(bar)`); anything that does not parse is passed on as a
//! plain string. The return list is printed one term per line, followed by the
//! defuzzified verdict.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fuzzaction::action::ActionName;
use fuzzaction::dispatch::Dispatcher;
use fuzzaction::literal::parse_term;
use fuzzaction::settings::Settings;
use fuzzaction::term::Term;

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&settings);

    let mut args = std::env::args().skip(1);
    let Some(name) = args.next() else {
        eprintln!("usage: fuzzaction <action> [argument ...] | fuzzaction --list");
        return ExitCode::from(2);
    };
    let dispatcher = Dispatcher::with_generic_actions(&settings.print.separator);
    if name == "--list" {
        for name in dispatcher.names() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    let arguments: Vec<Term> = args
        .map(|arg| parse_term(&arg).unwrap_or_else(|_| Term::from(arg)))
        .collect();
    let context = match settings.context("command line") {
        Ok(context) => context,
        Err(e) => {
            error!(error = %e, "cannot create context");
            return ExitCode::FAILURE;
        }
    };
    info!(action = %name, arguments = arguments.len(), "invoking");

    let mut returns = Vec::new();
    match dispatcher.invoke(&ActionName::parse(&name), false, &context, &arguments, &mut returns) {
        Ok(verdict) => {
            for term in &returns {
                println!("{term}");
            }
            println!("verdict: {}", context.defuzzify(verdict));
            ExitCode::SUCCESS
        }
        Err(e) => {
            for term in &returns {
                println!("{term}");
            }
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
