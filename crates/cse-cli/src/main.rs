//! `cse` - keep only export-tagged symbols in a CoDeSys 2.3 symbol file.
//!
//! Given `Plant.SYM_XML`, reads `Plant.pro`, collects the variables tagged for
//! export and writes `Plant_CSE.SYM_XML` holding only those symbols.

mod cli;
mod paths;
mod prompt;
mod run;
mod style;

use clap::Parser;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let pause = cli.pause;
    let result = run::run_export(cli);
    if let Err(err) = &result {
        eprintln!("{}", style::error(format!("Error: {err:#}")));
    }
    if pause {
        prompt::wait_for_enter();
    }
    if result.is_err() {
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
