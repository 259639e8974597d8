mod catalog;
mod logging;
mod results;
mod session;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::catalog::load_catalog;
use crate::session::Session;
use crate::session::order::{presentation_order, presentation_order_seeded};

#[derive(Debug, Parser)]
#[command(
    name = "reverbeval",
    version,
    about = "Blind subjective evaluation of text-conditioned reverberation"
)]
struct Args {
    /// Corpus root holding category/sample-group stimulus directories.
    #[arg(long, default_value = "evaluation_samples")]
    samples_dir: PathBuf,

    /// Directory completed session records are written to.
    #[arg(long, default_value = "evaluation_results")]
    results_dir: PathBuf,

    /// Fix the presentation order; without it every run is shuffled afresh.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Catalog(#[from] catalog::CatalogError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn main() {
    logging::init();
    if let Err(err) = run(Args::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut session = build_session(&args)?;
    ui::run(&mut session, &args.results_dir)?;
    Ok(())
}

fn build_session(args: &Args) -> Result<Session, AppError> {
    let catalog = load_catalog(&args.samples_dir)?;
    let order = match args.seed {
        Some(seed) => presentation_order_seeded(catalog.len(), seed),
        None => presentation_order(catalog.len()),
    };
    Ok(Session::new(catalog, order))
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
