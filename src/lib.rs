pub mod cli;
pub mod config;
pub mod edit;
pub mod formats;
pub mod metrics;
pub mod model;
pub mod render;
pub mod session;
pub mod slice;
pub mod viewport;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
