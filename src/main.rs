use clap::Parser;

use authorship::cli::{run, Cli};
use authorship::observability::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    run(Cli::parse()).await
}
