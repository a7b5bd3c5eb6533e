//! CLI entry point.

use clap::Parser;

use labelkit_cli::{Cli, Commands, handlers, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve(args) => handlers::serve::execute(args).await,
        Commands::Evaluate(args) => handlers::evaluate::execute(args).await,
    }
}
