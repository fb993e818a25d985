use clap::Parser;
use token_gate::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::GenerateSecret(args) => cli::keys::generate_secret(&args),
        Command::HashPassword(args) => cli::keys::hash_password(&args),
    }
}
