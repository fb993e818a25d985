//! CLI module for Token Gate
//!
//! Subcommands:
//! - `serve`: run the HTTP authentication service
//! - `generate-secret`: print a random signing secret
//! - `hash-password`: print the Argon2 hash of a password

pub mod keys;
pub mod serve;

use clap::{Parser, Subcommand};

/// Token Gate - JWT access/refresh token authentication service
#[derive(Parser)]
#[command(name = "token-gate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the authentication server
    Serve,

    /// Print a random signing secret suitable for `auth.secrets`
    GenerateSecret(keys::GenerateSecretArgs),

    /// Print the Argon2 hash of a password
    HashPassword(keys::HashPasswordArgs),
}
