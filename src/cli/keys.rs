//! Secret generation and password hashing helpers

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use clap::Args;
use rand::RngCore;

use crate::infrastructure::identity::{Argon2Hasher, PasswordHasher};

const MIN_SECRET_BYTES: usize = 32;

#[derive(Args, Debug)]
pub struct GenerateSecretArgs {
    /// Number of random bytes before encoding
    #[arg(long, default_value_t = MIN_SECRET_BYTES)]
    pub bytes: usize,
}

#[derive(Args, Debug)]
pub struct HashPasswordArgs {
    pub password: String,
}

/// Print a base64url secret
pub fn generate_secret(args: &GenerateSecretArgs) -> anyhow::Result<()> {
    println!("{}", random_secret(args.bytes)?);
    Ok(())
}

/// Print the PHC string for a password
pub fn hash_password(args: &HashPasswordArgs) -> anyhow::Result<()> {
    let hash = Argon2Hasher::new().hash(&args.password)?;
    println!("{}", hash);
    Ok(())
}

fn random_secret(bytes: usize) -> anyhow::Result<String> {
    if bytes < MIN_SECRET_BYTES {
        anyhow::bail!("Secrets must be at least {} bytes", MIN_SECRET_BYTES);
    }

    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);

    Ok(URL_SAFE_NO_PAD.encode(&buf))
}
