//! Strict presence policy: every annotated variable must be set and valid

use envfill::{Populate, PresencePolicy};

#[derive(Debug, Default, Populate)]
struct Config {
    #[env(name = "API_KEY")]
    pub api_key: String,

    #[env(name = "TIMEOUT_SECS")]
    pub timeout_secs: u64,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("API_KEY", "secret-key-123");
    std::env::set_var("TIMEOUT_SECS", "soon");

    match Config::from_env(PresencePolicy::Strict) {
        Ok(config) => println!("Loaded: {config:?}"),
        Err(e) => {
            // The key tells the operator exactly what to fix
            println!("Error: {e}");
            println!("Fix variable: {}", e.key().unwrap_or("<unknown>"));
        }
    }

    std::env::set_var("TIMEOUT_SECS", "30");
    let config = Config::from_env(PresencePolicy::Strict)?;
    println!("Loaded: {config:?}");

    Ok(())
}
