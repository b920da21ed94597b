//! Nested groups of settings, with field-level logging enabled
//!
//! Run with `RUST_LOG=envfill=debug` to see every lookup.

use envfill::{Populate, Populator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Default, Populate)]
pub struct Pool {
    #[env(name = "POOL_MIN")]
    pub min: u32,

    #[env(name = "POOL_MAX")]
    pub max: u32,
}

#[derive(Debug, Default, Populate)]
pub struct Database {
    #[env(name = "DSN")]
    pub dsn: String,

    #[env(group)]
    pub pool: Pool,
}

#[derive(Debug, Default, Populate)]
pub struct Config {
    #[env(name = "PORT")]
    pub port: u16,

    #[env(name = "RATIO")]
    pub ratio: f64,

    // The prefix is only applied with KeyMode::Joined
    #[env(group = "DB")]
    pub database: Database,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    std::env::set_var("PORT", "9090");
    std::env::set_var("RATIO", "0.75");
    std::env::set_var("DSN", "postgres://localhost/app");
    std::env::set_var("POOL_MAX", "32");

    let mut config = Config::default();
    let summary = Populator::permissive().populate(&mut config)?;

    println!("{config:#?}");
    println!("{summary:?}");

    Ok(())
}
