//! Basic usage example

use envfill::{Populate, PresencePolicy};

#[derive(Debug, Populate)]
struct Config {
    #[env(name = "DATABASE_URL")]
    pub database_url: String,

    #[env(name = "SERVER_ADDR")]
    pub server_addr: String,

    // Numeric type
    #[env(name = "MAX_CONNECTIONS")]
    pub max_connections: u32,

    // Boolean type
    #[env(name = "DEBUG_MODE")]
    pub debug_mode: bool,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");

    // Defaults live in the value itself; unset variables leave them alone
    let mut config = Config {
        database_url: String::new(),
        server_addr: "127.0.0.1:8080".to_string(),
        max_connections: 10,
        debug_mode: false,
    };
    envfill::populate(&mut config, PresencePolicy::Permissive)?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);

    Ok(())
}
