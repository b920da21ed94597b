//! Example demonstrating joined keys for nested groups

use envfill::{KeyMode, Populate, Populator};

#[derive(Debug, Default, Populate)]
pub struct Endpoint {
    #[env(name = "HOST")]
    pub host: String,

    #[env(name = "PORT")]
    pub port: u16,
}

#[derive(Debug, Default, Populate)]
pub struct Config {
    // Reads MYAPP_HTTP_HOST and MYAPP_HTTP_PORT
    #[env(group = "HTTP")]
    pub http: Endpoint,

    // Reads MYAPP_GRPC_HOST and MYAPP_GRPC_PORT
    #[env(group = "GRPC")]
    pub grpc: Endpoint,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP_HTTP_HOST", "0.0.0.0");
    std::env::set_var("MYAPP_HTTP_PORT", "8080");
    std::env::set_var("MYAPP_GRPC_HOST", "127.0.0.1");
    std::env::set_var("MYAPP_GRPC_PORT", "50051");

    let mut config = Config::default();
    Populator::strict()
        .key_mode(KeyMode::Joined)
        .prefix("MYAPP")
        .populate(&mut config)?;

    println!("Configuration with prefix 'MYAPP':");
    println!("  HTTP: {}:{}", config.http.host, config.http.port);
    println!("  gRPC: {}:{}", config.grpc.host, config.grpc.port);

    Ok(())
}
