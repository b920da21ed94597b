// A field is either a nested group or a leaf bound to one variable

use envfill::Populate;

#[derive(Populate)]
struct Config {
    #[env(name = "PORT", group)]
    pub port: u16,
}

fn main() {
    let config = Config { port: 0 };
    let _ = config.port;
}
