// Tuple structs have no field names to report in errors

use envfill::Populate;

#[derive(Populate)]
struct Config(pub String);

fn main() {
    let config = Config(String::new());
    let _ = config.0;
}
