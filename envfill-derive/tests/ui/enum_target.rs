// Populate is only meaningful for structs with named fields

use envfill::Populate;

#[derive(Populate)]
enum Mode {
    Fast,
}

fn main() {
    let _ = Mode::Fast;
}
