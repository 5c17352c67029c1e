use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if let Err(e) = resto_engine::cli::run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
