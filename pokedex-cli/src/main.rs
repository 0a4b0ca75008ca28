//! Entry point for the `pokedex` command.
#![forbid(unsafe_code)]

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = pokedex_cli::run() {
        eprintln!("pokedex: {err}");
        std::process::exit(1);
    }
}
