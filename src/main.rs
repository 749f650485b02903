//! jsonchef CLI — cook JSON documents with declarative recipes.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "jsonchef",
    version,
    about = "Declarative JSON-to-JSON transformation: cook a material document with a recipe"
)]
struct Cli {
    #[command(subcommand)]
    command: jsonchef::cli::Commands,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = jsonchef::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
