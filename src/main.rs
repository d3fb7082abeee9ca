use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envseal::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Library logs go to stderr so decrypted output on stdout stays clean.
    let filter = EnvFilter::try_from_env("ENVSEAL_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envseal=info")
        } else {
            EnvFilter::new("envseal=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match cli.command {
        Commands::Keygen {
            ref alias,
            ref key_type,
            force,
        } => envseal::cli::commands::keygen::execute(&cli, alias, key_type.as_deref(), force),
        Commands::Encrypt {
            ref alias,
            ref names,
            ref key_type,
        } => envseal::cli::commands::encrypt::execute(&cli, alias, names, key_type.as_deref()),
        Commands::Decrypt {
            ref alias,
            ref names,
            ref key_type,
            ref format,
        } => envseal::cli::commands::decrypt::execute(
            &cli,
            alias,
            names,
            key_type.as_deref(),
            format,
        ),
    };

    if let Err(e) = result {
        envseal::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
