use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitstamp::cli::{Cli, Commands};
use gitstamp::{Resolver, Store, SystemGit, WriteOptions};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let git = SystemGit::new();

    match cli.command {
        Commands::Write { path, no_timestamp } => {
            let store = Store::new(path);
            let options = WriteOptions {
                timestamp: !no_timestamp,
            };
            let record = store.write(&git, &options)?;
            println!("{}", record.version);
        }

        Commands::Show { path, format } => {
            let store = Store::new(path);
            if format == "json" {
                println!("{}", store.read_json()?);
            } else {
                let record = store.read()?;
                println!("{}", record.version);
                if !record.build_date.is_empty() {
                    println!("{}", record.build_date);
                }
            }
        }

        Commands::Resolve => {
            let version = Resolver::new(&git).resolve()?;
            println!("{version}");
        }
    }

    Ok(())
}
