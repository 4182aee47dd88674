mod commands;

use commands::{execute, Command};
use gloomdeck_core::{EventBus, Table, TableConfig};
use gloomdeck_data::{apply_env_overrides, config_path_from_env, load_catalog, load_config};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
struct CliOptions {
    seed: Option<u64>,
    catalog: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    if options.seed.is_none() {
                        warn!(value = %value, "ignoring --seed that is not a number");
                    }
                    idx += 1;
                }
            }
            "--catalog" => {
                if let Some(value) = args.get(idx + 1) {
                    options.catalog = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--config" => {
                if let Some(value) = args.get(idx + 1) {
                    options.config = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let config_path = options.config.clone().or_else(config_path_from_env);
    let mut config: TableConfig = load_config(config_path.as_deref())?;
    apply_env_overrides(&mut config)?;
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    if options.catalog.is_some() {
        config.catalog = options.catalog.clone();
    }

    let catalog = load_catalog(&config)?;
    let mut table = Table::new(&config, catalog)?;
    let mut events = EventBus::default();
    info!(seed = table.seed(), decks = table.decks().len(), "table ready");
    println!("seed {} (type help for commands)", table.seed());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => println!("{}", execute(&mut table, &mut events, command)),
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

/// Logs go to stderr and stay quiet unless `RUST_LOG` asks for more.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
