use anyhow::{Context, Result};
use clap::Parser;
use clippings::config::{Cli, Command, Config, default_config_path};
use clippings::export::{export_book, write_export};
use clippings::loader::read_clippings_file;
use clippings::search::{Filter, book_summaries, pick_random};
use clippings::{Clippings, parse_clippings, unpack_error};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Cli::parse();

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config_path = args
        .config_path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    let cfg = Config::load_or_default(&config_path).unwrap_or_else(|e| {
        tracing::error!(error = %unpack_error(&*e), path = ?config_path, "failed to load config file");
        std::process::exit(1);
    });

    if let Err(e) = run(args.command, &cfg) {
        tracing::error!(error = %unpack_error(&*e), "command failed");
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Command, cfg: &Config) -> Result<()> {
    match command {
        Command::Parse { file, pretty } => {
            let clippings = load(file.as_deref(), cfg)?;
            if pretty {
                println!("{}", serde_json::to_string_pretty(&clippings)?);
            } else {
                println!("{}", serde_json::to_string(&clippings)?);
            }
        }
        Command::Books { file, query } => {
            let clippings = load(file.as_deref(), cfg)?;
            let summaries = book_summaries(&clippings, &Filter::with_query(query.as_deref()));
            if summaries.is_empty() {
                println!("No books found.");
            }
            for summary in summaries {
                println!("{} ({})", summary.book, summary.count);
                println!("  > {}", summary.preview.replace('\n', " "));
            }
        }
        Command::Search {
            query,
            file,
            book,
            kind,
        } => {
            let clippings = load(file.as_deref(), cfg)?;
            let filter = Filter {
                query: Some(query),
                book_query: book,
                kinds: kind,
            };
            let found = filter.apply(&clippings);
            tracing::info!(matches = found.len(), "search complete");
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Command::Export {
            file,
            book,
            format,
            out,
            query,
        } => {
            let clippings = load(file.as_deref(), cfg)?;
            let format = format.unwrap_or(cfg.app.export_format);
            let contents = export_book(&clippings, &book, &Filter::with_query(query.as_deref()), format)?;
            let dir = out.unwrap_or_else(|| cfg.app.get_export_dir().to_path_buf());
            let path = write_export(&dir, &book, format, &contents)?;
            println!("{}", path.display());
        }
        Command::Random { file, query } => {
            let clippings = load(file.as_deref(), cfg)?;
            let found = Filter::with_query(query.as_deref()).apply(&clippings);
            match pick_random(&found, &mut rand::rng()) {
                Some(entry) => {
                    println!("{} — {} — Location {}", entry.kind, entry.book, entry.location);
                    println!("> {}", entry.text);
                }
                None => println!("No highlights found."),
            }
        }
    }

    Ok(())
}

fn load(file: Option<&Path>, cfg: &Config) -> Result<Clippings> {
    let path = file.unwrap_or_else(|| cfg.app.get_clippings_path());
    if !path.exists() {
        anyhow::bail!("No clippings file found at {}", path.display());
    }

    let content = read_clippings_file(path).context("failed to load clippings")?;
    let clippings = parse_clippings(&content);
    if clippings.is_empty() {
        tracing::warn!(path = %path.display(), "parsed 0 entries, check file validity");
    }
    Ok(clippings)
}
