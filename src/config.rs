use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::ExportFormat;
use crate::model::ClippingKind;

#[derive(Parser, Debug)]
#[command(name = "clippings")]
#[command(about = "Search and export highlights from an e-reader clippings file", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config", global = true)]
    pub config_path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every entry as JSON
    Parse {
        file: Option<PathBuf>,
        #[arg(short, long)]
        pretty: bool,
    },
    /// List books with their entry counts
    Books {
        file: Option<PathBuf>,
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Find entries whose text contains QUERY
    Search {
        query: String,
        file: Option<PathBuf>,
        #[arg(short, long)]
        book: Option<String>,
        #[arg(short, long, value_parser = parse_kind)]
        kind: Vec<ClippingKind>,
    },
    /// Write one book's entries to a CSV or Markdown file
    Export {
        file: Option<PathBuf>,
        #[arg(short, long)]
        book: String,
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show one entry at random
    Random {
        file: Option<PathBuf>,
        #[arg(short, long)]
        query: Option<String>,
    },
}

fn parse_kind(s: &str) -> Result<ClippingKind, String> {
    ClippingKind::from_str(s).ok_or_else(|| format!("unknown kind '{}'", s))
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".clippings")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_clippings_path")]
    clippings_path: PathBuf,
    #[serde(default = "default_export_dir")]
    export_dir: PathBuf,
    #[serde(default)]
    pub export_format: ExportFormat,
}

fn default_clippings_path() -> PathBuf {
    PathBuf::from("My Clippings.txt")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for App {
    fn default() -> Self {
        App {
            clippings_path: default_clippings_path(),
            export_dir: default_export_dir(),
            export_format: ExportFormat::default(),
        }
    }
}

impl App {
    pub fn get_clippings_path(&self) -> &Path {
        &self.clippings_path
    }

    pub fn get_export_dir(&self) -> &Path {
        &self.export_dir
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: App,
}

impl Config {
    pub fn new(path: &Path) -> Result<Self> {
        let cfg = Config::load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        Ok(cfg)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Config::new(path)
    }

    fn load_config(path: &Path) -> Result<Config> {
        let yaml_str = fs::read_to_string(path)?;
        Config::from_yaml(&yaml_str)
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Config> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str);
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }

    fn substitute_env_vars(yaml_str: &str) -> String {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            let Some(end) = result[actual_start..].find('}') else {
                break;
            };
            let var_name = &result[actual_start + 2..actual_start + end];

            // ${VAR:-default}
            let env_value = if let Some(default_start) = var_name.find(":-") {
                let actual_var = &var_name[..default_start];
                let default_val = &var_name[default_start + 2..];
                env::var(actual_var).unwrap_or_else(|_| default_val.to_string())
            } else {
                env::var(var_name).unwrap_or_else(|_| {
                    tracing::warn!(var = %var_name, "environment variable not found");
                    String::new()
                })
            };

            result.replace_range(actual_start..actual_start + end + 1, &env_value);
            offset = actual_start + env_value.len();
        }

        result
    }
}
