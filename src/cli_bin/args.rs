//! Command-line argument definitions and parsing
//!
//! This module provides the clap definitions for the docpath CLI, plus the
//! conversion of the global formatting flags into a library [`Config`].

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use docpath::{Config, SourceFormat};
use std::fs;
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser, Debug)]
#[command(
    name = "docpath",
    version,
    about = "Query JSON and YAML documents by path and convert between them",
    long_about = "docpath reads JSON and YAML documents, resolves slash-separated paths \
                  (user/tags/[0]) or dotted paths ($.user.tags[0]) against them, and \
                  re-emits whole documents or subtrees as YAML or JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub config: ConfigOptions,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the node at a path
    Get(GetArgs),
    /// Print the type tag of the node at a path
    Type(QueryArgs),
    /// Check whether a path resolves to a node
    Exists(QueryArgs),
    /// Count the keys or elements of the node at a path
    Count(QueryArgs),
    /// Re-emit whole documents as YAML or JSON
    Convert(ConvertArgs),
}

/// Formatting and lookup options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Load settings from a YAML or JSON file
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Type tag printed when a path does not resolve
    #[arg(long, global = true, value_name = "MARKER")]
    pub not_found_marker: Option<String>,

    /// Indent added per nested map level in YAML output
    #[arg(long, global = true, value_name = "STRING")]
    pub indent: Option<String>,

    /// Quote every string in YAML output
    #[arg(long, global = true)]
    pub force_quotes: bool,

    /// Emit this map key first (repeatable)
    #[arg(long = "key-order", global = true, value_name = "KEY")]
    pub key_order: Vec<String>,
}

impl ConfigOptions {
    /// Build the configuration: the `--config` file if given, then the
    /// command-line overrides on top
    pub fn load(&self) -> Result<Config> {
        let mut config = match &self.config_file {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                let parsed = match SourceFormat::from_path(path) {
                    Some(SourceFormat::Json) => Config::from_json_str(&text),
                    _ => Config::from_yaml_str(&text),
                };
                parsed.with_context(|| format!("invalid config {}", path.display()))?
            }
            None => Config::default(),
        };

        if let Some(marker) = &self.not_found_marker {
            config.not_found_marker = marker.clone();
        }
        if let Some(indent) = &self.indent {
            config.yaml_indent = indent.clone();
        }
        if self.force_quotes {
            config.force_yaml_quotes = true;
        }
        if !self.key_order.is_empty() {
            config.preferred_key_order = self.key_order.clone();
        }
        Ok(config)
    }
}

/// A document file and a path inside it
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// JSON or YAML file to read
    pub file: PathBuf,

    /// Path to resolve, e.g. user/tags/[0] or $.user.tags[0]
    pub path: String,
}

/// Arguments for the get command
#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Output format for maps and sequences
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Compact JSON output
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the convert command
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Files or directories to convert
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub to: OutputFormat,

    /// Compact JSON output
    #[arg(long)]
    pub compact: bool,

    /// Write to this file instead of stdout (single input only)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_command() {
        let args = vec!["docpath", "get", "data.json", "user/name", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();

        if let Commands::Get(get_args) = cli.command {
            assert_eq!(get_args.query.file, PathBuf::from("data.json"));
            assert_eq!(get_args.query.path, "user/name");
            assert_eq!(get_args.format, OutputFormat::Json);
            assert!(!get_args.compact);
        } else {
            panic!("Expected Get command");
        }
    }

    #[test]
    fn test_convert_command() {
        let args = vec![
            "docpath", "convert", "a.json", "docs/", "--to", "yaml", "-o", "out.yaml",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        if let Commands::Convert(convert_args) = cli.command {
            assert_eq!(
                convert_args.paths,
                vec![PathBuf::from("a.json"), PathBuf::from("docs/")]
            );
            assert_eq!(convert_args.to, OutputFormat::Yaml);
            assert_eq!(convert_args.output, Some(PathBuf::from("out.yaml")));
        } else {
            panic!("Expected Convert command");
        }
    }

    #[test]
    fn test_convert_requires_paths() {
        assert!(Cli::try_parse_from(vec!["docpath", "convert", "--to", "json"]).is_err());
    }

    #[test]
    fn test_global_config_flags() {
        let args = vec![
            "docpath",
            "type",
            "data.yaml",
            "a/b",
            "--not-found-marker",
            "missing",
            "--indent",
            "    ",
            "--force-quotes",
            "--key-order",
            "id",
            "--key-order",
            "name",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let config = cli.config.load().unwrap();

        assert_eq!(config.not_found_marker, "missing");
        assert_eq!(config.yaml_indent, "    ");
        assert!(config.force_yaml_quotes);
        assert_eq!(config.preferred_key_order, vec!["id", "name"]);
    }

    #[test]
    fn test_config_file_with_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("docpath.yaml");
        fs::write(&path, "not_found_marker: absent\nyaml_indent: \"    \"\n").unwrap();

        let options = ConfigOptions {
            config_file: Some(path),
            indent: Some("\t".to_string()),
            ..ConfigOptions::default()
        };
        let config = options.load().unwrap();
        assert_eq!(config.not_found_marker, "absent");
        assert_eq!(config.yaml_indent, "\t");
    }
}
