//! CLI command handlers that bridge CLI arguments to library operations
//!
//! Each handler writes to the given output and returns whether the command
//! succeeded; `false` maps to exit status 1 (path not found).

use crate::cli_bin::args::*;
use anyhow::{bail, Context, Result};
use docpath::core::value::format_timestamp;
use docpath::{read_document, resolve_files, write_atomic, Config, Document, JsonWriter, Node};
use log::{debug, info, warn};
use std::io::Write;
use std::path::Path;

/// Dispatch a parsed command line
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<bool> {
    let config = cli.config.load()?;
    debug!("Effective configuration: {:?}", config);

    match cli.command {
        Commands::Get(args) => get_command(&args, &config, out),
        Commands::Type(args) => type_command(&args, &config, out),
        Commands::Exists(args) => exists_command(&args, &config, out),
        Commands::Count(args) => count_command(&args, &config, out),
        Commands::Convert(args) => convert_command(&args, &config, out),
    }
}

fn load(path: &Path, config: &Config) -> Result<Document> {
    let document =
        read_document(path).with_context(|| format!("failed to load {}", path.display()))?;
    Ok(document.with_config(config.clone()))
}

/// Execute the get command
pub fn get_command(args: &GetArgs, config: &Config, out: &mut dyn Write) -> Result<bool> {
    let document = load(&args.query.file, config)?;

    let node = match document.get(&args.query.path) {
        Some(node) => node,
        None => {
            writeln!(out, "{}", config.not_found_marker)?;
            return Ok(false);
        }
    };

    if node.is_container() {
        let (subtree, _) = document.get_subtree_by_path(&args.query.path);
        let subtree = subtree.with_config(config.clone());
        write!(out, "{}", render(&subtree, args.format, args.compact))?;
    } else {
        writeln!(out, "{}", scalar_text(node, config))?;
    }
    Ok(true)
}

/// Execute the type command
pub fn type_command(args: &QueryArgs, config: &Config, out: &mut dyn Write) -> Result<bool> {
    let document = load(&args.file, config)?;
    let (node, tag) = document.get_node_by_path(&args.path);
    writeln!(out, "{}", tag)?;
    Ok(node.is_some())
}

/// Execute the exists command
pub fn exists_command(args: &QueryArgs, config: &Config, out: &mut dyn Write) -> Result<bool> {
    let document = load(&args.file, config)?;
    let exists = document.node_exists(&args.path);
    writeln!(out, "{}", exists)?;
    Ok(exists)
}

/// Execute the count command
pub fn count_command(args: &QueryArgs, config: &Config, out: &mut dyn Write) -> Result<bool> {
    let document = load(&args.file, config)?;
    writeln!(out, "{}", document.get_count_descendants_by_path(&args.path))?;
    Ok(true)
}

/// Execute the convert command
pub fn convert_command(args: &ConvertArgs, config: &Config, out: &mut dyn Write) -> Result<bool> {
    let files = resolve_files(&args.paths)?;
    if files.is_empty() {
        warn!("No files found to process");
        return Ok(true);
    }

    if let Some(output) = &args.output {
        if files.len() != 1 {
            bail!(
                "--output needs exactly one input document, found {}",
                files.len()
            );
        }
        let document = load(&files[0], config)?;
        write_atomic(output, &render(&document, args.to, args.compact))
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!("Wrote: {}", output.display());
        return Ok(true);
    }

    for file in &files {
        debug!("Converting file: {}", file.display());
        let document = load(file, config)?;
        write!(out, "{}", render(&document, args.to, args.compact))?;
    }
    Ok(true)
}

fn render(document: &Document, format: OutputFormat, compact: bool) -> String {
    match format {
        OutputFormat::Yaml => document.yaml(),
        OutputFormat::Json if compact => format!("{}\n", document.json_compacted()),
        OutputFormat::Json => document.json_indented(),
    }
}

/// Scalars print as their JSON form, except strings and timestamps which
/// print without quotes
fn scalar_text(node: &Node, config: &Config) -> String {
    match node {
        Node::String(s) => s.clone(),
        Node::Timestamp(t) => format_timestamp(t),
        other => JsonWriter::new(config, false).render(other),
    }
}
