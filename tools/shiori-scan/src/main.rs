//! Library Scan Tool
//!
//! Walks a media library folder, resolves every directory through the default
//! resolver chain and prints one JSON line per resolved item.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use shiori_core::naming::is_metadata_file;
use shiori_core::{
    FileEntry, Item, ItemId, ParentRef, ResolutionChain, ResolveContext, ResolverConfig,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// CLI arguments
#[derive(Parser)]
#[command(name = "shiori-scan")]
#[command(about = "Resolve a media library folder tree into typed items")]
#[command(version)]
struct Cli {
    /// Library folder to scan (treated as a collection under the library root)
    root: PathBuf,

    /// JSON resolver configuration file
    #[arg(short, long, env = "SHIORI_CONFIG")]
    config: Option<PathBuf>,

    /// Disable the series naming heuristic
    #[arg(long)]
    no_heuristic: bool,

    /// Do not resolve movie folders
    #[arg(long)]
    no_movies: bool,

    /// Maximum folder depth below the root
    #[arg(short = 'd', long, default_value_t = 8)]
    max_depth: usize,
}

/// One resolved folder as printed on stdout.
#[derive(Debug, Serialize)]
pub struct ScanRecord {
    pub id: ItemId,
    pub parent_id: Option<ItemId>,
    #[serde(flatten)]
    pub item: Item,
}

fn load_config(cli: &Cli) -> Result<ResolverConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            ResolverConfig::from_json(&json)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => ResolverConfig::default(),
    };

    if cli.no_heuristic {
        config = config.with_naming_heuristic(false);
    }
    if cli.no_movies {
        config = config.with_movies(false);
    }

    Ok(config)
}

/// Lists the immediate children of `dir`, sorted by name.
fn enumerate(dir: &Path) -> Result<Vec<FileEntry>> {
    let mut children = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let Some(name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "skipping non UTF-8 name");
            continue;
        };

        children.push(if entry.file_type().is_dir() {
            FileEntry::dir(name)
        } else {
            FileEntry::file(name)
        });
    }

    Ok(children)
}

fn build_context(path: &Path, parent: ParentRef) -> Result<ResolveContext> {
    let children = enumerate(path)?;
    let metadata_files: Vec<String> = children
        .iter()
        .filter(|c| !c.is_dir && is_metadata_file(&c.name))
        .map(|c| c.name.clone())
        .collect();

    Ok(ResolveContext::directory(path)
        .with_parent(parent)
        .with_children(children)
        .with_metadata_files(metadata_files))
}

/// Resolves every directory below `root`, parents before children.
pub fn scan(chain: &ResolutionChain, root: &Path, max_depth: usize) -> Result<Vec<ScanRecord>> {
    let mut next_id = 0u64;
    let mut parents: HashMap<PathBuf, ParentRef> = HashMap::new();
    let mut records = Vec::new();

    // The scanned folder itself is a collection, never a candidate.
    parents.insert(root.to_path_buf(), ParentRef::Folder(ItemId(next_id)));
    next_id += 1;

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let Some(parent) = path.parent().and_then(|p| parents.get(p)).copied() else {
            continue;
        };

        let context = build_context(path, parent)?;
        let id = ItemId(next_id);
        next_id += 1;

        match chain.resolve(&context) {
            Some(item) => {
                parents.insert(
                    path.to_path_buf(),
                    ParentRef::Item {
                        id,
                        item_type: item.item_type,
                    },
                );
                records.push(ScanRecord {
                    id,
                    parent_id: parent.id(),
                    item,
                });
            }
            None => {
                debug!(path = %path.display(), "plain folder");
                parents.insert(path.to_path_buf(), ParentRef::Folder(id));
            }
        }
    }

    Ok(records)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let chain = ResolutionChain::with_defaults(&config).context("Failed to build resolver chain")?;

    if !cli.root.is_dir() {
        anyhow::bail!("Not a directory: {}", cli.root.display());
    }

    info!(root = %cli.root.display(), "Scanning library");
    let records = scan(&chain, &cli.root, cli.max_depth)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
    }

    info!(items = records.len(), "Scan complete");
    Ok(())
}
