//! Reading marketplace exports from disk.
//!
//! Every failure here is per-source: the caller logs it, records it, and
//! moves on to the next file.

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use marketplace_core::models::Record;
use marketplace_core::parse::parse_source;

use crate::config::SourcesConfig;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("source not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to decode JSON from {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Listable records from one source file.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub path: PathBuf,
    pub records: Vec<Record>,
    pub total: usize,
    pub discarded: usize,
}

/// Read and filter one JSON export.
pub fn load_source(path: &Path) -> Result<LoadedSource, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let parsed = parse_source(&content).map_err(|e| LoadError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if parsed.discarded > 0 {
        tracing::info!(
            source = %path.display(),
            discarded = parsed.discarded,
            "excluded listings with initial_price <= 0"
        );
    }
    tracing::info!(
        source = %path.display(),
        retained = parsed.records.len(),
        "loaded source"
    );

    Ok(LoadedSource {
        path: path.to_path_buf(),
        records: parsed.records,
        total: parsed.total,
        discarded: parsed.discarded,
    })
}

/// Expand the sources config into an ordered list of files.
///
/// A missing `dir`, and any entry under it that cannot be read, is logged
/// and skipped, matching how missing files are handled at load time.
pub fn resolve_source_paths(config: &SourcesConfig) -> Result<Vec<PathBuf>> {
    let mut paths = config.files.clone();

    let Some(root) = &config.dir else {
        return Ok(paths);
    };

    if !root.is_dir() {
        tracing::warn!(dir = %root.display(), "sources.dir does not exist, skipping");
        return Ok(paths);
    }

    let include_set = build_globset(&config.include_globs)?;
    let exclude_set = build_globset(&config.exclude_globs)?;

    let mut discovered: Vec<(String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(root).follow_links(config.follow_symlinks) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %root.display(), "skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }

        discovered.push((rel_str, path.to_path_buf()));
    }

    // Sort for deterministic ordering
    discovered.sort_by(|a, b| a.0.cmp(&b.0));
    tracing::debug!(dir = %root.display(), count = discovered.len(), "discovered sources");

    paths.extend(discovered.into_iter().map(|(_, p)| p));
    Ok(paths)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
