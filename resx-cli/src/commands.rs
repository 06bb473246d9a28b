// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use chrono::{DateTime, Utc};
use console::style;
use resx_core::{ExplorerConfig, ResourceLocation, ResxError, ResxResult};
use resx_explorer::ResourceExplorer;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tabled::{Table, Tabled};

/// Format a timestamp for display
fn format_time(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format a location kind
fn format_kind(location: &ResourceLocation) -> String {
    match location {
        ResourceLocation::OnDisk(_) => style("disk").cyan().to_string(),
        ResourceLocation::InArchive { .. } => style("archive").magenta().to_string(),
    }
}

#[derive(Serialize)]
struct Listing<'a> {
    root: &'a str,
    recursive: bool,
    files: &'a [String],
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// List resources
pub fn ls(config: ExplorerConfig, path: &str, recursive: bool, json: bool) -> ResxResult<()> {
    let explorer = ResourceExplorer::from_config(config);
    let mut files = explorer.list_resources(path, recursive)?;
    files.sort();

    if json {
        let listing = Listing { root: path, recursive, files: &files };
        let text = serde_json::to_string_pretty(&listing).map_err(|e| ResxError::Io(e.into()))?;
        println!("{text}");
    } else if files.is_empty() {
        println!("(no resources)");
    } else {
        for file in &files {
            println!("{file}");
        }
    }

    Ok(())
}

/// Write resource bytes to stdout
pub fn cat(config: ExplorerConfig, path: &str) -> ResxResult<()> {
    let explorer = ResourceExplorer::from_config(config);
    let bytes = explorer.read_bytes(path)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.flush()?;
    Ok(())
}

/// Print where a resource lives
pub fn resolve(config: ExplorerConfig, path: &str) -> ResxResult<()> {
    let explorer = ResourceExplorer::from_config(config);
    let location = explorer.resolve(path)?;
    println!("{} {}", format_kind(&location), location);
    Ok(())
}

/// Show resource information
pub fn stat(config: ExplorerConfig, path: &str) -> ResxResult<()> {
    let explorer = ResourceExplorer::from_config(config);
    let location = explorer.resolve(path)?;
    let size = explorer.read_bytes(path)?.len() as u64;
    let modified = explorer.resource_modified(path)?;

    let (container, entry) = match &location {
        ResourceLocation::OnDisk(file) => (file.display().to_string(), "-".to_string()),
        ResourceLocation::InArchive { archive, entry } => (archive.display().to_string(), entry.clone()),
    };

    let rows = vec![
        StatRow { field: "Resource", value: path.to_string() },
        StatRow { field: "Kind", value: format_kind(&location) },
        StatRow { field: "Container", value: container },
        StatRow { field: "Entry", value: entry },
        StatRow { field: "Size", value: format!("{} ({})", size, bytesize::ByteSize(size)) },
        StatRow { field: "Modified", value: format_time(modified) },
    ];
    println!("{}", Table::new(rows));
    Ok(())
}

/// List regular files of a host directory
pub fn files(config: ExplorerConfig, dir: &Path, recursive: bool) -> ResxResult<()> {
    let mut files = resx_storage::list_files(dir, &config.list_options(recursive))?;
    files.sort();

    if files.is_empty() {
        println!("(empty directory)");
    } else {
        for file in files {
            println!("{file}");
        }
    }
    Ok(())
}

/// Gzip a host file, removing the original
pub fn gzip(config: ExplorerConfig, source: &Path, dest: &Path) -> ResxResult<()> {
    let explorer = ResourceExplorer::from_config(config);
    explorer.compress_file(source, dest)?;
    println!("Compressed {} -> {}", source.display(), style(dest.display()).green());
    Ok(())
}

/// Open a host file with the default application
pub fn open(config: ExplorerConfig, path: &Path) -> ResxResult<()> {
    let explorer = ResourceExplorer::from_config(config);
    explorer.open_file(path)?;
    tracing::debug!("Opened {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(None), "-");
        let dt = DateTime::parse_from_rfc3339("2024-03-01T12:30:00Z").unwrap().with_timezone(&Utc);
        assert_eq!(format_time(Some(dt)), "2024-03-01 12:30");
    }

    #[test]
    fn test_listing_json_shape() {
        let files = vec!["ui/theme.toml".to_string()];
        let listing = Listing { root: "ui", recursive: false, files: &files };
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["root"], "ui");
        assert_eq!(value["files"][0], "ui/theme.toml");
    }

    #[test]
    fn test_format_kind_names_mode() {
        let disk = format_kind(&ResourceLocation::OnDisk(PathBuf::from("/tmp/a")));
        let archive = format_kind(&ResourceLocation::InArchive {
            archive: PathBuf::from("/tmp/a.zip"),
            entry: "assets".to_string(),
        });
        assert!(console::strip_ansi_codes(&disk).contains("disk"));
        assert!(console::strip_ansi_codes(&archive).contains("archive"));
    }
}
