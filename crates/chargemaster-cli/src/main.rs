mod cli;
mod logging;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;

use chargemaster_core::ChargeMasterParser;
use chargemaster_core::registry::{build_parser, default_registry};
use chargemaster_ingest::{ArtifactSet, Cell};

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init(args.verbosity.tracing_level_filter());

    match args.command {
        Command::List => {
            list();
            Ok(())
        }
        Command::Parse {
            institution,
            streams,
            rows,
        } => parse(&institution, &streams, &rows),
    }
}

fn list() {
    let registry = default_registry();
    let mut names: Vec<&str> = registry.institution_names().collect();
    names.sort_unstable();
    for name in names {
        println!("{name}");
        if let Ok(parser) = registry.build(name) {
            for url in parser.artifact_urls() {
                println!("    {url}");
            }
        }
    }
}

fn parse(institution: &str, streams: &[String], rows: &[String]) -> Result<()> {
    let parser = build_parser(institution)?;

    let mut artifacts = ArtifactSet::new();
    for binding in streams {
        let (url, path) = split_binding(binding)?;
        let file =
            File::open(path).with_context(|| format!("open stream artifact {path}"))?;
        artifacts.insert_stream(url, BufReader::new(file));
    }
    for binding in rows {
        let (url, path) = split_binding(binding)?;
        let decoded = decode_typed_csv(Path::new(path))
            .with_context(|| format!("decode rows artifact {path}"))?;
        artifacts.insert_rows(url, decoded);
    }

    let records = parser.parse_artifacts(artifacts)?;
    let mut out = BufWriter::new(std::io::stdout().lock());
    let mut emitted = 0usize;
    for record in records {
        let record = record?;
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
        emitted += 1;
    }
    out.flush()?;
    tracing::info!(institution, emitted, "parse complete");
    Ok(())
}

fn split_binding(binding: &str) -> Result<(&str, &str)> {
    match binding.split_once('=') {
        Some((url, path)) if !url.is_empty() && !path.is_empty() => Ok((url, path)),
        _ => bail!("artifact binding must be URL=PATH, got '{binding}'"),
    }
}

/// Reads a CSV file into typed cell rows: integer and decimal fields become
/// number cells, everything else stays text. This mirrors the scalar typing
/// a spreadsheet decoder would deliver.
fn decode_typed_csv(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(typed_cell).collect());
    }
    Ok(rows)
}

fn typed_cell(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Cell::Int(value);
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return Cell::Float(value);
    }
    Cell::Text(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_splits_on_first_equals() {
        let (url, path) = split_binding("https://example.org/a.csv=/tmp/a.csv").unwrap();
        assert_eq!(url, "https://example.org/a.csv");
        assert_eq!(path, "/tmp/a.csv");
        assert!(split_binding("no-separator").is_err());
    }

    #[test]
    fn typed_cells_infer_numbers() {
        assert_eq!(typed_cell("38000501"), Cell::Int(38000501));
        assert_eq!(typed_cell("1.87"), Cell::Float(1.87));
        assert_eq!(typed_cell("C1776"), Cell::Text("C1776".to_string()));
        assert_eq!(typed_cell("  "), Cell::Empty);
    }
}
