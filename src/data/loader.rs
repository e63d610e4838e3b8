// ============================================================
// Layer 4 — Flow CSV Loader
// ============================================================
// Loads flow records from the CSV exports of the ISCX and ISOT
// datasets.
//
// Expected layout:
//   {data_dir}/iscx/*.csv
//   {data_dir}/isot/*.csv
//
// Each CSV has a header row. For every row we keep:
//   - the label column (matched case-insensitively, whitespace trimmed)
//   - every other column that is not an identifier (IPs, ports,
//     flow IDs, timestamps), parsed as f32
//
// Values that do not parse, or parse to NaN / ±inf (CICFlowMeter
// writes "Infinity" and "NaN" for zero-duration flows), become 0.
// The feature row is then truncated or zero-padded to n_features.
//
// Files are read in file-name order so windowing is reproducible.

use anyhow::{Context, Result};
use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use crate::data::preprocessor::clean_value;
use crate::domain::kinds::DatasetKind;

/// One parsed CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRecord {
    pub features: Vec<f32>,
    pub label:    usize,
}

/// Loads every CSV of one dataset.
pub struct CsvFlowLoader {
    dir:        PathBuf,
    kind:       DatasetKind,
    n_features: usize,
}

impl CsvFlowLoader {
    pub fn new(data_dir: impl AsRef<Path>, kind: DatasetKind, n_features: usize) -> Self {
        Self {
            dir: data_dir.as_ref().join(kind.dir_name()),
            kind,
            n_features,
        }
    }

    /// Read all CSV files in the dataset directory, in name order.
    pub fn load_all(&self) -> Result<Vec<FlowRecord>> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot read dataset directory '{}'", self.dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
            })
            .collect();
        files.sort();

        if files.is_empty() {
            anyhow::bail!("No .csv files found in '{}'", self.dir.display());
        }

        let mut records = Vec::new();
        for path in &files {
            let file = fs::File::open(path)
                .with_context(|| format!("Cannot open '{}'", path.display()))?;
            let rows = parse_records(file, self.kind, self.n_features)
                .with_context(|| format!("Cannot parse '{}'", path.display()))?;
            tracing::debug!("Loaded {} flow records from '{}'", rows.len(), path.display());
            records.extend(rows);
        }

        tracing::info!(
            "Loaded {} flow records from {} file(s) for dataset '{}'",
            records.len(),
            files.len(),
            self.kind
        );
        Ok(records)
    }
}

/// Parse one CSV stream into flow records.
pub fn parse_records<R: Read>(
    reader:     R,
    kind:       DatasetKind,
    n_features: usize,
) -> Result<Vec<FlowRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().context("Missing CSV header row")?.clone();

    let label_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(kind.label_column()))
        .with_context(|| format!("No '{}' column in CSV header", kind.label_column()))?;

    let ignored = kind.ignored_columns();
    let feature_idx: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != label_idx && !ignored.contains(&h.to_lowercase().as_str()))
        .map(|(i, _)| i)
        .collect();

    let mut records = Vec::new();
    for (line, row) in rdr.records().enumerate() {
        // +2: header is line 1 and enumerate starts at 0
        let row = row.with_context(|| format!("Malformed CSV row at line {}", line + 2))?;

        let mut features: Vec<f32> = feature_idx
            .iter()
            .take(n_features)
            .map(|&i| clean_value(row.get(i).unwrap_or("")))
            .collect();
        features.resize(n_features, 0.0);

        records.push(FlowRecord {
            features,
            label: kind.class_of(row.get(label_idx).unwrap_or("")),
        });
    }

    Ok(records)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const ISCX_CSV: &str = "\
Flow ID, Source IP, Destination Port, Flow Duration, Flow Bytes/s, Label
a-b, 10.0.0.1, 80, 120, Infinity, BENIGN
c-d, 10.0.0.2, 443, 30, 12.5, DDoS
";

    #[test]
    fn test_parses_features_and_labels() {
        let records = parse_records(ISCX_CSV.as_bytes(), DatasetKind::Iscx, 3).unwrap();
        assert_eq!(records.len(), 2);
        // Flow ID and Source IP are identifiers and are dropped
        assert_eq!(records[0].features, vec![80.0, 120.0, 0.0]);
        assert_eq!(records[0].label, 0);
        assert_eq!(records[1].features, vec![443.0, 30.0, 12.5]);
        assert_eq!(records[1].label, 1);
    }

    #[test]
    fn test_pads_and_truncates_to_n_features() {
        let padded = parse_records(ISCX_CSV.as_bytes(), DatasetKind::Iscx, 5).unwrap();
        assert_eq!(padded[1].features, vec![443.0, 30.0, 12.5, 0.0, 0.0]);

        let truncated = parse_records(ISCX_CSV.as_bytes(), DatasetKind::Iscx, 1).unwrap();
        assert_eq!(truncated[1].features, vec![443.0]);
    }

    #[test]
    fn test_missing_label_column_is_an_error() {
        let csv = "a,b\n1,2\n";
        assert!(parse_records(csv.as_bytes(), DatasetKind::Isot, 2).is_err());
    }

    #[test]
    fn test_load_all_reads_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let isot = dir.path().join("isot");
        fs::create_dir_all(&isot).unwrap();
        fs::write(isot.join("b.csv"), "src_ip,bytes,label\n1.1.1.1,2,zeus\n").unwrap();
        fs::write(isot.join("a.csv"), "src_ip,bytes,label\n1.1.1.1,1,normal\n").unwrap();
        fs::write(isot.join("notes.txt"), "ignored").unwrap();

        let records = CsvFlowLoader::new(dir.path(), DatasetKind::Isot, 1).load_all().unwrap();
        assert_eq!(
            records,
            vec![
                FlowRecord { features: vec![1.0], label: 0 },
                FlowRecord { features: vec![2.0], label: 1 },
            ]
        );
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CsvFlowLoader::new(dir.path(), DatasetKind::Iscx, 4).load_all().is_err());
    }
}
