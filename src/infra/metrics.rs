// ============================================================
// Layer 6 — Metric Streams
// ============================================================
// One SummaryWriter per stream: the train stream lives under
// graphs_train_dir, the test stream under graphs_test_dir.
// Each report appends one CSV row at the report's iteration.
//
// Output file: {graphs_dir}/{model_name}.csv
//
//   iteration,prefix,loss,accuracy,tpr,fpr
//   2000,test,0.412311,0.861200,0.803100,0.072400
//   4000,test,0.355002,0.880100,0.840000,0.069900
//
// The header is written only when the file is new, so repeated
// runs of the same model name append to one history.

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use crate::domain::{flow::Evaluation, traits::SummarySink};

pub struct SummaryWriter {
    csv_path: PathBuf,
}

impl SummaryWriter {
    pub fn new(dir: impl AsRef<Path>, model_name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create graphs directory '{}'", dir.display()))?;

        let csv_path = dir.join(format!("{model_name}.csv"));

        if !csv_path.exists() {
            let mut w = csv::Writer::from_path(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            w.write_record(["iteration", "prefix", "loss", "accuracy", "tpr", "fpr"])?;
            w.flush()?;
            tracing::debug!("Created metric stream: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

impl SummarySink for SummaryWriter {
    fn add_summary(&mut self, summary: &Evaluation, iteration: usize) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        let mut w = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        w.write_record([
            iteration.to_string(),
            summary.prefix.as_str().to_string(),
            format!("{:.6}", summary.loss),
            format!("{:.6}", summary.accuracy),
            format!("{:.6}", summary.tpr),
            format!("{:.6}", summary.fpr),
        ])?;
        w.flush()?;
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flow::EvalPrefix;

    #[test]
    fn test_appends_rows_after_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = SummaryWriter::new(dir.path().join("test"), "m").unwrap();
        let eval = Evaluation { prefix: EvalPrefix::Test, loss: 0.5, accuracy: 0.75, tpr: 1.0, fpr: 0.25 };

        w.add_summary(&eval, 2000).unwrap();
        w.add_summary(&eval, 4000).unwrap();

        let text = fs::read_to_string(w.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "iteration,prefix,loss,accuracy,tpr,fpr");
        assert_eq!(lines[1], "2000,test,0.500000,0.750000,1.000000,0.250000");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_reopening_does_not_repeat_header() {
        let dir = tempfile::tempdir().unwrap();
        SummaryWriter::new(dir.path(), "m").unwrap();
        let w = SummaryWriter::new(dir.path(), "m").unwrap();

        let text = fs::read_to_string(w.csv_path()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
