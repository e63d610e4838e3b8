// ============================================================
// Layer 2 — Evaluate Use Case
// ============================================================
// Re-scores a saved checkpoint against the test split:
//   1. Rebuild the architecture named by model_type
//   2. Reload and re-split the dataset with the same seed
//   3. Restore weights from {checkpoints_dir}{model_name}-{iteration}
//   4. Evaluate the whole test split

use anyhow::Result;
use burn::backend::ndarray::NdArrayDevice;

use crate::application::train_use_case::TrainConfig;
use crate::data::load_dataset;
use crate::domain::{
    flow::{EvalPrefix, Evaluation},
    kinds::{DatasetKind, ModelKind},
    traits::TrafficClassifier,
};
use crate::ml::trainer::FlowClassifier;

pub struct EvaluateUseCase {
    config:    TrainConfig,
    iteration: usize,
}

impl EvaluateUseCase {
    pub fn new(config: TrainConfig, iteration: usize) -> Self {
        Self { config, iteration }
    }

    pub fn execute(&self) -> Result<Evaluation> {
        let cfg = &self.config;

        let model_kind: ModelKind = cfg.model_type.parse()?;
        let mut model = FlowClassifier::new(model_kind, cfg.clone(), NdArrayDevice::default());

        let dataset_kind: DatasetKind = cfg.dataset.parse()?;
        let (_, test) = load_dataset(
            dataset_kind,
            &cfg.data_dir,
            cfg.s_test,
            cfg.n_steps,
            cfg.n_features,
            cfg.seed,
        )?;

        model.restore(self.iteration)?;
        tracing::info!(
            "{}: restored {} checkpoint from iteration {}",
            model.name(),
            model.kind(),
            self.iteration
        );

        let eval = model.evaluate(test.samples(), EvalPrefix::Test)?;
        tracing::info!(
            "{}; iteration: {}, test loss: {:.6}, test accuracy: {:.6}, test TPR: {}, test FPR: {}",
            model.name(),
            self.iteration,
            eval.loss,
            eval.accuracy,
            eval.tpr,
            eval.fpr
        );
        Ok(eval)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::FlowError;

    #[test]
    fn test_rejects_unknown_model_type() {
        let cfg = TrainConfig { model_type: "lstm".to_string(), ..TrainConfig::default() };
        let err = EvaluateUseCase::new(cfg, 2000).execute().unwrap_err();
        assert_eq!(err.downcast_ref::<FlowError>(), Some(&FlowError::InvalidModelType("lstm".to_string())));
    }

    #[test]
    fn test_missing_checkpoint_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let iscx = dir.path().join("iscx");
        std::fs::create_dir_all(&iscx).unwrap();

        let mut csv = String::from("f0,f1,Label\n");
        for i in 0..40 {
            let label = if i % 3 == 0 { "DDoS" } else { "BENIGN" };
            csv.push_str(&format!("{},{},{label}\n", i, i * 2));
        }
        std::fs::write(iscx.join("day1.csv"), csv).unwrap();

        let cfg = TrainConfig {
            dataset:         "iscx".to_string(),
            model_type:      "FlowModel".to_string(),
            n_features:      2,
            n_steps:         2,
            s_test:          4,
            data_dir:        dir.path().display().to_string(),
            checkpoints_dir: format!("{}/ckpt/", dir.path().display()),
            ..TrainConfig::default()
        };

        assert!(EvaluateUseCase::new(cfg, 2000).execute().is_err());
    }
}
