// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Flag names keep their underscores (`--model_name`, `--s_batch`)
// so existing training scripts keep working.

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::infra::uploader::{StorageBackend, StorageConfig};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a flow classifier, then upload its best checkpoint
    Train(TrainArgs),

    /// Score a saved checkpoint against the test split
    Evaluate(EvaluateArgs),

    /// Upload an existing checkpoint without retraining
    Upload(UploadArgs),
}

/// `train`: hyperparameters plus where to publish the best checkpoint.
#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub hyper: HyperArgs,

    #[command(flatten)]
    pub storage: StorageArgs,
}

/// Every hyperparameter of a training run, shared by `train` and `evaluate`.
#[derive(Args, Debug, Clone)]
pub struct HyperArgs {
    /// Which dataset to train on: iscx or isot
    #[arg(long, default_value = "blank")]
    pub dataset: String,

    /// Name for checkpoints, metric streams and the uploaded blob
    #[arg(long = "model_name", default_value = "default.model")]
    pub model_name: String,

    /// FlowAttModel or FlowModel
    #[arg(long = "model_type", default_value = "FlowAttModel")]
    pub model_type: String,

    #[arg(long = "s_batch", default_value_t = 128)]
    pub s_batch: usize,

    /// L2 weight decay strength
    #[arg(long = "v_regularization", default_value_t = 0.1)]
    pub v_regularization: f64,

    #[arg(long = "n_features", default_value_t = 77)]
    pub n_features: usize,

    /// Flows per window
    #[arg(long = "n_steps", default_value_t = 22)]
    pub n_steps: usize,

    #[arg(long = "h_gru", default_value_t = 64)]
    pub h_gru: usize,

    #[arg(long = "h_att", default_value_t = 16)]
    pub h_att: usize,

    #[arg(long = "o_gru", default_value_t = 64)]
    pub o_gru: usize,

    #[arg(long = "h_dense", default_value_t = 64)]
    pub h_dense: usize,

    #[arg(long = "o_dense", default_value_t = 32)]
    pub o_dense: usize,

    #[arg(long = "h_dense2", default_value_t = 32)]
    pub h_dense2: usize,

    #[arg(long = "o_dense2", default_value_t = 16)]
    pub o_dense2: usize,

    #[arg(long = "n_classes", default_value_t = 2)]
    pub n_classes: usize,

    /// Number of training iterations (one batch each)
    #[arg(long = "n_epochs", default_value_t = 10)]
    pub n_epochs: usize,

    /// Test split size; also how many training windows are scored per report
    #[arg(long = "s_test", default_value_t = 4096)]
    pub s_test: usize,

    /// Iterations between reports
    #[arg(long = "s_report_interval", default_value_t = 2000)]
    pub s_report_interval: usize,

    #[arg(long = "graphs_train_dir", default_value = "graphs/train/")]
    pub graphs_train_dir: String,

    #[arg(long = "graphs_test_dir", default_value = "graphs/test/")]
    pub graphs_test_dir: String,

    /// Prefix for checkpoint files; keep the trailing slash
    #[arg(long = "checkpoints_dir", default_value = "checkpoints/")]
    pub checkpoints_dir: String,

    /// Directory holding iscx/ and isot/ CSV folders
    #[arg(long = "data_dir", default_value = "data")]
    pub data_dir: String,

    #[arg(long = "learning_rate", default_value_t = 1e-3)]
    pub learning_rate: f64,

    /// Seed for the train/test split and batch order
    #[arg(long, default_value_t = 1)]
    pub seed: u64,
}

impl From<HyperArgs> for TrainConfig {
    fn from(a: HyperArgs) -> Self {
        TrainConfig {
            dataset:           a.dataset,
            model_name:        a.model_name,
            model_type:        a.model_type,
            s_batch:           a.s_batch,
            v_regularization:  a.v_regularization,
            n_features:        a.n_features,
            n_steps:           a.n_steps,
            h_gru:             a.h_gru,
            h_att:             a.h_att,
            o_gru:             a.o_gru,
            h_dense:           a.h_dense,
            o_dense:           a.o_dense,
            h_dense2:          a.h_dense2,
            o_dense2:          a.o_dense2,
            n_classes:         a.n_classes,
            n_epochs:          a.n_epochs,
            s_test:            a.s_test,
            s_report_interval: a.s_report_interval,
            graphs_train_dir:  a.graphs_train_dir,
            graphs_test_dir:   a.graphs_test_dir,
            checkpoints_dir:   a.checkpoints_dir,
            data_dir:          a.data_dir,
            learning_rate:     a.learning_rate,
            seed:              a.seed,
        }
    }
}

/// Where the best checkpoint is published.
#[derive(Args, Debug, Clone)]
pub struct StorageArgs {
    /// azure or local
    #[arg(long = "storage_backend", default_value = "azure")]
    pub storage_backend: StorageBackend,

    #[arg(long = "storage_account", env = "AZURE_STORAGE_ACCOUNT", hide_env_values = true)]
    pub storage_account: Option<String>,

    #[arg(long = "storage_key", env = "AZURE_STORAGE_KEY", hide_env_values = true)]
    pub storage_key: Option<String>,

    /// Root directory for the local backend
    #[arg(long = "storage_root", default_value = "blobs")]
    pub storage_root: String,

    #[arg(long, default_value = "models")]
    pub container: String,
}

impl From<StorageArgs> for StorageConfig {
    fn from(a: StorageArgs) -> Self {
        StorageConfig {
            backend:    a.storage_backend,
            account:    a.storage_account,
            access_key: a.storage_key,
            root:       a.storage_root,
            container:  a.container,
        }
    }
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Iteration of the checkpoint to restore
    #[arg(long)]
    pub iteration: usize,

    #[command(flatten)]
    pub hyper: HyperArgs,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    #[arg(long = "checkpoints_dir", default_value = "checkpoints/")]
    pub checkpoints_dir: String,

    #[arg(long = "model_name", default_value = "default.model")]
    pub model_name: String,

    /// Iteration of the checkpoint to upload
    #[arg(long)]
    pub iteration: usize,

    #[command(flatten)]
    pub storage: StorageArgs,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn train_args(argv: &[&str]) -> TrainArgs {
        let mut full = vec!["netdetect", "train"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Train(args) => args,
            other => panic!("expected train, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_match_config_defaults() {
        let args = train_args(&["--storage_account", "acct", "--storage_key", "key"]);
        let cfg: TrainConfig = args.hyper.into();
        assert_eq!(cfg, TrainConfig::default());
    }

    #[test]
    fn test_underscore_flags_override_defaults() {
        let args = train_args(&[
            "--dataset", "iscx",
            "--model_type", "FlowModel",
            "--model_name", "flow.model",
            "--n_epochs", "10000",
            "--s_report_interval", "2000",
            "--checkpoints_dir", "ckpt/",
            "--v_regularization", "0.01",
        ]);
        let cfg: TrainConfig = args.hyper.into();
        assert_eq!(cfg.dataset, "iscx");
        assert_eq!(cfg.model_type, "FlowModel");
        assert_eq!(cfg.model_name, "flow.model");
        assert_eq!(cfg.n_epochs, 10000);
        assert_eq!(cfg.checkpoints_dir, "ckpt/");
        assert_eq!(cfg.v_regularization, 0.01);
    }

    #[test]
    fn test_storage_flags() {
        let args = train_args(&["--storage_backend", "local", "--storage_root", "/tmp/blobs"]);
        let storage: StorageConfig = args.storage.into();
        assert_eq!(storage.backend, StorageBackend::Local);
        assert_eq!(storage.root, "/tmp/blobs");
        assert_eq!(storage.container, "models");
    }

    #[test]
    fn test_bad_storage_backend_rejected() {
        assert!(Cli::try_parse_from(["netdetect", "train", "--storage_backend", "s3"]).is_err());
    }

    #[test]
    fn test_evaluate_takes_hyperparameters_but_no_storage_flags() {
        let cli = Cli::try_parse_from([
            "netdetect", "evaluate", "--iteration", "4000", "--model_type", "FlowModel",
        ])
        .unwrap();
        match cli.command {
            Commands::Evaluate(args) => {
                assert_eq!(args.iteration, 4000);
                assert_eq!(args.hyper.model_type, "FlowModel");
            }
            other => panic!("expected evaluate, got {other:?}"),
        }

        assert!(Cli::try_parse_from([
            "netdetect", "evaluate", "--iteration", "4000", "--storage_key", "secret",
        ])
        .is_err());
    }

    #[test]
    fn test_upload_requires_iteration() {
        assert!(Cli::try_parse_from(["netdetect", "upload"]).is_err());
        let cli = Cli::try_parse_from(["netdetect", "upload", "--iteration", "6000"]).unwrap();
        match cli.command {
            Commands::Upload(args) => {
                assert_eq!(args.iteration, 6000);
                assert_eq!(args.checkpoints_dir, "checkpoints/");
            }
            other => panic!("expected upload, got {other:?}"),
        }
    }
}
