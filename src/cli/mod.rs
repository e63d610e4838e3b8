// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`    — train a flow classifier and upload the best checkpoint
//   2. `evaluate` — restore a checkpoint and score the test split
//   3. `upload`   — push an existing checkpoint to blob storage

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvaluateArgs, TrainArgs, UploadArgs};

#[derive(Parser, Debug)]
#[command(
    name = "netdetect",
    version = "0.1.0",
    about = "Train GRU-based network flow classifiers on ISCX / ISOT traffic captures."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route the subcommand to its use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Evaluate(args) => run_evaluate(args),
            Commands::Upload(args)   => run_upload(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    TrainUseCase::new(args.hyper.into(), args.storage.into()).execute()?;
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let iteration = args.iteration;
    let eval = EvaluateUseCase::new(args.hyper.into(), iteration).execute()?;
    println!(
        "Test accuracy: {:.6}, test TPR: {}, test FPR: {}, test loss: {:.6}",
        eval.accuracy, eval.tpr, eval.fpr, eval.loss
    );
    Ok(())
}

fn run_upload(args: UploadArgs) -> Result<()> {
    use crate::application::upload_use_case::UploadUseCase;

    let path = UploadUseCase::new(
        args.checkpoints_dir,
        args.model_name.clone(),
        args.iteration,
        args.storage.into(),
    )
    .execute()?;
    println!("Uploaded {} as {}", path.display(), args.model_name);
    Ok(())
}
