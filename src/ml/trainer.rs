// ============================================================
// Layer 5 — Flow Classifier & Training Loop
// ============================================================
// FlowClassifier is the burn-backed TrafficClassifier:
//
//   new()        → remembers kind + hyperparameters, no weights yet
//   initialize() → builds FlowNet (GRU trunk, optional attention)
//   train()      → n_epochs Adam steps, report hook every
//                  s_report_interval iterations
//   evaluate()   → loss / accuracy / TPR / FPR over a sample slice
//   save()       → checkpoint at {checkpoints_dir}{model_name}-{it}
//
// One "iteration" is one mini-batch step. Batches are drawn from
// a seeded shuffle of the training set; when fewer than s_batch
// unseen samples remain the order is reshuffled.
//
// Backends follow the usual burn split:
//   - training runs on Autodiff<NdArray> for gradients
//   - evaluation uses model.valid() on the inner NdArray backend

use anyhow::Result;
use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    module::AutodiffModule,
    optim::{decay::WeightDecayConfig, AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::ElementConversion,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::path::PathBuf;

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::FlowBatcher, dataset::FlowDataset};
use crate::domain::{
    error::FlowError,
    flow::{EvalPrefix, Evaluation, FlowSample, FlowSplit},
    kinds::ModelKind,
    traits::{ReportHook, TrafficClassifier},
};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::{
    metrics::Confusion,
    model::{FlowNet, FlowNetConfig},
};

pub type TrainBackend = Autodiff<NdArray>;
pub type EvalBackend  = NdArray;

pub struct FlowClassifier {
    kind:        ModelKind,
    cfg:         TrainConfig,
    device:      NdArrayDevice,
    net:         Option<FlowNet<TrainBackend>>,
    checkpoints: CheckpointManager,
}

impl FlowClassifier {
    pub fn new(kind: ModelKind, cfg: TrainConfig, device: NdArrayDevice) -> Self {
        let checkpoints = CheckpointManager::new(cfg.checkpoints_dir.clone(), cfg.model_name.clone());
        Self { kind, cfg, device, net: None, checkpoints }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn net_config(&self) -> FlowNetConfig {
        let c = &self.cfg;
        FlowNetConfig {
            n_features: c.n_features,
            h_gru:      c.h_gru,
            h_att:      c.h_att,
            o_gru:      c.o_gru,
            h_dense:    c.h_dense,
            o_dense:    c.o_dense,
            h_dense2:   c.h_dense2,
            o_dense2:   c.o_dense2,
            n_classes:  c.n_classes,
            attention:  self.kind.uses_attention(),
        }
    }

    /// Replace the current weights with the checkpoint saved at `iteration`.
    pub fn restore(&mut self, iteration: usize) -> Result<()> {
        let fresh = self.net_config().init::<TrainBackend>(&self.device);
        self.net = Some(self.checkpoints.load_model(fresh, iteration, &self.device)?);
        Ok(())
    }

    fn not_initialized(&self) -> FlowError {
        FlowError::NotInitialized(self.cfg.model_name.clone())
    }

    /// One Adam step on `batch`, returning the batch loss.
    fn step<O>(&mut self, optim: &mut O, batcher: &FlowBatcher<TrainBackend>, batch: &[FlowSample]) -> Result<f64>
    where
        O: Optimizer<FlowNet<TrainBackend>, TrainBackend>,
    {
        let net   = self.net.take().ok_or_else(|| self.not_initialized())?;
        let batch = batcher.batch(batch);

        let (loss, _) = net.forward_loss(batch.features, batch.labels);
        let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &net);
        self.net  = Some(optim.step(self.cfg.learning_rate, net, grads));

        Ok(loss_val)
    }
}

impl TrafficClassifier for FlowClassifier {
    fn name(&self) -> &str {
        &self.cfg.model_name
    }

    fn initialize(&mut self) -> Result<()> {
        self.net = Some(self.net_config().init(&self.device));
        tracing::info!(
            "{} ready: {} (h_gru={}, o_gru={}, n_classes={})",
            self.cfg.model_name,
            self.kind,
            self.cfg.h_gru,
            self.cfg.o_gru,
            self.cfg.n_classes
        );
        Ok(())
    }

    fn train(&mut self, train: &FlowSplit, hook: &mut dyn ReportHook) -> Result<()> {
        if self.net.is_none() {
            return Err(self.not_initialized().into());
        }
        if train.is_empty() {
            return Err(FlowError::EmptyBatch(self.cfg.model_name.clone()).into());
        }

        // ── Adam with L2 weight decay as the regularisation term ─────────────
        let mut optim = AdamConfig::new()
            .with_weight_decay(Some(WeightDecayConfig::new(self.cfg.v_regularization as f32)))
            .init();

        let batcher  = FlowBatcher::<TrainBackend>::new(self.device.clone(), self.cfg.n_steps, self.cfg.n_features);
        let dataset  = FlowDataset::new(train.samples());
        let s_batch  = self.cfg.s_batch.clamp(1, train.len());
        let interval = self.cfg.s_report_interval;

        let mut rng    = StdRng::seed_from_u64(self.cfg.seed);
        let mut order: Vec<usize> = (0..train.len()).collect();
        order.shuffle(&mut rng);
        let mut cursor = 0usize;

        tracing::info!(
            "Training {} for {} iterations (batch {}, report every {})",
            self.cfg.model_name,
            self.cfg.n_epochs,
            s_batch,
            interval
        );

        for iteration in 1..=self.cfg.n_epochs {
            if cursor + s_batch > order.len() {
                order.shuffle(&mut rng);
                cursor = 0;
            }
            let batch = dataset.gather(&order[cursor..cursor + s_batch]);
            cursor += s_batch;

            let loss = self.step(&mut optim, &batcher, &batch)?;
            tracing::trace!("iteration {}: batch loss {:.6}", iteration, loss);

            if interval > 0 && iteration % interval == 0 {
                hook.report(&*self, iteration)?;
            }
        }

        Ok(())
    }

    fn evaluate(&self, samples: &[FlowSample], prefix: EvalPrefix) -> Result<Evaluation> {
        let net = self.net.as_ref().ok_or_else(|| self.not_initialized())?.valid();
        if samples.is_empty() {
            return Err(FlowError::EmptyBatch(prefix.as_str().to_string()).into());
        }

        let batcher = FlowBatcher::<EvalBackend>::new(self.device.clone(), self.cfg.n_steps, self.cfg.n_features);
        let ce = burn::nn::loss::CrossEntropyLossConfig::new().init(&self.device);

        let mut loss_sum  = 0.0f64;
        let mut confusion = Confusion::new();

        for chunk in samples.chunks(self.cfg.s_batch.max(1)) {
            let batch  = batcher.batch(chunk);
            let logits = net.forward(batch.features);

            let batch_loss: f64 = ce
                .forward(logits.clone(), batch.labels.clone())
                .into_scalar()
                .elem::<f64>();
            loss_sum += batch_loss * chunk.len() as f64;

            // argmax(1) keeps the reduced dim: [batch, 1] → [batch]
            let preds = logits.argmax(1).flatten::<1>(0, 1).into_data();
            let labels = batch.labels.into_data();
            confusion.add(preds.iter::<i64>(), labels.iter::<i64>());
        }

        Ok(Evaluation {
            prefix,
            loss:     loss_sum / samples.len() as f64,
            accuracy: confusion.accuracy(),
            tpr:      confusion.tpr(),
            fpr:      confusion.fpr(),
        })
    }

    fn save(&self, iteration: usize) -> Result<PathBuf> {
        let net = self.net.as_ref().ok_or_else(|| self.not_initialized())?;
        self.checkpoints.save_model(net, iteration)
    }
}
