use burn::{
    nn::{
        gru::{Gru, GruConfig},
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{relu, softmax},
};

/// Layer sizes for both architectures; `attention` picks FlowAttModel.
#[derive(Config, Debug)]
pub struct FlowNetConfig {
    pub n_features: usize,
    pub h_gru:      usize,
    pub h_att:      usize,
    pub o_gru:      usize,
    pub h_dense:    usize,
    pub o_dense:    usize,
    pub h_dense2:   usize,
    pub o_dense2:   usize,
    pub n_classes:  usize,
    /// true → FlowAttModel, false → FlowModel
    pub attention:  bool,
}

impl FlowNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> FlowNet<B> {
        let gru = GruConfig::new(self.n_features, self.h_gru, true).init(device);
        let attention = self.attention.then(|| AttentionPool {
            projection: LinearConfig::new(self.h_gru, self.h_att).init(device),
            score:      LinearConfig::new(self.h_att, 1).with_bias(false).init(device),
        });
        FlowNet {
            gru,
            attention,
            gru_out:       LinearConfig::new(self.h_gru, self.o_gru).init(device),
            dense_hidden:  LinearConfig::new(self.o_gru, self.h_dense).init(device),
            dense_out:     LinearConfig::new(self.h_dense, self.o_dense).init(device),
            dense2_hidden: LinearConfig::new(self.o_dense, self.h_dense2).init(device),
            dense2_out:    LinearConfig::new(self.h_dense2, self.o_dense2).init(device),
            classifier:    LinearConfig::new(self.o_dense2, self.n_classes).init(device),
        }
    }
}

/// Additive attention over the GRU outputs:
///   score_t = v · tanh(W h_t),  α = softmax_t(score),  c = Σ α_t h_t
#[derive(Module, Debug)]
pub struct AttentionPool<B: Backend> {
    pub projection: Linear<B>,
    pub score:      Linear<B>,
}

impl<B: Backend> AttentionPool<B> {
    /// hidden: [batch, steps, width] → [batch, width]
    pub fn forward(&self, hidden: Tensor<B, 3>) -> Tensor<B, 2> {
        let [batch, steps, width] = hidden.dims();
        let scores  = self.score.forward(self.projection.forward(hidden.clone()).tanh()); // [b, s, 1]
        let weights = softmax(scores, 1).expand([batch, steps, width]);
        (hidden * weights).sum_dim(1).reshape([batch, width])
    }
}

#[derive(Module, Debug)]
pub struct FlowNet<B: Backend> {
    pub gru:           Gru<B>,
    pub attention:     Option<AttentionPool<B>>,
    pub gru_out:       Linear<B>,
    pub dense_hidden:  Linear<B>,
    pub dense_out:     Linear<B>,
    pub dense2_hidden: Linear<B>,
    pub dense2_out:    Linear<B>,
    pub classifier:    Linear<B>,
}

impl<B: Backend> FlowNet<B> {
    /// features: [batch, n_steps, n_features] → logits: [batch, n_classes]
    pub fn forward(&self, features: Tensor<B, 3>) -> Tensor<B, 2> {
        let hidden = self.gru.forward(features, None); // [batch, n_steps, h_gru]

        let pooled = match &self.attention {
            Some(attention) => attention.forward(hidden),
            None => {
                let [batch, steps, width] = hidden.dims();
                hidden
                    .slice([0..batch, steps - 1..steps, 0..width])
                    .reshape([batch, width])
            }
        };

        let x = relu(self.gru_out.forward(pooled));
        let x = relu(self.dense_hidden.forward(x));
        let x = relu(self.dense_out.forward(x));
        let x = relu(self.dense2_hidden.forward(x));
        let x = relu(self.dense2_out.forward(x));
        self.classifier.forward(x)
    }

    /// Mean cross-entropy over the batch, plus the logits it came from
    pub fn forward_loss(
        &self,
        features: Tensor<B, 3>,
        labels:   Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(features);
        let ce = burn::nn::loss::CrossEntropyLossConfig::new().init(&logits.device());
        (ce.forward(logits.clone(), labels), logits)
    }
}
