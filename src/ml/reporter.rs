// ============================================================
// Layer 5 — Report Callback
// ============================================================
// Invoked by the training loop every s_report_interval
// iterations. Each report:
//
//   1. evaluates the first s_test training samples  → train stream
//   2. evaluates the whole test split               → test stream
//   3. offers the test result to the BestTracker and saves a
//      checkpoint only when it strictly improves on the best
//
// The first report seeds the tracker and saves nothing.
//
// All context the callback needs (splits, s_test, sinks) is held
// here explicitly; the training loop only passes the model and
// the iteration number.

use anyhow::Result;

use crate::domain::{
    best::{BestDecision, BestEval, BestTracker},
    flow::{EvalPrefix, Evaluation, FlowSplit},
    traits::{ReportHook, SummarySink, TrafficClassifier},
};

pub struct Reporter<'a, S: SummarySink> {
    train:        &'a FlowSplit,
    test:         &'a FlowSplit,
    s_test:       usize,
    train_writer: S,
    test_writer:  S,
    tracker:      BestTracker,
}

impl<'a, S: SummarySink> Reporter<'a, S> {
    pub fn new(
        train:        &'a FlowSplit,
        test:         &'a FlowSplit,
        s_test:       usize,
        train_writer: S,
        test_writer:  S,
    ) -> Self {
        Self { train, test, s_test, train_writer, test_writer, tracker: BestTracker::new() }
    }

    pub fn best(&self) -> Option<&BestEval> {
        self.tracker.best()
    }

    pub fn train_writer(&self) -> &S {
        &self.train_writer
    }

    pub fn test_writer(&self) -> &S {
        &self.test_writer
    }
}

fn log_evaluation(model_name: &str, iteration: usize, eval: &Evaluation) {
    let p = eval.prefix.as_str();
    tracing::info!(
        "{}; iteration: {}, {p} loss: {:.6}, {p} accuracy: {:.6}, {p} TPR: {}, {p} FPR: {}",
        model_name,
        iteration,
        eval.loss,
        eval.accuracy,
        eval.tpr,
        eval.fpr,
    );
}

impl<S: SummarySink> ReportHook for Reporter<'_, S> {
    fn report(&mut self, model: &dyn TrafficClassifier, iteration: usize) -> Result<()> {
        let train_eval = model.evaluate(self.train.head(self.s_test), EvalPrefix::Train)?;
        log_evaluation(model.name(), iteration, &train_eval);
        self.train_writer.add_summary(&train_eval, iteration)?;

        let test_eval = model.evaluate(self.test.samples(), EvalPrefix::Test)?;
        log_evaluation(model.name(), iteration, &test_eval);
        self.test_writer.add_summary(&test_eval, iteration)?;

        let decision = self.tracker.observe(&test_eval, iteration);
        if decision == BestDecision::Seeded {
            tracing::debug!("{}: best accuracy seeded at iteration {}", model.name(), iteration);
        }
        if decision.should_checkpoint() {
            let path = model.save(iteration)?;
            tracing::info!(
                "{}: new best test accuracy {:.6} at iteration {}, saved '{}'",
                model.name(),
                test_eval.accuracy,
                iteration,
                path.display()
            );
        }

        Ok(())
    }
}
