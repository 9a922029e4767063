// Text normalization: rule tables and the engine that applies them

pub mod clean;
pub mod rules;

pub use rules::{NormalizationRule, Pipeline, PipelineKind, Rewrite, RuleTable};

use tracing::{debug, warn};

use crate::metrics::NormalizeMetrics;

/// Upper bound on re-running a pipeline over its own output
pub const MAX_SETTLE_PASSES: usize = 8;

/// Apply `pipeline` to `text` and re-apply it to its own output until the
/// label stops changing, so normalized labels are fixed points of the pipeline.
///
/// Never fails: an unmatched rule is a no-op, and empty input yields empty output.
/// A label still changing after `MAX_SETTLE_PASSES` is returned as-is and
/// reported with a warning; rules must be written to settle well before that.
pub fn normalize(pipeline: &Pipeline, text: &str) -> String {
    let mut current = pipeline.apply_once(text);
    let mut passes = 1;
    let mut settled = false;

    while passes < MAX_SETTLE_PASSES {
        let next = pipeline.apply_once(&current);
        if next == current {
            settled = true;
            break;
        }
        current = next;
        passes += 1;
    }

    if !settled && pipeline.apply_once(&current) != current {
        warn!(
            pipeline = %pipeline.kind(),
            passes,
            input = text,
            output = %current,
            "label did not settle; output is not a fixed point"
        );
        NormalizeMetrics::record_unsettled(pipeline.kind().as_str());
    } else if passes > 1 {
        debug!(
            pipeline = %pipeline.kind(),
            passes,
            input = text,
            output = %current,
            "label needed extra passes to settle"
        );
    }
    NormalizeMetrics::record_normalized(pipeline.kind().as_str(), passes);

    current
}
