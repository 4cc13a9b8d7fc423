//! Brent's cycle detection, adapted to a streaming sequence of tool-call
//! signatures rather than the classic `f(x)` functional-iteration form: each
//! new signature is compared only against a saved checkpoint, with the
//! checkpoint refreshed at exponentially growing intervals (powers of two).
//! O(1) amortized work per recorded step, no unbounded history retained.
//!
//! Styled after `execution_engine::stall_detector::StallDetector` (struct
//! holding small fixed state, a `record_step` entry point, a `Display`-able
//! result type) but implementing the spec's named algorithm rather than a
//! windowed checksum comparison.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    pub signature: String,
    pub length: u64,
}

#[derive(Debug)]
pub struct CycleDetector {
    power: u64,
    lambda: u64,
    checkpoint: Option<String>,
    steps_recorded: u64,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleDetector {
    pub fn new() -> Self {
        Self { power: 1, lambda: 0, checkpoint: None, steps_recorded: 0 }
    }

    /// Record one step's signature (e.g. `"{tool}:{args_hash}"`). Returns
    /// `Some(CycleInfo)` the moment the new signature matches the current
    /// checkpoint, i.e. a repeating sub-sequence of that length was found.
    pub fn record_step(&mut self, signature: impl Into<String>) -> Option<CycleInfo> {
        let signature = signature.into();
        self.steps_recorded += 1;

        let Some(checkpoint) = self.checkpoint.clone() else {
            self.checkpoint = Some(signature);
            self.power = 1;
            self.lambda = 0;
            return None;
        };

        self.lambda += 1;

        if signature == checkpoint {
            let info = CycleInfo { signature: signature.clone(), length: self.lambda };
            // Start fresh so a subsequent distinct cycle can still be found.
            self.checkpoint = Some(signature);
            self.power = 1;
            self.lambda = 0;
            return Some(info);
        }

        if self.lambda == self.power {
            self.checkpoint = Some(signature);
            self.power *= 2;
            self.lambda = 0;
        }

        None
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn steps_recorded(&self) -> u64 {
        self.steps_recorded
    }
}
