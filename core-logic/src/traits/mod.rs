use crate::error::InputError;

/// Counters derived from a finished dispatch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchStats {
    /// Broadcast without waiting for a receipt.
    pub submitted: u64,
    pub confirmed: u64,
    /// Mined with a failed status.
    pub reverted: u64,
    /// Broadcast, but the confirmation wait failed or timed out.
    pub unconfirmed: u64,
    /// Nothing was broadcast.
    pub failed: u64,
}

impl DispatchStats {
    pub fn total(&self) -> u64 {
        self.submitted + self.confirmed + self.reverted + self.unconfirmed + self.failed
    }

    /// Share of attempts that reached the chain without a known failure.
    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        ((self.submitted + self.confirmed) as f64 / total as f64) * 100.0
    }
}

/// Line-based operator input.
///
/// Flows only talk to the operator through this trait so they can be
/// driven by a script in tests.
pub trait Prompter {
    /// Prints `prompt` without a newline and returns the next line.
    /// End of input is an error.
    fn ask(&mut self, prompt: &str) -> Result<String, InputError>;

    /// Reads the next line without prompting. `Ok(None)` at end of input.
    fn next_line(&mut self) -> Result<Option<String>, InputError>;

    /// Prints an informational line.
    fn notice(&mut self, message: &str) -> Result<(), InputError>;
}
