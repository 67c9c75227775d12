//! Fault injection and call tracking for the in-memory upstream adapters.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::sleep;

use crate::ports::UpstreamError;

/// Operations of the in-memory Profile Service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileOp {
    GetByIdentity,
    GetByServiceId,
    Create,
    Update,
    AttachPhoto,
    SetVisibility,
}

/// Operations of the in-memory Pairing Service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairingOp {
    ListCandidates,
    SubmitLike,
    CheckMutualMatch,
}

/// Per-operation failures, latency and call counters.
///
/// Injected failures persist until cleared, so a test can assert that the
/// same failing call is made again on retry.
#[derive(Debug)]
pub struct FaultPlan<Op> {
    faults: Mutex<HashMap<Op, UpstreamError>>,
    calls: Mutex<HashMap<Op, usize>>,
    delay: Mutex<Duration>,
}

impl<Op> Default for FaultPlan<Op> {
    fn default() -> Self {
        Self {
            faults: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            delay: Mutex::new(Duration::ZERO),
        }
    }
}

impl<Op: Copy + Eq + Hash> FaultPlan<Op> {
    /// Makes every subsequent `op` call fail with `error`.
    pub fn fail(&self, op: Op, error: UpstreamError) {
        self.faults.lock().unwrap().insert(op, error);
    }

    /// Removes the injected failure for `op`.
    pub fn clear(&self, op: Op) {
        self.faults.lock().unwrap().remove(&op);
    }

    /// Sets simulated latency for every call.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Number of times `op` has been invoked.
    pub fn calls(&self, op: Op) -> usize {
        self.calls.lock().unwrap().get(&op).copied().unwrap_or(0)
    }

    /// Records the call, waits out the simulated latency and returns the
    /// injected failure, if any.
    pub async fn enter(&self, op: Op) -> Result<(), UpstreamError> {
        *self.calls.lock().unwrap().entry(op).or_insert(0) += 1;

        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            sleep(delay).await;
        }

        match self.faults.lock().unwrap().get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
