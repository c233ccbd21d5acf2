use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    assets::decode::SourceImage, foundation::error::UploadRejection,
    validate::gate::ValidationGate,
};

/// What happened to one submitted upload.
#[derive(Clone, Debug)]
pub enum UploadOutcome {
    Accepted(SourceImage),
    Rejected(UploadRejection),
    /// A newer upload (or an explicit cancel) replaced this one; its result was discarded.
    Superseded,
}

impl UploadOutcome {
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

/// Single-flight validation with cancel-and-replace semantics.
///
/// Every submission gets a generation number. Submitting again aborts the pending task
/// (if it has not started) and bumps the generation, so only the latest submission can
/// produce `Accepted`/`Rejected`; anything older resolves to `Superseded`.
#[derive(Debug)]
pub struct UploadSlot {
    gate: ValidationGate,
    generation: AtomicU64,
    in_flight: Mutex<Option<InFlight>>,
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    abort: tokio::task::AbortHandle,
}

impl UploadSlot {
    pub fn new(gate: ValidationGate) -> Self {
        Self {
            gate,
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    pub fn gate(&self) -> &ValidationGate {
        &self.gate
    }

    /// Validate `bytes`, superseding any pending submission.
    pub async fn submit(&self, bytes: Vec<u8>) -> UploadOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let task = self.gate.spawn_validation(bytes);
        let pending = InFlight {
            generation,
            abort: task.abort_handle(),
        };
        if let Some(previous) = self.lock_in_flight().replace(pending) {
            tracing::debug!(
                generation,
                superseded = previous.generation,
                "superseding pending validation"
            );
            previous.abort.abort();
        }

        let result = task.join().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return UploadOutcome::Superseded;
        }
        {
            let mut in_flight = self.lock_in_flight();
            if in_flight.as_ref().is_some_and(|p| p.generation == generation) {
                in_flight.take();
            }
        }

        match result {
            Some(Ok(image)) => UploadOutcome::Accepted(image),
            Some(Err(rejection)) => UploadOutcome::Rejected(rejection),
            None => UploadOutcome::Superseded,
        }
    }

    /// Drop whatever is pending; its submitter receives `Superseded`.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.lock_in_flight().take() {
            previous.abort.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock_in_flight().is_some()
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/validate/slot.rs"]
mod tests;
