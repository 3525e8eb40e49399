use crate::heater::RelayId;
use crate::port::{BusFault, RelaySwitch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The relay endpoint is gone; the caller must drop its handle and
    /// re-run discovery before the next write.
    InvalidEndpoint,
    /// Transient write fault; safe to retry against the same handle.
    WriteFailed,
}

/// Stateless and safe to call redundantly. Avoiding redundant writes is the
/// caller's job, via its memory of the last applied state.
pub async fn apply(bus: &impl RelaySwitch, relay: RelayId, closed: bool) -> ApplyOutcome {
    match bus.set_state(relay, closed).await {
        Ok(()) => ApplyOutcome::Applied,
        Err(BusFault::NotFound) => ApplyOutcome::InvalidEndpoint,
        Err(BusFault::Transport(e)) => {
            tracing::warn!("Error writing state of {}: {:?}", relay, e);
            ApplyOutcome::WriteFailed
        }
    }
}
