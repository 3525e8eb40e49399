#![allow(async_fn_in_trait)]

use crate::heater::{AcSource, RelayId};

/// Fault raised by any bus-facing operation. `NotFound` means the addressed
/// service or object is not on the bus right now; everything else is a
/// transport-level problem worth a plain retry.
#[derive(Debug, derive_more::Display)]
pub enum BusFault {
    #[display("endpoint not found")]
    NotFound,
    #[display("bus fault: {_0}")]
    Transport(anyhow::Error),
}

/// Enumeration of the relay slots advertised by the device, plus the
/// user-assigned label of each slot.
pub trait RelayDirectory {
    fn relay_count(&self) -> u8;

    async fn custom_name(&self, relay: RelayId) -> Result<Option<String>, BusFault>;
}

pub trait RelaySwitch {
    async fn set_state(&self, relay: RelayId, closed: bool) -> Result<(), BusFault>;
}

pub trait AcSourceReader {
    async fn active_source(&self) -> Result<AcSource, BusFault>;
}
