mod actuator;
mod locator;
mod service;
mod source;

pub use service::HeaterService;

/// One relay slot on the device. A weak reference: the slot can vanish or
/// be relabeled at any time, so it is re-validated on every use and dropped
/// as soon as an operation reports it missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("relay {_0}")]
pub struct RelayId(pub u8);

/// Raw `/Ac/ActiveIn/Source` code as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcSource(pub i32);

impl std::fmt::Display for AcSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "Unavailable"),
            1 => write!(f, "Grid"),
            2 => write!(f, "Generator"),
            3 | 4 => write!(f, "Shore"),
            240 => write!(f, "Inverting"),
            code => write!(f, "Unknown ({code})"),
        }
    }
}
