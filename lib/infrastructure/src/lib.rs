mod dbus;
mod monitoring;

pub use monitoring::MonitoringConfig;

pub use dbus::{BusItemClient, DbusConfig, DbusError};
