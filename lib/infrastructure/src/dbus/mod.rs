use zbus::zvariant::{OwnedValue, Value};

/// Interface implemented by every value-carrying object on a Venus OS bus.
const BUS_ITEM_INTERFACE: &str = "com.victronenergy.BusItem";

//Error names that mean "this service/object does not exist right now",
//as opposed to a broken transport. Callers use this distinction to decide
//between re-discovery and plain retry.
const NOT_FOUND_ERROR_NAMES: &[&str] = &[
    "org.freedesktop.DBus.Error.ServiceUnknown",
    "org.freedesktop.DBus.Error.NameHasNoOwner",
    "org.freedesktop.DBus.Error.UnknownObject",
    "org.freedesktop.DBus.Error.UnknownMethod",
    "org.freedesktop.DBus.Error.UnknownInterface",
];

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct DbusConfig {
    //None = system bus. An explicit address is mainly for test benches.
    pub address: Option<String>,
}

#[derive(Debug, derive_more::Display)]
pub enum DbusError {
    #[display("object not found on bus")]
    NotFound,
    #[display("dbus transport error: {_0}")]
    Transport(zbus::Error),
}

/// Thin client for the `com.victronenergy.BusItem` interface: every
/// readable/writable value on a Venus system is a `GetValue`/`SetValue`
/// pair behind some service name and object path.
pub struct BusItemClient {
    connection: zbus::Connection,
}

impl BusItemClient {
    pub async fn connect(config: &DbusConfig) -> anyhow::Result<Self> {
        let connection = match &config.address {
            Some(address) => {
                tracing::info!("Connecting to D-Bus at {}", address);
                zbus::connection::Builder::address(address.as_str())?
                    .build()
                    .await?
            }
            None => zbus::Connection::system().await?,
        };

        Ok(Self { connection })
    }

    pub async fn get_value(&self, service: &str, path: &str) -> Result<OwnedValue, DbusError> {
        let reply = self
            .connection
            .call_method(Some(service), path, Some(BUS_ITEM_INTERFACE), "GetValue", &())
            .await
            .map_err(classify)?;

        reply
            .body()
            .deserialize::<OwnedValue>()
            .map_err(|e| DbusError::Transport(e.into()))
    }

    pub async fn set_value_i32(&self, service: &str, path: &str, value: i32) -> Result<(), DbusError> {
        self.connection
            .call_method(
                Some(service),
                path,
                Some(BUS_ITEM_INTERFACE),
                "SetValue",
                &Value::I32(value),
            )
            .await
            .map_err(classify)?;

        Ok(())
    }
}

fn classify(error: zbus::Error) -> DbusError {
    match &error {
        zbus::Error::MethodError(name, _, _) if NOT_FOUND_ERROR_NAMES.contains(&name.as_str()) => {
            DbusError::NotFound
        }
        _ => DbusError::Transport(error),
    }
}
