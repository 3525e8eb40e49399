use infrastructure::{BusItemClient, DbusError};

use crate::heater::{AcSource, RelayId};
use crate::port::{AcSourceReader, BusFault, RelayDirectory, RelaySwitch};

//Relay states live on the system service, relay labels on the settings
//service. Both are well-known names; only the relay slot is discovered.
const SYSTEM_SERVICE: &str = "com.victronenergy.system";
const SETTINGS_SERVICE: &str = "com.victronenergy.settings";
const AC_ACTIVE_INPUT_SOURCE_PATH: &str = "/Ac/ActiveIn/Source";

/// Venus OS view of the device: relay slots and the inverter/charger's
/// active AC input source, all exposed as BusItem values.
pub struct VenusSystem {
    client: BusItemClient,
    relay_count: u8,
}

impl VenusSystem {
    pub fn new(client: BusItemClient, relay_count: u8) -> Self {
        Self {
            client,
            relay_count,
        }
    }

    fn custom_name_path(relay: RelayId) -> String {
        format!("/Settings/Relay/{}/CustomName", relay.0)
    }

    fn state_path(relay: RelayId) -> String {
        format!("/Relay/{}/State", relay.0)
    }
}

impl RelayDirectory for VenusSystem {
    fn relay_count(&self) -> u8 {
        self.relay_count
    }

    async fn custom_name(&self, relay: RelayId) -> Result<Option<String>, BusFault> {
        let value = self
            .client
            .get_value(SETTINGS_SERVICE, &Self::custom_name_path(relay))
            .await?;

        //An unnamed or non-string value is simply not a labeled relay
        let name = String::try_from(value).ok().filter(|n| !n.is_empty());
        Ok(name)
    }
}

impl RelaySwitch for VenusSystem {
    async fn set_state(&self, relay: RelayId, closed: bool) -> Result<(), BusFault> {
        self.client
            .set_value_i32(SYSTEM_SERVICE, &Self::state_path(relay), closed as i32)
            .await?;

        Ok(())
    }
}

impl AcSourceReader for VenusSystem {
    async fn active_source(&self) -> Result<AcSource, BusFault> {
        let value = self
            .client
            .get_value(SYSTEM_SERVICE, AC_ACTIVE_INPUT_SOURCE_PATH)
            .await?;

        let code = i32::try_from(value)
            .map_err(|e| BusFault::Transport(anyhow::anyhow!("unexpected source value: {e}")))?;

        Ok(AcSource(code))
    }
}

impl From<DbusError> for BusFault {
    fn from(error: DbusError) -> Self {
        match error {
            DbusError::NotFound => BusFault::NotFound,
            DbusError::Transport(e) => BusFault::Transport(e.into()),
        }
    }
}
