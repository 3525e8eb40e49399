use crate::heater::RelayId;
use crate::port::{BusFault, RelayDirectory};

/// Finds the water heater relay by its user-assigned label. The result is
/// only valid until the next bus operation against it fails; callers must
/// re-locate after any not-found fault.
pub struct RelayLocator {
    labels: Vec<String>,
}

impl RelayLocator {
    pub fn new(labels: Vec<String>) -> Self {
        let labels = labels.into_iter().map(|l| l.to_lowercase()).collect();
        Self { labels }
    }

    pub async fn locate(&self, bus: &impl RelayDirectory) -> Option<RelayId> {
        for slot in 0..bus.relay_count() {
            let relay = RelayId(slot);

            match bus.custom_name(relay).await {
                Ok(Some(name)) if self.matches(&name) => {
                    tracing::info!("Found water heater relay: {} ({:?})", relay, name);
                    return Some(relay);
                }
                Ok(_) => {}
                //Slot not present on the bus, keep scanning
                Err(BusFault::NotFound) => {}
                Err(BusFault::Transport(e)) => {
                    tracing::debug!("Relay discovery failed on {}: {:?}", relay, e);
                    return None;
                }
            }
        }

        tracing::debug!("No relay matched labels {:?}, will retry", self.labels);
        None
    }

    fn matches(&self, custom_name: &str) -> bool {
        let custom_name = custom_name.to_lowercase();
        self.labels.iter().any(|l| *l == custom_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::HeaterSettings;

    struct FakeDirectory {
        names: Vec<Result<Option<String>, BusFault>>,
    }

    impl RelayDirectory for FakeDirectory {
        fn relay_count(&self) -> u8 {
            self.names.len() as u8
        }

        async fn custom_name(&self, relay: RelayId) -> Result<Option<String>, BusFault> {
            match &self.names[relay.0 as usize] {
                Ok(name) => Ok(name.clone()),
                Err(BusFault::NotFound) => Err(BusFault::NotFound),
                Err(BusFault::Transport(e)) => Err(BusFault::Transport(anyhow::anyhow!("{e}"))),
            }
        }
    }

    fn locator() -> RelayLocator {
        RelayLocator::new(HeaterSettings::default().relay_labels)
    }

    #[tokio::test]
    async fn test_match_is_case_insensitive() {
        for name in ["AC Water Heater", "ac water heater", "AC WH", "ac wh"] {
            let directory = FakeDirectory {
                names: vec![Ok(Some("Bilge Pump".to_owned())), Ok(Some(name.to_owned()))],
            };

            assert_eq!(locator().locate(&directory).await, Some(RelayId(1)));
        }
    }

    #[tokio::test]
    async fn test_no_match_returns_none() {
        let directory = FakeDirectory {
            names: vec![Ok(Some("Bilge Pump".to_owned())), Ok(None)],
        };

        assert_eq!(locator().locate(&directory).await, None);
    }

    #[tokio::test]
    async fn test_missing_slots_are_skipped() {
        let directory = FakeDirectory {
            names: vec![Err(BusFault::NotFound), Ok(Some("AC WH".to_owned()))],
        };

        assert_eq!(locator().locate(&directory).await, Some(RelayId(1)));
    }

    #[tokio::test]
    async fn test_transport_fault_is_treated_as_miss() {
        let directory = FakeDirectory {
            names: vec![
                Err(BusFault::Transport(anyhow::anyhow!("bus unreachable"))),
                Ok(Some("AC WH".to_owned())),
            ],
        };

        assert_eq!(locator().locate(&directory).await, None);
    }

    #[tokio::test]
    async fn test_first_match_wins() {
        let directory = FakeDirectory {
            names: vec![Ok(Some("AC WH".to_owned())), Ok(Some("AC Water Heater".to_owned()))],
        };

        assert_eq!(locator().locate(&directory).await, Some(RelayId(0)));
    }
}
