use std::time::Duration;

use crate::heater::RelayId;
use crate::heater::actuator::{self, ApplyOutcome};
use crate::heater::locator::RelayLocator;
use crate::heater::source::{SourceClass, SourceObserver};
use crate::port::{AcSourceReader, RelayDirectory, RelaySwitch};
use crate::settings::HeaterSettings;

/// Supervises the water heater relay: observe the active AC input source,
/// decide, actuate. Two states: unbound (no valid relay handle, discovery
/// runs each period) and bound (observe/decide/actuate each period).
///
/// All loop state lives here. The relay handle is weak and dropped on the
/// first not-found fault; `applied` is the last state known to be written,
/// reset to unknown whenever the handle changes so a fresh write always
/// follows a (re)bind.
pub struct HeaterService<B> {
    bus: B,
    locator: RelayLocator,
    observer: SourceObserver,
    poll_interval: Duration,

    bound: Option<RelayId>,
    applied: Option<bool>,
    desired: Option<bool>,
    source_unavailable_logged: bool,
}

impl<B> HeaterService<B>
where
    B: RelayDirectory + RelaySwitch + AcSourceReader,
{
    pub fn new(bus: B, settings: &HeaterSettings) -> Self {
        Self {
            bus,
            locator: RelayLocator::new(settings.relay_labels.clone()),
            observer: SourceObserver::new(settings.external_sources.clone()),
            poll_interval: Duration::from_secs(settings.poll_interval_seconds),
            bound: None,
            applied: None,
            desired: None,
            source_unavailable_logged: false,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            "Water heater supervisor started, polling every {:?}",
            self.poll_interval
        );

        loop {
            self.tick().await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One loop iteration. Every bus fault is absorbed here; the loop is
    /// never left in a state it cannot recover from on the next tick.
    async fn tick(&mut self) {
        let Some(relay) = self.bound else {
            if let Some(relay) = self.locator.locate(&self.bus).await {
                self.bound = Some(relay);
                self.applied = None;
            }
            return;
        };

        let Some(source) = self.observer.read(&self.bus).await else {
            //Hold the last decision on a transient read error instead of
            //failing toward off, so short bus hiccups never flap the relay.
            if !self.source_unavailable_logged {
                tracing::warn!("AC input source not available, holding last relay state");
                self.source_unavailable_logged = true;
            }
            return;
        };

        if self.source_unavailable_logged {
            tracing::info!("AC input source is available again");
            self.source_unavailable_logged = false;
        }

        let desired = self.observer.classify(source) == SourceClass::External;
        if self.desired != Some(desired) {
            tracing::info!("AC input source changed to: {} (value: {})", source, source.0);
        }
        self.desired = Some(desired);

        if self.applied == Some(desired) {
            return;
        }

        match actuator::apply(&self.bus, relay, desired).await {
            ApplyOutcome::Applied => {
                tracing::info!(
                    "Set {} to {} (AC input source: {})",
                    relay,
                    if desired { "on" } else { "off" },
                    source
                );
                self.applied = Some(desired);
            }
            ApplyOutcome::InvalidEndpoint => {
                tracing::warn!("{} disappeared from the bus, rediscovering", relay);
                self.bound = None;
                self.applied = None;
            }
            //Already logged; desired != applied still holds, so the write
            //is retried next tick
            ApplyOutcome::WriteFailed => {}
        }
    }
}
