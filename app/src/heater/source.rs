use crate::heater::AcSource;
use crate::port::{AcSourceReader, BusFault};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceClass {
    External,
    InternalOrNone,
}

/// Reads the active AC input source and classifies it. The external set is
/// a closed list: any code outside it, including the "no AC input" sentinel
/// and codes this firmware version does not know, counts as internal.
pub struct SourceObserver {
    external_sources: Vec<i32>,
}

impl SourceObserver {
    pub fn new(external_sources: Vec<i32>) -> Self {
        Self { external_sources }
    }

    /// `None` means the source could not be read this cycle. The caller
    /// must hold its last decision in that case, not fail toward off.
    pub async fn read(&self, bus: &impl AcSourceReader) -> Option<AcSource> {
        match bus.active_source().await {
            Ok(source) => Some(source),
            Err(BusFault::NotFound) => None,
            Err(BusFault::Transport(e)) => {
                tracing::debug!("Error reading AC input source: {:?}", e);
                None
            }
        }
    }

    pub fn classify(&self, source: AcSource) -> SourceClass {
        if self.external_sources.contains(&source.0) {
            SourceClass::External
        } else {
            SourceClass::InternalOrNone
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::HeaterSettings;

    fn observer() -> SourceObserver {
        SourceObserver::new(HeaterSettings::default().external_sources)
    }

    #[test]
    fn test_grid_and_shore_are_external() {
        let observer = observer();

        assert_eq!(observer.classify(AcSource(1)), SourceClass::External);
        assert_eq!(observer.classify(AcSource(3)), SourceClass::External);
        assert_eq!(observer.classify(AcSource(4)), SourceClass::External);
    }

    #[test]
    fn test_everything_else_is_internal() {
        let observer = observer();

        //0 is the explicit "no AC input" sentinel
        assert_eq!(observer.classify(AcSource(0)), SourceClass::InternalOrNone);
        //generator
        assert_eq!(observer.classify(AcSource(2)), SourceClass::InternalOrNone);
        //inverting
        assert_eq!(observer.classify(AcSource(240)), SourceClass::InternalOrNone);
        //codes unknown to this firmware
        assert_eq!(observer.classify(AcSource(17)), SourceClass::InternalOrNone);
        assert_eq!(observer.classify(AcSource(-1)), SourceClass::InternalOrNone);
    }

    #[test]
    fn test_external_set_is_configurable() {
        let observer = SourceObserver::new(vec![2]);

        assert_eq!(observer.classify(AcSource(2)), SourceClass::External);
        assert_eq!(observer.classify(AcSource(1)), SourceClass::InternalOrNone);
    }

    struct FakeSourceReader {
        result: Result<AcSource, BusFault>,
    }

    impl AcSourceReader for FakeSourceReader {
        async fn active_source(&self) -> Result<AcSource, BusFault> {
            match &self.result {
                Ok(source) => Ok(*source),
                Err(BusFault::NotFound) => Err(BusFault::NotFound),
                Err(BusFault::Transport(e)) => Err(BusFault::Transport(anyhow::anyhow!("{e}"))),
            }
        }
    }

    #[tokio::test]
    async fn test_read_returns_source() {
        let bus = FakeSourceReader {
            result: Ok(AcSource(1)),
        };

        assert_eq!(observer().read(&bus).await, Some(AcSource(1)));
    }

    #[tokio::test]
    async fn test_read_yields_none_on_missing_service() {
        let bus = FakeSourceReader {
            result: Err(BusFault::NotFound),
        };

        assert_eq!(observer().read(&bus).await, None);
    }

    #[tokio::test]
    async fn test_read_yields_none_on_transport_fault() {
        let bus = FakeSourceReader {
            result: Err(BusFault::Transport(anyhow::anyhow!("bus reset"))),
        };

        assert_eq!(observer().read(&bus).await, None);
    }
}
