use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use envq_core::{AirQuality, AirQualitySource, Coordinates, QualityError};
use tracing::{debug, warn};

use crate::scorer::score_air_quality;
use crate::traits::AirQualityProvider;
use crate::types::ConditionsRequest;

/// Scores current conditions from an upstream air-quality provider.
#[derive(Clone)]
pub struct AirQualityService {
    provider: Arc<dyn AirQualityProvider>,
}

impl AirQualityService {
    pub fn new(provider: Arc<dyn AirQualityProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl AirQualitySource for AirQualityService {
    fn name(&self) -> &'static str {
        self.provider.name()
    }

    #[tracing::instrument(skip_all, fields(provider = self.provider.name(), %coordinates))]
    async fn fetch(&self, coordinates: Coordinates) -> Result<AirQuality, QualityError> {
        let conditions = self
            .provider
            .current_conditions(ConditionsRequest::at(coordinates))
            .await
            .map_err(|e| {
                let message = e.redacted();
                warn!(error = %message, "air quality lookup failed");
                QualityError::AirQualityFetchFailed(message)
            })?;

        debug!(
            upstream = %conditions.provider,
            aqi = ?conditions.aqi,
            pollutants = conditions.pollutants.len(),
            "air quality conditions received"
        );
        score_air_quality(conditions, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use parking_lot::Mutex;

    use super::*;
    use crate::error::ProviderError;
    use crate::types::{ConditionsResponse, PollutantReading};

    struct FixedProvider {
        aqi: Option<u32>,
    }

    #[async_trait]
    impl AirQualityProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn current_conditions(
            &self,
            _request: ConditionsRequest,
        ) -> Result<ConditionsResponse, ProviderError> {
            Ok(ConditionsResponse {
                provider: "fixed-conditions".to_string(),
                aqi: self.aqi,
                pollutants: vec![PollutantReading {
                    code: "no2".to_string(),
                    display_name: "NO2".to_string(),
                    full_name: Some("Nitrogen dioxide".to_string()),
                    value: 30.0,
                    unit: "MICROGRAMS_PER_CUBIC_METER".to_string(),
                }],
            })
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl AirQualityProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn current_conditions(
            &self,
            _request: ConditionsRequest,
        ) -> Result<ConditionsResponse, ProviderError> {
            Err(ProviderError::Api {
                status: 403,
                body: "request to /lookup?key=secret-123 denied".to_string(),
            })
        }
    }

    fn coords() -> Coordinates {
        Coordinates::new(40.7128, -74.006).expect("coords")
    }

    #[tokio::test]
    async fn scores_provider_conditions() {
        let service = AirQualityService::new(Arc::new(FixedProvider { aqi: Some(100) }));
        let air = service.fetch(coords()).await.expect("air quality");
        assert_eq!(air.score.value(), 50);
        assert_eq!(air.aqi, Some(100));
        assert_eq!(air.pollutants.len(), 1);
        assert_eq!(air.exceeding_pollutants().len(), 1);
        assert!(air.pollutant_by_name("no2").is_some());
    }

    #[tokio::test]
    async fn provider_failure_becomes_fetch_failed_without_secrets() {
        let service = AirQualityService::new(Arc::new(FailingProvider));
        let err = service.fetch(coords()).await.expect_err("fetch should fail");
        let QualityError::AirQualityFetchFailed(message) = err else {
            panic!("unexpected error variant: {err:?}");
        };
        assert!(message.contains("403"));
        assert!(!message.contains("secret-123"));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn received_conditions_log_the_upstream() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let service = AirQualityService::new(Arc::new(FixedProvider { aqi: Some(80) }));
        {
            let _guard = tracing::subscriber::set_default(subscriber);
            service.fetch(coords()).await.expect("air quality");
        }

        let output = String::from_utf8_lossy(&logs.0.lock()).into_owned();
        let received = output
            .lines()
            .find(|line| line.contains("air quality conditions received"))
            .expect("conditions event");
        assert!(received.contains("upstream=fixed-conditions"), "{received}");
        assert!(received.contains("aqi=Some(80)"), "{received}");
    }
}
