use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{ConditionsRequest, ConditionsResponse};

#[async_trait]
pub trait AirQualityProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn current_conditions(
        &self,
        request: ConditionsRequest,
    ) -> Result<ConditionsResponse, ProviderError>;
}
