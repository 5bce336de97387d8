/*
[INPUT]:  None (public endpoints, no signature)
[OUTPUT]: Exchange server time
[POS]:    HTTP layer - public endpoints
[UPDATE]: When adding new public endpoints or changing response format
*/

use reqwest::Method;
use tracing::debug;

use crate::http::{FuturesClient, OrderError, Result};
use crate::types::ServerTimeResponse;

pub const SERVER_TIME_PATH: &str = "/fapi/v1/time";

impl FuturesClient {
    /// Query exchange server time in epoch milliseconds
    ///
    /// GET /fapi/v1/time
    pub async fn server_time(&self) -> Result<i64> {
        let url = self.endpoint_url(SERVER_TIME_PATH)?;
        let response = self.request(Method::GET, url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(OrderError::from_rejection(status, &body));
        }

        let time: ServerTimeResponse = serde_json::from_str(&body)
            .map_err(|err| OrderError::InvalidResponse(format!("server time: {err}")))?;
        debug!(server_time = time.server_time, "server time fetched");
        Ok(time.server_time)
    }
}
