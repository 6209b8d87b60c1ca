//! Core HTTP operations with rate limiting and retry logic
//!
//! Every feed request waits on a shared `governor` limiter first, then
//! retries with exponential backoff on 429, 503 and transport errors.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{clock::DefaultClock, state::InMemoryState, state::NotKeyed, Jitter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::constants::limits;
use crate::errors::{ClientError, ClientResult, FeedError, FeedResult};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// HTTP operations handler with resilience patterns
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    rate_limiter: DirectRateLimiter,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client and limits
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidRateLimit` if `rate_limit_rps` is zero
    pub fn new(
        client: Client,
        rate_limit_rps: u32,
        max_retries: u32,
        retry_base_delay: Duration,
    ) -> ClientResult<Self> {
        let rate_limiter = Self::build_rate_limiter(rate_limit_rps)?;
        Ok(Self {
            client,
            rate_limiter,
            max_retries,
            retry_base_delay,
        })
    }

    fn build_rate_limiter(rate_limit_rps: u32) -> ClientResult<DirectRateLimiter> {
        let rps = NonZeroU32::new(rate_limit_rps).ok_or(ClientError::InvalidRateLimit)?;
        Ok(RateLimiter::direct(Quota::per_second(rps)))
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_base_delay.saturating_mul(2_u32.saturating_pow(attempt))
    }

    /// Fetches the body of `url` as text
    ///
    /// # Errors
    ///
    /// Returns `FeedError` on a non-success status or once retries are exhausted
    pub async fn get_text(&self, url: &Url) -> FeedResult<String> {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(
                limits::RATE_LIMIT_JITTER_MS,
            )))
            .await;

        let mut retries = 0;
        loop {
            match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS
                        || status == StatusCode::SERVICE_UNAVAILABLE
                    {
                        if retries < self.max_retries {
                            retries += 1;
                            let delay = self.backoff_delay(retries);
                            tracing::debug!(
                                "Feed answered {} for {}. Backing off for {}ms",
                                status.as_u16(),
                                url,
                                delay.as_millis()
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(if status == StatusCode::TOO_MANY_REQUESTS {
                            FeedError::RateLimitExceeded
                        } else {
                            FeedError::ServerOverloaded
                        });
                    }

                    if !status.is_success() {
                        return Err(FeedError::ServerError {
                            status: status.as_u16(),
                        });
                    }

                    let text = response.text().await?;
                    tracing::debug!("Fetched {} bytes from {}", text.len(), url);
                    return Ok(text);
                }
                Err(e) if retries < self.max_retries => {
                    retries += 1;
                    let delay = self.backoff_delay(retries);
                    tracing::debug!(
                        "Request failed (attempt {}/{}): {}. Retrying in {}ms",
                        retries,
                        self.max_retries,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) if self.max_retries == 0 => return Err(FeedError::Http(e)),
                Err(e) => {
                    tracing::debug!("Request failed after {} retries: {}", self.max_retries, e);
                    return Err(FeedError::MaxRetriesExceeded {
                        max_retries: self.max_retries,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::client::config::ClientConfig;

    #[tokio::test]
    async fn test_rate_limiter_creation() {
        let rate_limiter = HttpHandler::build_rate_limiter(5).unwrap();
        rate_limiter.until_ready().await;
    }

    #[test]
    fn test_rate_limiter_zero_fails() {
        assert!(matches!(
            HttpHandler::build_rate_limiter(0),
            Err(ClientError::InvalidRateLimit)
        ));
    }

    #[test]
    fn test_exponential_backoff_calculation() {
        let client = ClientConfig::default().build_http_client().unwrap();
        let handler = HttpHandler::new(client, 5, 3, Duration::from_millis(250)).unwrap();

        assert_eq!(handler.backoff_delay(1), Duration::from_millis(500));
        assert_eq!(handler.backoff_delay(2), Duration::from_millis(1000));
        assert_eq!(handler.backoff_delay(3), Duration::from_millis(2000));
    }
}
