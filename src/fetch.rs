use crate::ScraperError;
use lazy_static::lazy_static;
use reqwest::Client;
use tokio::{
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::debug;

lazy_static! {
    static ref REQUEST_DELAY: Duration = Duration::from_millis(400);
    static ref LISTING_TIMEOUT: Duration = Duration::from_secs(20);
    static ref DETAIL_TIMEOUT: Duration = Duration::from_secs(25);
}

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Listing,
    Detail,
}

impl Page {
    pub fn timeout(self) -> Duration {
        match self {
            Page::Listing => *LISTING_TIMEOUT,
            Page::Detail => *DETAIL_TIMEOUT,
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher {
    /// Body of a successful GET; transport errors and non-success
    /// statuses are errors.
    async fn fetch(&self, url: &str, page: Page) -> Result<String, ScraperError>;
}

/// Sequential HTTP fetcher that spaces requests at least `delay` apart.
pub struct HttpFetcher {
    client: Client,
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(HttpFetcher {
            client,
            delay: *REQUEST_DELAY,
            last_request: Mutex::new(None),
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, page: Page) -> Result<String, ScraperError> {
        let mut last_request = self.last_request.lock().await;
        if let Some(previous) = last_request.take() {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                tokio::time::sleep(self.delay - elapsed).await;
            }
        }

        debug!("Visit {}", url);
        let response = self
            .client
            .get(url)
            .timeout(page.timeout())
            .send()
            .await
            .and_then(|response| response.error_for_status());
        last_request.replace(Instant::now());

        Ok(response?.text().await?)
    }
}
