use postboard_types::{
    auth::{LoginRequest, LoginResponse},
    chart::{CoffeeBrand, CoffeeConsumption, SnackBrand, SnackImpact, WeeklyMood, WeeklyWorkout},
    post::{CreatePostRequest, Post, PostsPage, PostsParams, UpdatePostRequest},
};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use super::{endpoint::Endpoint, error::Error, response, session::Session};

/// Configuration for the client.
/// base_url: Root of the REST API. (default: the hosted board API)
/// max_retries: How many times a failed read is retried. (default: 3)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub base_url: Option<String>,
    pub max_retries: Option<usize>,
}

impl Config {
    const DEFAULT_BASE_URL: &'static str = "https://fe-hiring-rest-api.vercel.app";
    const DEFAULT_MAX_RETRIES: usize = 3;
    const BASE_RETRY_DELAY_MS: u64 = 1000;
    const MAX_RETRY_DELAY_MS: u64 = 30_000;

    pub fn new(base_url: Option<String>, max_retries: Option<usize>) -> Self {
        Config {
            base_url,
            max_retries,
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(Self::DEFAULT_BASE_URL)
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries.unwrap_or(Self::DEFAULT_MAX_RETRIES)
    }

    /// Exponential backoff before retry number `attempt` (starting at 0), capped at 30s.
    pub fn retry_delay(attempt: usize) -> std::time::Duration {
        let factor = 1u64.checked_shl(attempt as u32).unwrap_or(u64::MAX);
        std::time::Duration::from_millis(
            Self::BASE_RETRY_DELAY_MS
                .saturating_mul(factor)
                .min(Self::MAX_RETRY_DELAY_MS),
        )
    }
}

/// A client for the post board REST API.
/// Every request carries the session's bearer token when one is set.
/// Reads are retried with backoff, writes are sent exactly once.
#[derive(Debug, Clone)]
pub struct Client {
    cfg: Config,
    http: reqwest::Client,
    session: Session,
}

impl Client {
    pub fn new(cfg: Option<Config>) -> Self {
        Self::with_session(cfg, Session::new())
    }

    pub fn with_session(cfg: Option<Config>, session: Session) -> Self {
        Self {
            cfg: cfg.unwrap_or_default(),
            http: reqwest::Client::new(),
            session,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn request(&self, method: Method, endpoint: &Endpoint) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, endpoint.url(self.cfg.base_url()))
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        builder: RequestBuilder,
    ) -> Result<T, Error> {
        debug!("Sending request to {}", endpoint);
        response::parse(endpoint, builder.send().await?).await
    }

    async fn execute_empty(&self, endpoint: &Endpoint, builder: RequestBuilder) -> Result<(), Error> {
        debug!("Sending request to {}", endpoint);
        response::check_status(endpoint, builder.send().await?).await?;
        Ok(())
    }

    pub async fn execute_with_retry<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        builder: RequestBuilder,
    ) -> Result<T, Error> {
        let mut retries: usize = 0;
        loop {
            let attempt = builder.try_clone().ok_or(Error::NotRetryable)?;
            match self.execute(endpoint, attempt).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if !e.is_retryable() || retries >= self.cfg.max_retries() {
                        return Err(e);
                    }
                    error!(
                        "Error getting {}: {}, retrying {} more times",
                        endpoint,
                        e,
                        (self.cfg.max_retries() - retries),
                    );
                    tokio::time::sleep(Config::retry_delay(retries)).await;
                    retries += 1;
                }
            }
        }
    }

    /// Logs in and stores the returned token in the session.
    /// Any remote failure is reported as `InvalidCredentials` so callers
    /// cannot tell which field was wrong.
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, Error> {
        req.validate()?;
        let endpoint = Endpoint::Login;
        let builder = self.request(Method::POST, &endpoint).json(req);
        match self.execute::<LoginResponse>(&endpoint, builder).await {
            Ok(resp) => {
                info!("Logged in as {}", req.email);
                self.session.set_token(resp.token.clone());
                Ok(resp)
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                Err(Error::InvalidCredentials)
            }
        }
    }

    pub fn logout(&self) {
        info!("Logged out");
        self.session.clear();
    }

    pub async fn get_posts(&self, params: &PostsParams) -> Result<PostsPage, Error> {
        let endpoint = Endpoint::Posts;
        let builder = self.request(Method::GET, &endpoint).query(params);
        self.execute_with_retry(&endpoint, builder).await
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, Error> {
        let endpoint = Endpoint::Post(id.to_string());
        let builder = self.request(Method::GET, &endpoint);
        self.execute_with_retry(&endpoint, builder).await
    }

    pub async fn create_post(&self, req: &CreatePostRequest) -> Result<Post, Error> {
        let endpoint = Endpoint::Posts;
        let builder = self.request(Method::POST, &endpoint).json(req);
        self.execute(&endpoint, builder).await
    }

    pub async fn update_post(&self, id: &str, req: &UpdatePostRequest) -> Result<Post, Error> {
        let endpoint = Endpoint::Post(id.to_string());
        let builder = self.request(Method::PATCH, &endpoint).json(req);
        self.execute(&endpoint, builder).await
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), Error> {
        let endpoint = Endpoint::Post(id.to_string());
        let builder = self.request(Method::DELETE, &endpoint);
        self.execute_empty(&endpoint, builder).await
    }

    pub async fn delete_all_posts(&self) -> Result<(), Error> {
        let endpoint = Endpoint::Posts;
        let builder = self.request(Method::DELETE, &endpoint);
        self.execute_empty(&endpoint, builder).await
    }

    async fn get_mock<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, Error> {
        let builder = self.request(Method::GET, &endpoint);
        self.execute_with_retry(&endpoint, builder).await
    }

    pub async fn get_top_coffee_brands(&self) -> Result<Vec<CoffeeBrand>, Error> {
        self.get_mock(Endpoint::TopCoffeeBrands).await
    }

    pub async fn get_popular_snack_brands(&self) -> Result<Vec<SnackBrand>, Error> {
        self.get_mock(Endpoint::PopularSnackBrands).await
    }

    pub async fn get_weekly_mood_trend(&self) -> Result<Vec<WeeklyMood>, Error> {
        self.get_mock(Endpoint::WeeklyMoodTrend).await
    }

    pub async fn get_weekly_workout_trend(&self) -> Result<Vec<WeeklyWorkout>, Error> {
        self.get_mock(Endpoint::WeeklyWorkoutTrend).await
    }

    pub async fn get_coffee_consumption(&self) -> Result<CoffeeConsumption, Error> {
        self.get_mock(Endpoint::CoffeeConsumption).await
    }

    pub async fn get_snack_impact(&self) -> Result<SnackImpact, Error> {
        self.get_mock(Endpoint::SnackImpact).await
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(None)
    }
}
