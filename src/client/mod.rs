use crate::models::profile::{SearchSuggestion, SearchUsersResponse, UserProfile};
use anyhow::{bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder};
use std::time::Duration;

/// Unauthenticated client for the public GitHub REST API.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
}

impl GithubClient {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self> {
        // GitHub rejects requests without a User-Agent.
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("github-user-tui"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("Failed to build reqwest client")?;

        Ok(Self { client, api_url })
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        self.client.request(method, &url)
    }

    /// Fetches one user by exact login.
    ///
    /// Every non-2xx status collapses into the same "User not found." message;
    /// the UI makes no distinction between 404, rate limiting, or a 5xx.
    pub async fn fetch_user(&self, username: &str) -> Result<UserProfile> {
        let endpoint = format!("users/{}", username);
        let response = self
            .request(Method::GET, &endpoint)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), %username, "user fetch failed");
            bail!("User not found.");
        }

        let user = response
            .json::<UserProfile>()
            .await
            .context("Failed to deserialize user")?;

        Ok(user)
    }

    /// Searches users by free-text query, returning at most `limit` matches.
    pub async fn search_users(&self, query: &str, limit: u32) -> Result<Vec<SearchSuggestion>> {
        let response = self
            .request(Method::GET, "search/users")
            .query(&[("q", query)])
            .query(&[("per_page", limit)])
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), %query, "user search failed");
            bail!("User not found.");
        }

        let search = response
            .json::<SearchUsersResponse>()
            .await
            .context("Failed to deserialize search response")?;

        Ok(search.items)
    }
}
