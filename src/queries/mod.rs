use crate::client::GithubClient;
use crate::models::profile::{SearchSuggestion, UserProfile};
use anyhow::Result;
use std::collections::HashMap;

/// How many autocomplete entries the dropdown shows.
pub const SUGGESTION_LIMIT: u32 = 5;

/// State of the profile query for the current submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryState {
    #[default]
    Idle,
    Loading,
    Ready(UserProfile),
    Failed(String),
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            QueryState::Ready(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Runs the two GitHub queries and deduplicates profile fetches.
///
/// Successful profile lookups are cached by username, so resubmitting a term
/// (e.g. picking it from the recent list) is served without a request.
/// Failures are not cached and retry on the next submission. Suggestion
/// queries are ephemeral and always hit the API.
pub struct UserQueries {
    client: GithubClient,
    profile_cache: HashMap<String, UserProfile>,
}

impl UserQueries {
    pub fn new(client: GithubClient) -> Self {
        Self {
            client,
            profile_cache: HashMap::new(),
        }
    }

    pub async fn fetch_profile(&mut self, username: &str) -> Result<UserProfile> {
        if let Some(cached) = self.profile_cache.get(username) {
            tracing::debug!(%username, "profile served from cache");
            return Ok(cached.clone());
        }

        let profile = self.client.fetch_user(username).await?;
        self.profile_cache
            .insert(username.to_string(), profile.clone());
        Ok(profile)
    }

    pub async fn fetch_suggestions(&self, query: &str) -> Result<Vec<SearchSuggestion>> {
        self.client.search_users(query, SUGGESTION_LIMIT).await
    }
}
