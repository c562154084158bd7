use serde::{Deserialize, Serialize};

/// A GitHub account as returned by `GET /users/{username}`.
///
/// Snapshot of the fields the profile card renders; never mutated locally,
/// replaced wholesale when a new search resolves.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Display name falls back to the login when the account has no name set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.login)
    }
}

/// Envelope of `GET /search/users?q=...`.
#[derive(Debug, Deserialize)]
pub struct SearchUsersResponse {
    pub items: Vec<SearchSuggestion>,
}

/// One entry of the autocomplete dropdown. A lightweight projection of a
/// user record; recomputed on every debounced keystroke.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchSuggestion {
    pub login: String,
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_user_profile() {
        let json = r#"{
            "login": "octocat",
            "id": 583231,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "html_url": "https://github.com/octocat",
            "name": "The Octocat",
            "bio": null,
            "public_repos": 8,
            "followers": 9999,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.display_name(), "The Octocat");
        assert!(profile.bio.is_none());
        assert_eq!(profile.public_repos, 8);
        assert_eq!(
            profile.created_at.as_deref(),
            Some("2011-01-25T18:44:36Z")
        );
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        let json = r#"{
            "login": "ghost",
            "avatar_url": "https://avatars.githubusercontent.com/u/10137?v=4",
            "html_url": "https://github.com/ghost",
            "name": null,
            "bio": "Hi, I'm a former user.",
            "created_at": null
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.display_name(), "ghost");
        assert_eq!(profile.followers, 0);
    }

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {"login": "octocat", "id": 583231, "avatar_url": "https://example.com/a.png"},
                {"login": "octocat2", "id": 583232, "avatar_url": "https://example.com/b.png"}
            ]
        }"#;

        let response: SearchUsersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].login, "octocat");
    }
}
