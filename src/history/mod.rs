use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Maximum number of remembered searches.
pub const MAX_RECENT: usize = 5;

/// Ordered, deduplicated, most-recent-first list of submitted usernames.
///
/// Persisted as a JSON array of strings; read once at startup and rewritten
/// after every mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    /// Loads the list from `path`. A missing file yields the empty list; so
    /// does a malformed one, with a warning, rather than failing startup.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str::<Vec<String>>(&contents) {
            Ok(entries) => {
                let mut list = Self::default();
                // Re-apply the list invariants in case the file was edited.
                for entry in entries.into_iter().rev() {
                    list.record(&entry);
                }
                list
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "discarding malformed recent-search file");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string(&self.entries).context("Failed to serialize recent searches")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Records a submission: trims it, removes any existing occurrence,
    /// prepends it, and truncates to [`MAX_RECENT`] entries.
    ///
    /// Whitespace-only input is a no-op and returns false.
    pub fn record(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }

        self.entries.retain(|e| e != term);
        self.entries.insert(0, term.to_string());
        self.entries.truncate(MAX_RECENT);
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }
}

/// Default on-disk location: `<data dir>/github-user-tui/recent_searches.json`,
/// falling back to the CWD when the platform has no data directory.
pub fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("github-user-tui")
        .join("recent_searches.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("github-user-tui-test-{}-{}", name, std::process::id()))
            .join("recent_searches.json")
    }

    #[test]
    fn test_record_prepends() {
        let mut list = RecentSearches::default();
        assert!(list.record("octocat"));
        assert!(list.record("torvalds"));
        assert_eq!(list.entries(), ["torvalds", "octocat"]);
    }

    #[test]
    fn test_record_never_exceeds_cap() {
        let mut list = RecentSearches::default();
        for name in ["a", "b", "c", "d", "e", "f", "g"] {
            list.record(name);
        }
        assert_eq!(list.len(), MAX_RECENT);
        assert_eq!(list.entries(), ["g", "f", "e", "d", "c"]);
    }

    #[test]
    fn test_record_existing_moves_to_front_without_duplicate() {
        let mut list = RecentSearches::default();
        list.record("octocat");
        list.record("torvalds");
        list.record("matz");
        list.record("octocat");

        assert_eq!(list.entries(), ["octocat", "matz", "torvalds"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_record_trims_input() {
        let mut list = RecentSearches::default();
        list.record("  octocat  ");
        list.record("octocat");
        assert_eq!(list.entries(), ["octocat"]);
    }

    #[test]
    fn test_record_whitespace_only_is_noop() {
        let mut list = RecentSearches::default();
        list.record("octocat");

        assert!(!list.record(""));
        assert!(!list.record("   "));
        assert!(!list.record("\t\n"));
        assert_eq!(list.entries(), ["octocat"]);
    }

    #[test]
    fn test_no_duplicates_for_any_submission_sequence() {
        let mut list = RecentSearches::default();
        for name in ["a", "b", "a", "c", "b", "a", "d", "e", "f", "a"] {
            list.record(name);
            assert!(list.len() <= MAX_RECENT);
            let mut seen = list.entries().to_vec();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), list.len());
        }
        assert_eq!(list.get(0), Some("a"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_path("round-trip");
        let mut list = RecentSearches::default();
        list.record("octocat");
        list.record("torvalds");
        list.save(&path).unwrap();

        let reloaded = RecentSearches::load(&path);
        assert_eq!(reloaded, list);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let list = RecentSearches::load(Path::new("/nonexistent/recent_searches.json"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "this is not json [[[").unwrap();

        let list = RecentSearches::load(&path);
        assert!(list.is_empty());

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_load_reapplies_invariants_to_edited_file() {
        let path = temp_path("edited");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"["a", "b", "a", "  ", "c", "d", "e", "f"]"#,
        )
        .unwrap();

        let list = RecentSearches::load(&path);
        assert_eq!(list.entries(), ["a", "b", "c", "d", "e"]);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
