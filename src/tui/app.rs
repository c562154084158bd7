use crate::config::AppConfig;
use crate::history::RecentSearches;
use crate::models::profile::SearchSuggestion;
use crate::queries::{QueryState, UserQueries};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum AppMode {
    /// Typing in the search box; printable keys go to the input buffer.
    #[default]
    SearchInput,
    /// Browsing the recent-searches sidebar.
    RecentList,
    Help,
}

/// Suggestions fire only for input that still has more than one character
/// after trimming.
pub fn wants_suggestions(input: &str) -> bool {
    input.trim().chars().count() > 1
}

pub struct App {
    pub queries: UserQueries,
    pub config: AppConfig,
    pub mode: AppMode,
    pub should_quit: bool,

    pub input_buffer: String,
    last_edit: Option<Instant>,
    suggestions_pending: bool,
    pub suggestions: Vec<SearchSuggestion>,
    pub show_suggestions: bool,
    pub suggestion_state: ListState,

    pub submitted_username: Option<String>,
    pub profile_query: QueryState,

    pub recent: RecentSearches,
    history_path: PathBuf,
    pub recent_state: ListState,

    pub spinner_frame: usize,
}

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

impl App {
    pub fn new(
        queries: UserQueries,
        config: AppConfig,
        recent: RecentSearches,
        history_path: PathBuf,
    ) -> Self {
        Self {
            queries,
            config,
            mode: AppMode::default(),
            should_quit: false,
            input_buffer: String::new(),
            last_edit: None,
            suggestions_pending: false,
            suggestions: Vec::new(),
            show_suggestions: false,
            suggestion_state: ListState::default(),
            submitted_username: None,
            profile_query: QueryState::default(),
            recent,
            history_path,
            recent_state: ListState::default(),
            spinner_frame: 0,
        }
    }

    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    fn advance_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn is_loading(&self) -> bool {
        self.profile_query.is_loading()
    }

    /// Registers an input edit: restarts the debounce window and drops any
    /// dropdown that can no longer apply.
    fn mark_input_edited(&mut self) {
        self.last_edit = Some(Instant::now());
        self.suggestion_state.select(None);
        if wants_suggestions(&self.input_buffer) {
            self.suggestions_pending = true;
        } else {
            self.suggestions_pending = false;
            self.hide_suggestions();
        }
    }

    fn hide_suggestions(&mut self) {
        self.show_suggestions = false;
        self.suggestions.clear();
        self.suggestion_state.select(None);
    }

    fn suggestions_due(&self) -> bool {
        if !self.suggestions_pending || self.mode != AppMode::SearchInput {
            return false;
        }
        self.last_edit
            .map(|t| t.elapsed().as_millis() as u64 >= self.config.debounce_ms)
            .unwrap_or(false)
    }

    async fn refresh_suggestions(&mut self) {
        self.suggestions_pending = false;
        let query = self.input_buffer.trim().to_string();

        match self.queries.fetch_suggestions(&query).await {
            Ok(suggestions) => {
                self.show_suggestions = !suggestions.is_empty();
                self.suggestions = suggestions;
                self.suggestion_state.select(None);
            }
            Err(e) => {
                // A failed suggestion lookup just leaves the dropdown empty.
                tracing::debug!(error = %e, %query, "suggestion query failed");
                self.hide_suggestions();
            }
        }
    }

    /// Submits a username: records it in the recent list, persists the list,
    /// and runs the (cached) profile query. Whitespace-only input is a no-op.
    pub async fn submit(&mut self, term: &str) {
        let term = term.trim().to_string();
        if term.is_empty() {
            return;
        }

        self.suggestions_pending = false;
        self.hide_suggestions();

        if self.recent.record(&term) {
            if let Err(e) = self.recent.save(&self.history_path) {
                tracing::warn!(error = %e, "failed to persist recent searches");
            }
            self.recent_state.select(None);
        }

        self.submitted_username = Some(term.clone());
        self.profile_query = QueryState::Loading;

        self.profile_query = match self.queries.fetch_profile(&term).await {
            Ok(profile) => QueryState::Ready(profile),
            Err(e) => QueryState::Failed(format!("{:#}", e)),
        };
    }

    /// Picking a dropdown entry replaces the input with that login and
    /// submits it.
    async fn select_suggestion(&mut self) {
        let Some(index) = self.suggestion_state.selected() else {
            return;
        };
        let Some(suggestion) = self.suggestions.get(index) else {
            return;
        };

        self.input_buffer = suggestion.login.clone();
        let term = self.input_buffer.clone();
        self.submit(&term).await;
    }

    async fn submit_recent_selection(&mut self) {
        let Some(term) = self
            .recent_state
            .selected()
            .and_then(|i| self.recent.get(i))
            .map(str::to_string)
        else {
            return;
        };

        self.input_buffer = term.clone();
        self.mode = AppMode::SearchInput;
        self.submit(&term).await;
    }

    fn next_in(state: &mut ListState, len: usize) {
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        state.select(Some(i));
    }

    fn previous_in(state: &mut ListState, len: usize) {
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    pub async fn tick(&mut self) {
        if self.is_loading() {
            self.advance_spinner();
        }
        if self.suggestions_due() {
            self.refresh_suggestions().await;
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            AppMode::SearchInput => self.handle_search_input_key(key).await,
            AppMode::RecentList => self.handle_recent_list_key(key).await,
            // Any key closes help
            AppMode::Help => self.mode = AppMode::SearchInput,
        }
    }

    async fn handle_search_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.show_suggestions && self.suggestion_state.selected().is_some() {
                    self.select_suggestion().await;
                } else {
                    let term = self.input_buffer.clone();
                    self.submit(&term).await;
                }
            }
            KeyCode::Down if self.show_suggestions => {
                Self::next_in(&mut self.suggestion_state, self.suggestions.len());
            }
            KeyCode::Up if self.show_suggestions => {
                Self::previous_in(&mut self.suggestion_state, self.suggestions.len());
            }
            KeyCode::Tab if !self.recent.is_empty() => {
                self.mode = AppMode::RecentList;
                if self.recent_state.selected().is_none() {
                    self.recent_state.select(Some(0));
                }
            }
            KeyCode::Esc => {
                if self.show_suggestions {
                    self.hide_suggestions();
                    self.suggestions_pending = false;
                } else if self.profile_query.error().is_some() {
                    self.profile_query = QueryState::Idle;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.mark_input_edited();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                self.mark_input_edited();
            }
            _ => {}
        }
    }

    async fn handle_recent_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('?') => self.mode = AppMode::Help,
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                Self::previous_in(&mut self.recent_state, self.recent.len());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                Self::next_in(&mut self.recent_state, self.recent.len());
            }
            KeyCode::Enter => self.submit_recent_selection().await,
            KeyCode::Tab | KeyCode::Esc => self.mode = AppMode::SearchInput,
            _ => {}
        }
    }
}
