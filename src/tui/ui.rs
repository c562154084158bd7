use crate::models::profile::UserProfile;
use crate::queries::QueryState;
use crate::tui::app::{App, AppMode};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// "2011-01-25T18:44:36Z" -> "Jan 2011"; unparseable timestamps pass through.
fn joined_label(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|ts| ts.with_timezone(&Utc).format("%b %Y").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.size());

    // Header
    let title = if app.is_loading() {
        format!("GitHub User Search {} Loading...", app.spinner_char())
    } else {
        "GitHub User Search".to_string()
    };
    let title = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    if app.mode == AppMode::Help {
        render_help_view(frame, chunks[1]);
    } else {
        render_search_view(app, frame, chunks[1]);
    }

    // Status bar with context-sensitive help
    let status_text = match app.mode {
        AppMode::SearchInput => {
            if app.show_suggestions {
                "↑/↓: Pick suggestion | Enter: Search | Esc: Close suggestions"
            } else {
                "Type a username | Enter: Search | Tab: Recent | Esc: Quit"
            }
        }
        AppMode::RecentList => "↑/↓: Navigate | Enter: Search again | Tab/Esc: Back | ?: Help | q: Quit",
        AppMode::Help => "Press any key to close help",
    };
    let status = Paragraph::new(status_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);
}

fn render_search_view(app: &mut App, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(40)])
        .split(area);

    render_recent_list(app, frame, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(columns[1]);

    render_input_box(app, frame, rows[0]);

    if app.show_suggestions {
        let dropdown_height = (app.suggestions.len() as u16 + 2).min(rows[1].height);
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(dropdown_height), Constraint::Min(0)])
            .split(rows[1]);
        render_suggestions(app, frame, split[0]);
        render_profile_area(app, frame, split[1]);
    } else {
        render_profile_area(app, frame, rows[1]);
    }
}

fn render_recent_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = if app.recent.is_empty() {
        vec![ListItem::new("(no recent searches)").style(Style::default().fg(Color::DarkGray))]
    } else {
        app.recent
            .entries()
            .iter()
            .map(|entry| ListItem::new(entry.as_str()))
            .collect()
    };

    let border_style = if app.mode == AppMode::RecentList {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Recent")
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    if app.mode == AppMode::RecentList {
        frame.render_stateful_widget(list, area, &mut app.recent_state);
    } else {
        let mut state = ratatui::widgets::ListState::default();
        frame.render_stateful_widget(list, area, &mut state);
    }
}

fn render_input_box(app: &App, frame: &mut Frame, area: Rect) {
    let style = if app.mode == AppMode::SearchInput {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(app.input_buffer.as_str()).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Enter GitHub Username"),
    );
    frame.render_widget(input, area);
}

fn render_suggestions(app: &mut App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = app
        .suggestions
        .iter()
        .map(|s| ListItem::new(s.login.as_str()))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Suggestions"))
        .highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, &mut app.suggestion_state);
}

fn render_profile_area(app: &App, frame: &mut Frame, area: Rect) {
    match &app.profile_query {
        QueryState::Idle => {
            let hint = Paragraph::new("Search for a GitHub user to see their profile.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title("Profile"));
            frame.render_widget(hint, area);
        }
        QueryState::Loading => {
            let loading = Paragraph::new(format!("{} Loading...", app.spinner_char()))
                .block(Block::default().borders(Borders::ALL).title("Profile"));
            frame.render_widget(loading, area);
        }
        QueryState::Ready(profile) => render_profile_card(profile, frame, area),
        QueryState::Failed(message) => render_error(message, frame, area),
    }
}

fn render_profile_card(profile: &UserProfile, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {}", profile.display_name()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  @{}", profile.login),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(""),
    ];

    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
        lines.push(Line::from(format!("  {}", bio)));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(format!(
        "  Repos: {}   Followers: {}   Following: {}",
        profile.public_repos, profile.followers, profile.following
    )));
    if let Some(created_at) = &profile.created_at {
        lines.push(Line::from(format!("  Joined: {}", joined_label(created_at))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  Avatar:  "),
        Span::styled(profile.avatar_url.clone(), Style::default().fg(Color::Blue)),
    ]));
    lines.push(Line::from(vec![
        Span::raw("  Profile: "),
        Span::styled(profile.html_url.clone(), Style::default().fg(Color::Blue)),
    ]));

    let card = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Profile ({})", profile.login)),
    );
    frame.render_widget(card, area);
}

fn render_error(error: &str, frame: &mut Frame, area: Rect) {
    let error_detail = format!("  {}", error);
    let error_text: Vec<String> = vec![
        "".to_string(),
        "  ✗ Search failed".to_string(),
        "".to_string(),
        error_detail,
        "".to_string(),
        "  Troubleshooting:".to_string(),
        "  • Check the username spelling".to_string(),
        "  • Verify network connectivity to the GitHub API".to_string(),
        "  • Press Esc to dismiss and try again".to_string(),
        "".to_string(),
    ];

    let items: Vec<ListItem> = error_text
        .into_iter()
        .map(|line| ListItem::new(line).style(Style::default().fg(Color::Red)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Error")
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(list, area);
}

fn render_help_view(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        "GitHub User Search - Help",
        "---------",
        "",
        "Search box:",
        "  Type          Edit the username query",
        "  Enter         Search (or pick the highlighted suggestion)",
        "  ↑/↓           Move through suggestions when the dropdown is open",
        "  Tab           Jump to the recent-searches list",
        "  Esc           Close suggestions / dismiss error / quit",
        "",
        "Recent searches:",
        "  ↑/↓ or k/j    Navigate",
        "  Enter         Search that username again",
        "  Tab or Esc    Back to the search box",
        "  q             Quit application",
        "",
        "Suggestions appear once you have typed at least two characters",
        "and pause briefly. The five most recent searches are kept on disk.",
        "",
        "Press any key to close help",
    ];

    let items: Vec<ListItem> = help_text.into_iter().map(ListItem::new).collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(list, area);
}
