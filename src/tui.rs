use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::jobs::JobStore;
use crate::models::{Job, JobStatus, Role, User};
use crate::storage::Storage;

struct AppState {
    job_ids: Vec<String>,
    selected: usize,
    scroll_offset: u16,
    message: Option<String>,
}

impl AppState {
    fn new(job_ids: Vec<String>) -> Self {
        Self {
            job_ids,
            selected: 0,
            scroll_offset: 0,
            message: None,
        }
    }

    fn current_id(&self) -> Option<&str> {
        self.job_ids.get(self.selected).map(String::as_str)
    }

    fn next(&mut self) {
        if !self.job_ids.is_empty() && self.selected < self.job_ids.len() - 1 {
            self.selected += 1;
            self.scroll_offset = 0;
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_offset = 0;
        }
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }
}

/// Interactive two-pane browser over the given job ids.
pub fn run_browse<S: Storage>(
    store: &mut JobStore<S>,
    job_ids: Vec<String>,
    user: Option<&User>,
) -> Result<()> {
    if job_ids.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    let mut state = AppState::new(job_ids);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state, store, user);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn handle_action<S: Storage>(
    state: &mut AppState,
    store: &mut JobStore<S>,
    user: Option<&User>,
    key: KeyCode,
) {
    let Some(id) = state.current_id().map(str::to_string) else {
        return;
    };
    let is_admin = user.is_some_and(|u| u.role == Role::Admin);

    state.message = Some(match key {
        KeyCode::Char('p') => match user {
            None => "Log in to apply".to_string(),
            Some(u) => match store.apply_to_job(&id, &u.id) {
                Ok(true) => format!("Applied to #{}", id),
                Ok(false) => format!("Already applied to #{}", id),
                Err(e) => e.to_string(),
            },
        },
        KeyCode::Char('a') | KeyCode::Char('x') if !is_admin => {
            "Only admins can review postings".to_string()
        }
        KeyCode::Char('a') => match store.approve_job(&id) {
            Ok(job) => format!("Approved #{}", job.id),
            Err(e) => e.to_string(),
        },
        KeyCode::Char('x') => match store.reject_job(&id) {
            Ok(job) => format!("Rejected #{}", job.id),
            Err(e) => e.to_string(),
        },
        _ => return,
    });
}

fn run_loop<S: Storage>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    store: &mut JobStore<S>,
    user: Option<&User>,
) -> Result<()> {
    let mut list_state = ListState::default();
    list_state.select(Some(0));

    loop {
        terminal.draw(|frame| draw(frame, state, store, user, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let prev_selected = state.selected;
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down | KeyCode::Char('j') => state.next(),
                KeyCode::Up | KeyCode::Char('k') => state.prev(),
                KeyCode::Char('J') | KeyCode::PageDown => state.scroll_down(),
                KeyCode::Char('K') | KeyCode::PageUp => state.scroll_up(),
                code => handle_action(state, store, user, code),
            }
            if state.selected != prev_selected {
                list_state.select(Some(state.selected));
                state.message = None;
            }
        }
    }
    Ok(())
}

fn status_icon(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Pending => "?",
        JobStatus::Approved => " ",
        JobStatus::Rejected => "x",
    }
}

fn draw<S: Storage>(
    frame: &mut Frame,
    state: &AppState,
    store: &JobStore<S>,
    user: Option<&User>,
    list_state: &mut ListState,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(frame.area());

    // Left panel: job list
    let items: Vec<ListItem> = state
        .job_ids
        .iter()
        .map(|id| match store.get_job_by_id(id) {
            Some(job) => {
                let applied = user.is_some_and(|u| job.has_applicant(&u.id));
                ListItem::new(format!(
                    "{}{} {} | {}",
                    status_icon(job.status),
                    if applied { "+" } else { " " },
                    truncate_chars(&job.title, 32),
                    job.company
                ))
            }
            None => ListItem::new(format!("-  #{} (deleted)", id)),
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Jobs ({}) ", state.job_ids.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], list_state);

    // Right panel: job detail
    let detail = match state.current_id().and_then(|id| store.get_job_by_id(id)) {
        Some(job) => build_detail(job, user),
        None => Text::raw("No job selected"),
    };
    let detail_widget = Paragraph::new(detail)
        .block(Block::default().borders(Borders::ALL).title(" Detail "))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0));

    frame.render_widget(detail_widget, chunks[1]);

    // Footer help
    let help_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let footer = match &state.message {
        Some(msg) => format!(" {}", msg),
        None => " j/k:navigate  J/K:scroll  p:apply  a:approve x:reject (admin)  q:quit".to_string(),
    };
    let help = Paragraph::new(footer).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area[1]);
}

fn build_detail<'a>(job: &'a Job, user: Option<&User>) -> Text<'a> {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        &job.title,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("{} · {}", job.company, job.location)));

    let status_style = match job.status {
        JobStatus::Pending => Style::default().fg(Color::Yellow),
        JobStatus::Approved => Style::default().fg(Color::Green),
        JobStatus::Rejected => Style::default().fg(Color::Red),
    };
    lines.push(Line::from(Span::styled(
        format!("Status: {}", job.status),
        status_style,
    )));
    lines.push(Line::from(format!("Salary: {}", job.salary)));
    lines.push(Line::from(format!(
        "{} · {} · posted {}",
        job.category, job.experience, job.posted_date
    )));
    lines.push(Line::from(format!("Applicants: {}", job.applicants.len())));
    if user.is_some_and(|u| job.has_applicant(&u.id)) {
        lines.push(Line::from(Span::styled(
            "You have applied",
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::from(""));

    for line in textwrap::fill(&job.description, 70).lines() {
        lines.push(Line::from(line.to_string()));
    }

    for (label, items) in [
        ("Requirements", &job.requirements),
        ("Responsibilities", &job.responsibilities),
    ] {
        if items.is_empty() {
            continue;
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            label,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for item in items {
            lines.push(Line::from(format!("  • {}", item)));
        }
    }

    Text::from(lines)
}

/// Truncates on character boundaries, which matters for Cyrillic titles.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::rc::Rc;

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@example.mn", id),
            name: id.to_string(),
            role,
            company_name: None,
        }
    }

    fn store() -> JobStore<MemoryStorage> {
        JobStore::new(Rc::new(MemoryStorage::new())).unwrap()
    }

    #[test]
    fn test_truncate_chars_handles_cyrillic() {
        assert_eq!(truncate_chars("HR Менежер", 20), "HR Менежер");
        assert_eq!(truncate_chars("Харилцагчийн үйлчилгээ", 10), "Харилца...");
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut state = AppState::new(vec!["1".to_string(), "2".to_string()]);
        state.prev();
        assert_eq!(state.selected, 0);
        state.next();
        state.next();
        assert_eq!(state.selected, 1);
        assert_eq!(state.current_id(), Some("2"));
    }

    #[test]
    fn test_apply_action_requires_login() {
        let mut store = store();
        let mut state = AppState::new(vec!["1".to_string()]);
        handle_action(&mut state, &mut store, None, KeyCode::Char('p'));
        assert_eq!(state.message.as_deref(), Some("Log in to apply"));
        assert!(store.get_job_by_id("1").unwrap().applicants.is_empty());

        let candidate = user("c1", Role::Candidate);
        handle_action(&mut state, &mut store, Some(&candidate), KeyCode::Char('p'));
        assert_eq!(store.get_job_by_id("1").unwrap().applicants, vec!["c1"]);
    }

    #[test]
    fn test_review_actions_are_admin_only() {
        let mut store = store();
        let mut state = AppState::new(vec!["2".to_string()]);
        let candidate = user("c1", Role::Candidate);
        handle_action(&mut state, &mut store, Some(&candidate), KeyCode::Char('x'));
        assert_eq!(store.get_job_by_id("2").unwrap().status, JobStatus::Approved);

        let admin = user("a1", Role::Admin);
        handle_action(&mut state, &mut store, Some(&admin), KeyCode::Char('x'));
        assert_eq!(store.get_job_by_id("2").unwrap().status, JobStatus::Rejected);
        assert_eq!(state.message.as_deref(), Some("Rejected #2"));
    }
}
