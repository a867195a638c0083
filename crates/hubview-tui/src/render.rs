//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, project it through `view::project`, and
//! draw to a ratatui Frame. They never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::text::truncate_with_ellipsis;
use crate::repos::render_repo_panel;
use crate::session::{render_profile, render_session_body};
use crate::state::AppState;
use crate::view::{self, APP_TITLE, Body, KeyHint, View};

/// Height of the title bar.
const HEADER_HEIGHT: u16 = 2;

/// Height of the status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Height of the profile card (four lines, a gap, the control, borders).
const PROFILE_HEIGHT: u16 = 8;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let view = view::project(app);
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_body(frame, &view.body, chunks[1]);
    render_status_line(frame, &view, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_body(frame: &mut Frame, body: &Body, area: Rect) {
    if render_session_body(frame, body, area) {
        return;
    }
    let Body::SignedIn {
        profile,
        sign_out,
        repos,
    } = body
    else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(PROFILE_HEIGHT), Constraint::Min(0)])
        .split(area);
    render_profile(frame, profile, sign_out, chunks[0]);
    render_repo_panel(frame, repos, chunks[1]);
}

/// Renders the notice (if any) followed by key hints.
fn render_status_line(frame: &mut Frame, view: &View, area: Rect) {
    let mut spans = Vec::new();
    if let Some(notice) = &view.notice {
        let room = (area.width as usize) / 2;
        spans.push(Span::styled(
            truncate_with_ellipsis(notice, room),
            Style::default().fg(Color::Red),
        ));
        spans.push(Span::raw("  "));
    }
    spans.extend(hint_spans(&view.hints));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hint_spans(hints: &[KeyHint]) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Yellow);
    let label_style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", label_style));
        }
        spans.push(Span::styled(hint.key, key_style));
        spans.push(Span::styled(format!(" {}", hint.label), label_style));
    }
    spans
}
