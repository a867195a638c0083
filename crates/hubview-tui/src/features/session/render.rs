//! Session feature view.
//!
//! Draws the signed-out, checking, and failed screens plus the profile card.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::common::text::truncate_with_ellipsis;
use crate::view::{Body, Control, ProfileView};

/// Renders a body that has no repository panel.
///
/// Returns `false` for `Body::SignedIn`, which the caller lays out itself.
pub fn render_session_body(frame: &mut Frame, body: &Body, area: Rect) -> bool {
    let lines = match body {
        Body::Checking { message } => vec![
            Line::from(""),
            Line::from(Span::styled(*message, Style::default().fg(Color::Yellow))),
        ],
        Body::SignedOut { message, connect } => vec![
            Line::from(""),
            Line::from(Span::styled(*message, Style::default().fg(Color::Gray))),
            Line::from(""),
            control_line(connect, area.width),
        ],
        Body::Failed { message, retry } => vec![
            Line::from(""),
            Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
            Line::from(""),
            control_line(retry, area.width),
        ],
        Body::SignedIn { .. } => return false,
    };

    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
    true
}

/// Renders the signed-in profile card with its sign-out control.
pub fn render_profile(frame: &mut Frame, profile: &ProfileView, sign_out: &Control, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Profile ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let lines = vec![
        Line::from(Span::styled(
            truncate_with_ellipsis(&profile.display_name, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_with_ellipsis(&profile.handle, width),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            truncate_with_ellipsis(&profile.email, width),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            truncate_with_ellipsis(&profile.avatar_url, width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        control_line(sign_out, inner.width),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

pub(crate) fn control_line(control: &Control, width: u16) -> Line<'static> {
    let style = if control.enabled {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![
        Span::styled(format!("[{}] ", control.key), style),
        Span::styled(control.label, style.add_modifier(Modifier::BOLD)),
    ];
    if let Some(href) = &control.href {
        let used = control.label.len() + 6;
        let room = (width as usize).saturating_sub(used);
        spans.push(Span::styled(
            format!("  {}", truncate_with_ellipsis(href, room)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}
