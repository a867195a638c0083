//! Repository panel rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::common::text::truncate_with_ellipsis;
use crate::session::control_line;
use crate::view::{REPOSITORIES_TITLE, RepoPanel, RepoRow};

const PRIVATE_BADGE: &str = " Private ";

/// Renders the repository panel: load control, status message, and the list.
pub fn render_repo_panel(frame: &mut Frame, panel: &RepoPanel, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {REPOSITORIES_TITLE} "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let status_height = u16::from(panel.status.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(status_height),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(control_line(&panel.load, inner.width)), chunks[0]);

    if let Some(status) = &panel.status {
        frame.render_widget(
            Paragraph::new(Span::styled(
                truncate_with_ellipsis(status, inner.width as usize),
                Style::default().fg(Color::Yellow),
            )),
            chunks[1],
        );
    }

    let width = chunks[2].width as usize;
    let items: Vec<ListItem> = panel.rows.iter().map(|row| repo_item(row, width)).collect();
    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(panel.selected);
    frame.render_stateful_widget(list, chunks[2], &mut state);
}

fn repo_item(row: &RepoRow, width: usize) -> ListItem<'static> {
    // Two columns for the highlight symbol.
    let mut room = width.saturating_sub(2);
    let mut spans = Vec::new();
    if row.private {
        room = room.saturating_sub(PRIVATE_BADGE.len() + 1);
    }
    spans.push(Span::styled(
        truncate_with_ellipsis(&row.full_name, room),
        Style::default().fg(Color::White),
    ));
    if row.private {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            PRIVATE_BADGE,
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }
    let url = Line::from(Span::styled(
        format!("  {}", truncate_with_ellipsis(&row.url, room)),
        Style::default().fg(Color::DarkGray),
    ));
    ListItem::new(vec![Line::from(spans), url])
}
