//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        PanelFocus::Title | PanelFocus::Description => {
            "Enter: add task | ↑↓: field | Tab: switch panel | Esc: quit"
        }
        PanelFocus::Filter => "←→/hl: filter | 1-4: pick | r: refresh | Tab: switch panel | q: quit",
        PanelFocus::List => {
            "↑↓/jk: select | Enter: next status | p/i/d: set status | x: delete | r: refresh | q: quit"
        }
    };

    let (dot_color, endpoint) = if app.endpoint.is_empty() {
        (theme::OFFLINE, "offline")
    } else {
        (theme::ONLINE, app.endpoint.as_str())
    };

    let status_line = Line::from(vec![
        Span::styled(concat!("TaskDeck v", env!("CARGO_PKG_VERSION")), theme::strong()),
        Span::raw(" | "),
        Span::styled("●", theme::text().fg(dot_color)),
        Span::raw(format!(" {endpoint}")),
        Span::raw(" | "),
        Span::styled(help_text, theme::muted()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar());
    frame.render_widget(paragraph, area);
}
