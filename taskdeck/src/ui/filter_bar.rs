//! Filter bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Tabs},
};

use taskdeck_proto::task::Filter;

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the four filter buttons, highlighting the active one.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Filter;
    let active = app.board().filter();

    let titles: Vec<Line> = Filter::ALL
        .iter()
        .enumerate()
        .map(|(idx, filter)| Line::from(format!("{} {}", idx + 1, filter.label())))
        .collect();

    let block = Block::default()
        .title("Filter")
        .borders(Borders::ALL)
        .border_style(theme::panel_border(is_focused));

    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(theme::muted())
        .highlight_style(if is_focused {
            theme::cursor_row()
        } else {
            theme::accent()
        })
        .divider("|")
        .block(block);

    frame.render_widget(tabs, area);
}
