//! Colours and text styles shared by the task board panels.

use ratatui::style::{Color, Modifier, Style};

use taskdeck_proto::task::TaskStatus;

/// Body text.
pub const TEXT: Color = Color::Rgb(220, 220, 228);

/// Placeholders, descriptions and timestamps.
pub const MUTED: Color = Color::Rgb(128, 128, 144);

/// Focused panels and the active filter.
pub const ACCENT: Color = Color::Rgb(94, 170, 255);

/// Endpoint dot while talking to an API.
pub const ONLINE: Color = Color::Rgb(80, 200, 120);

/// Endpoint dot in offline mode.
pub const OFFLINE: Color = Color::DarkGray;

/// Error banner background.
pub const DANGER: Color = Color::Rgb(190, 40, 50);

/// Form notices.
pub const CAUTION: Color = Color::Rgb(240, 190, 60);

#[must_use]
pub fn text() -> Style {
    Style::new().fg(TEXT)
}

#[must_use]
pub fn muted() -> Style {
    Style::new().fg(MUTED)
}

/// Task titles and field labels.
#[must_use]
pub fn strong() -> Style {
    text().add_modifier(Modifier::BOLD)
}

#[must_use]
pub fn accent() -> Style {
    Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Highlighted row of a focused list or tab bar.
#[must_use]
pub fn cursor_row() -> Style {
    Style::new()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

#[must_use]
pub fn panel_border(focused: bool) -> Style {
    if focused { Style::new().fg(ACCENT) } else { muted() }
}

/// Badge colour per status.
#[must_use]
pub const fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => CAUTION,
        TaskStatus::InProgress => ACCENT,
        TaskStatus::Done => ONLINE,
    }
}

#[must_use]
pub fn status_badge(status: TaskStatus) -> Style {
    Style::new()
        .fg(status_color(status))
        .add_modifier(Modifier::BOLD)
}

#[must_use]
pub fn error_banner() -> Style {
    Style::new()
        .fg(Color::White)
        .bg(DANGER)
        .add_modifier(Modifier::BOLD)
}

#[must_use]
pub fn notice() -> Style {
    Style::new().fg(CAUTION).add_modifier(Modifier::ITALIC)
}

#[must_use]
pub fn status_bar() -> Style {
    Style::new().fg(TEXT).bg(Color::Rgb(24, 26, 36))
}
