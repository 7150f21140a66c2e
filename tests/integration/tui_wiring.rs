//! Integration tests for TUI wiring.
//!
//! Feeds key events into `App`, runs the produced commands through the
//! in-memory repository, and checks the rendered screen on ratatui's
//! `TestBackend`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

use taskdeck::api::memory::InMemoryRepository;
use taskdeck::app::{App, PanelFocus};
use taskdeck::sync::{self, SyncCommand};
use taskdeck::ui;
use taskdeck_proto::task::{Filter, NewTask, TaskId, TaskStatus};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        assert!(app.handle_key_event(key(KeyCode::Char(c))).is_none());
    }
}

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Run `cmd` against `repo` and apply the result, as the main loop would.
async fn run(app: &mut App, repo: &InMemoryRepository, cmd: SyncCommand) {
    if let Some(event) = sync::execute(repo, cmd).await {
        app.apply_event(event);
    }
}

async fn loaded_app(repo: &InMemoryRepository) -> App {
    let mut app = App::new();
    let cmd = app.start();
    run(&mut app, repo, cmd).await;
    app
}

// =============================================================================
// Add-task form
// =============================================================================

#[tokio::test]
async fn typing_and_enter_creates_a_task() {
    let repo = InMemoryRepository::new();
    let mut app = loaded_app(&repo).await;
    assert!(render(&app).contains("No tasks yet. Add one!"));

    type_text(&mut app, "Buy milk");
    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.focus, PanelFocus::Description);
    type_text(&mut app, "2 litres");

    let cmd = app.handle_key_event(key(KeyCode::Enter)).unwrap();
    assert_eq!(cmd, SyncCommand::Create(NewTask::new("Buy milk", "2 litres")));
    assert!(app.form.title.is_empty());
    assert!(app.form.description.is_empty());

    run(&mut app, &repo, cmd).await;
    let screen = render(&app);
    assert!(screen.contains("[Pending] Buy milk"));
    assert!(screen.contains("2 litres"));
    assert!(screen.contains("Tasks (1)"));
}

#[tokio::test]
async fn enter_with_blank_title_shows_notice() {
    let repo = InMemoryRepository::new();
    let mut app = loaded_app(&repo).await;

    type_text(&mut app, "   ");
    assert!(app.handle_key_event(key(KeyCode::Enter)).is_none());
    assert!(render(&app).contains("Title is required!"));

    // Typing again clears the notice.
    type_text(&mut app, "x");
    assert!(app.notice.is_none());
}

// =============================================================================
// Filter bar
// =============================================================================

#[tokio::test]
async fn filter_keys_refetch_and_render_active_filter() {
    let repo = InMemoryRepository::seeded();
    let mut app = loaded_app(&repo).await;
    assert!(render(&app).contains("Tasks (3)"));

    app.focus = PanelFocus::Filter;
    let cmd = app.handle_key_event(key(KeyCode::Right)).unwrap();
    assert_eq!(app.board().filter(), Filter::Pending);
    run(&mut app, &repo, cmd).await;

    let screen = render(&app);
    assert!(screen.contains("Tasks (1)"));
    assert!(screen.contains("Write release notes"));
    assert!(!screen.contains("Sketch the board layout"));

    let cmd = app.handle_key_event(key(KeyCode::Char('4'))).unwrap();
    run(&mut app, &repo, cmd).await;
    assert_eq!(app.board().filter(), Filter::Done);
    assert!(render(&app).contains("[Done] Sketch the board layout"));
}

#[tokio::test]
async fn left_from_all_wraps_to_done() {
    let repo = InMemoryRepository::seeded();
    let mut app = loaded_app(&repo).await;
    app.focus = PanelFocus::Filter;

    assert!(app.handle_key_event(key(KeyCode::Left)).is_some());
    assert_eq!(app.board().filter(), Filter::Done);
}

// =============================================================================
// Task list
// =============================================================================

#[tokio::test]
async fn list_keys_update_and_delete_selected_task() {
    let repo = InMemoryRepository::seeded();
    let mut app = loaded_app(&repo).await;
    app.focus = PanelFocus::List;

    // Select "Write release notes" (id 3, pending).
    app.handle_key_event(key(KeyCode::Down));
    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.selected, 2);

    let cmd = app.handle_key_event(key(KeyCode::Char('i'))).unwrap();
    assert_eq!(
        cmd,
        SyncCommand::UpdateStatus {
            id: TaskId::from(3),
            status: TaskStatus::InProgress,
        }
    );
    run(&mut app, &repo, cmd).await;
    assert!(render(&app).contains("[In Progress] Write release notes"));

    // Same status again sends nothing.
    assert!(app.handle_key_event(key(KeyCode::Char('i'))).is_none());

    let cmd = app.handle_key_event(key(KeyCode::Char('x'))).unwrap();
    run(&mut app, &repo, cmd).await;
    let screen = render(&app);
    assert!(!screen.contains("Write release notes"));
    assert!(screen.contains("Tasks (2)"));
    assert_eq!(app.selected, 1);
}

#[tokio::test]
async fn enter_cycles_status_on_list() {
    let repo = InMemoryRepository::seeded();
    let mut app = loaded_app(&repo).await;
    app.focus = PanelFocus::List;

    // id 1 is done; the next status wraps to pending.
    let cmd = app.handle_key_event(key(KeyCode::Enter)).unwrap();
    assert_eq!(
        cmd,
        SyncCommand::UpdateStatus {
            id: TaskId::from(1),
            status: TaskStatus::Pending,
        }
    );
}

#[tokio::test]
async fn failed_delete_renders_banner() {
    let repo = InMemoryRepository::seeded();
    let mut app = loaded_app(&repo).await;

    run(
        &mut app,
        &repo,
        SyncCommand::Delete {
            id: TaskId::from(99),
        },
    )
    .await;
    let screen = render(&app);
    assert!(screen.contains("Failed to delete the task."));
    assert!(screen.contains("Tasks (3)"));
}

// =============================================================================
// Global keys
// =============================================================================

#[test]
fn tab_cycles_through_panels() {
    let mut app = App::new();
    assert_eq!(app.focus, PanelFocus::Title);
    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focus, PanelFocus::Description);
    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focus, PanelFocus::Filter);
    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focus, PanelFocus::List);
    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.focus, PanelFocus::Title);
    app.handle_key_event(key(KeyCode::BackTab));
    assert_eq!(app.focus, PanelFocus::List);
}

#[test]
fn q_types_in_form_but_quits_elsewhere() {
    let mut app = App::new();
    app.handle_key_event(key(KeyCode::Char('q')));
    assert!(!app.should_quit);
    assert_eq!(app.form.title, "q");

    app.focus = PanelFocus::List;
    app.handle_key_event(key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn esc_and_ctrl_c_quit() {
    let mut app = App::new();
    app.handle_key_event(key(KeyCode::Esc));
    assert!(app.should_quit);

    let mut app = App::new();
    app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
}

#[test]
fn status_bar_shows_endpoint_or_offline() {
    let app = App::new();
    assert!(render(&app).contains("offline"));

    let app = App::new().with_endpoint("http://localhost:8000/");
    assert!(render(&app).contains("http://localhost:8000/"));
}
