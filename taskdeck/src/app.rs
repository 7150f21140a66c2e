//! Application state and event handling.
//!
//! [`App`] is the shell: it owns the [`TaskBoard`] and the add-task form,
//! turns key presses into [`SyncCommand`]s for the sync worker, and routes
//! the resulting [`SyncEvent`]s back into the board. Views only ever see
//! `&App`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use taskdeck_proto::task::{Filter, TaskStatus};

use crate::form::{FormField, TaskForm};
use crate::sync::{SyncCommand, SyncEvent};
use crate::tasks::TaskBoard;

/// Default chrono format for task creation times.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Which part of the screen is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Title line of the add-task form (default).
    Title,
    /// Description line of the add-task form.
    Description,
    /// Filter bar.
    Filter,
    /// Task list.
    List,
}

/// Main application state.
pub struct App {
    /// Tasks, filter and error banner.
    board: TaskBoard,
    /// Add-task drafts.
    pub form: TaskForm,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Selected row in the task list.
    pub selected: usize,
    /// Transient form validation message.
    pub notice: Option<String>,
    /// Where tasks come from, shown in the status bar.
    pub endpoint: String,
    /// chrono format for task creation times.
    pub timestamp_format: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new application with an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: TaskBoard::new(),
            form: TaskForm::default(),
            focus: PanelFocus::Title,
            selected: 0,
            notice: None,
            endpoint: String::new(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            should_quit: false,
        }
    }

    /// Set the maximum task title length accepted by the form.
    #[must_use]
    pub fn with_max_task_title_len(mut self, max: usize) -> Self {
        self.form = TaskForm::new(max);
        self
    }

    /// Set the endpoint label shown in the status bar.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the chrono format used to show task creation times.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Read-only view of the task board.
    #[must_use]
    pub const fn board(&self) -> &TaskBoard {
        &self.board
    }

    /// Initial load: fetch the default filter.
    pub fn start(&mut self) -> SyncCommand {
        let ticket = self.board.begin_fetch(Filter::default());
        SyncCommand::List { ticket }
    }

    /// Switch to `filter`. Selecting the active filter again is a no-op.
    pub fn select_filter(&mut self, filter: Filter) -> Option<SyncCommand> {
        if filter == self.board.filter() && self.board.latest_ticket().is_some() {
            return None;
        }
        let ticket = self.board.begin_fetch(filter);
        Some(SyncCommand::List { ticket })
    }

    /// Re-fetch the current filter.
    pub fn refresh(&mut self) -> SyncCommand {
        let ticket = self.board.begin_fetch(self.board.filter());
        SyncCommand::List { ticket }
    }

    /// Note that `cmd` never reached the sync worker.
    ///
    /// A dropped listing leaves the board on its new filter with the old
    /// rows until the next fetch, so the notice points at `r`.
    pub fn report_unsent(&mut self, cmd: &SyncCommand) {
        let message = match cmd {
            SyncCommand::List { .. } => "Busy, task list not refreshed. Press r to retry.",
            _ => "Busy, request not sent. Try again.",
        };
        self.notice = Some(message.to_string());
    }

    /// Submit the add-task form.
    ///
    /// A blank title produces a notice and no command.
    pub fn submit_form(&mut self) -> Option<SyncCommand> {
        match self.form.submit() {
            Ok(new_task) => {
                self.notice = None;
                self.focus = PanelFocus::Title;
                Some(SyncCommand::Create(new_task))
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    /// Request deletion of the selected task.
    pub fn delete_selected(&self) -> Option<SyncCommand> {
        let task = self.board.tasks().get(self.selected)?;
        Some(SyncCommand::Delete {
            id: task.id.clone(),
        })
    }

    /// Request a status change for the selected task. Choosing the status
    /// it already has sends nothing.
    pub fn set_selected_status(&self, status: TaskStatus) -> Option<SyncCommand> {
        let task = self.board.tasks().get(self.selected)?;
        if task.status == status {
            return None;
        }
        Some(SyncCommand::UpdateStatus {
            id: task.id.clone(),
            status,
        })
    }

    /// Advance the selected task to its next status.
    pub fn cycle_selected_status(&self) -> Option<SyncCommand> {
        let status = self.board.tasks().get(self.selected)?.status.next();
        self.set_selected_status(status)
    }

    /// Apply a result from the sync worker to the board.
    pub fn apply_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Listed { ticket, result } => {
                if self.board.apply_listing(ticket, result) {
                    self.selected = 0;
                }
            }
            SyncEvent::Created(result) => self.board.apply_created(result),
            SyncEvent::Deleted { id, result } => self.board.apply_deleted(&id, result),
            SyncEvent::StatusUpdated { id, result } => {
                self.board.apply_status_update(&id, result);
            }
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.board.len().saturating_sub(1));
    }

    /// Handle a key event.
    ///
    /// Returns a command when the key press needs a repository call.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::BackTab, _) => {
                self.cycle_focus_backward();
                return None;
            }
            (KeyCode::Tab, _) => {
                self.cycle_focus_forward();
                return None;
            }
            _ => {}
        }

        // Focus-specific shortcuts
        match self.focus {
            PanelFocus::Title | PanelFocus::Description => self.handle_form_key(key),
            PanelFocus::Filter => self.handle_filter_key(key),
            PanelFocus::List => self.handle_list_key(key),
        }
    }

    /// Handle key event when a form field is focused.
    fn handle_form_key(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        if key.code == KeyCode::Enter {
            return self.submit_form();
        }
        self.notice = None;
        match key.code {
            KeyCode::Char(c) => self.form.enter_char(c),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Left => self.form.move_cursor_left(),
            KeyCode::Right => self.form.move_cursor_right(),
            KeyCode::Home => self.form.move_cursor_home(),
            KeyCode::End => self.form.move_cursor_end(),
            KeyCode::Up => self.set_focus(PanelFocus::Title),
            KeyCode::Down => self.set_focus(PanelFocus::Description),
            _ => {}
        }
        None
    }

    /// Keys shared by the filter bar and the task list.
    fn handle_board_key(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('r') => Some(self.refresh()),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.select_filter(Filter::ALL[index])
            }
            _ => None,
        }
    }

    /// Handle key event when the filter bar is focused.
    fn handle_filter_key(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.select_filter(self.board.filter().prev()),
            KeyCode::Right | KeyCode::Char('l') => self.select_filter(self.board.filter().next()),
            _ => self.handle_board_key(key),
        }
    }

    /// Handle key event when the task list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Enter => self.cycle_selected_status(),
            KeyCode::Char('p') => self.set_selected_status(TaskStatus::Pending),
            KeyCode::Char('i') => self.set_selected_status(TaskStatus::InProgress),
            KeyCode::Char('d') => self.set_selected_status(TaskStatus::Done),
            KeyCode::Char('x') | KeyCode::Delete => self.delete_selected(),
            _ => self.handle_board_key(key),
        }
    }

    fn set_focus(&mut self, focus: PanelFocus) {
        self.focus = focus;
        match focus {
            PanelFocus::Title => self.form.focus(FormField::Title),
            PanelFocus::Description => self.form.focus(FormField::Description),
            PanelFocus::Filter | PanelFocus::List => {}
        }
    }

    /// Cycle focus forward: Title -> Description -> Filter -> List -> Title.
    fn cycle_focus_forward(&mut self) {
        self.set_focus(match self.focus {
            PanelFocus::Title => PanelFocus::Description,
            PanelFocus::Description => PanelFocus::Filter,
            PanelFocus::Filter => PanelFocus::List,
            PanelFocus::List => PanelFocus::Title,
        });
    }

    /// Cycle focus backward: Title -> List -> Filter -> Description -> Title.
    fn cycle_focus_backward(&mut self) {
        self.set_focus(match self.focus {
            PanelFocus::Title => PanelFocus::List,
            PanelFocus::List => PanelFocus::Filter,
            PanelFocus::Filter => PanelFocus::Description,
            PanelFocus::Description => PanelFocus::Title,
        });
    }

    /// Select the previous task.
    const fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Select the next task.
    fn select_next(&mut self) {
        if self.selected < self.board.len().saturating_sub(1) {
            self.selected += 1;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
