//! Kanban board interface.
//!
//! Tasks are laid out in three columns by status. Cards move between
//! columns with Ctrl+Left/Right, which goes through the task service so the
//! completion timestamp follows the status. The visible set is recomputed
//! through the filter layer after every change.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::dates::format_due;
use crate::fields::*;
use crate::filter::{filter_tasks, partition_by_status, summarize, without_archived, TaskFilter};
use crate::store::EntityStore;
use crate::task::{Task, TaskPatch};
use crate::tui::colors::{
    category_color, COLUMN_ACCENTS, PRIORITY_HIGH, PRIORITY_LOW, PRIORITY_MEDIUM,
};
use crate::tui::enums::BoardMode;
use crate::tui::input::InputField;

const SIDEBAR_WIDTH: u16 = 26;
const CARD_HEIGHT: usize = 5;

/// Board application state.
pub struct BoardApp<'a> {
    store: &'a mut EntityStore,
    filter: TaskFilter,
    show_archived: bool,
    mode: BoardMode,
    input: InputField,
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: [usize; 3],
    status_message: String,
    show_task_detail: bool,

    // Visible task ids per column: To Do, In Progress, Completed
    columns: [Vec<String>; 3],
}

impl<'a> BoardApp<'a> {
    /// Board over `store`, with no filters and the first column selected.
    pub fn new(store: &'a mut EntityStore, show_archived: bool) -> Self {
        let mut app = BoardApp {
            store,
            filter: TaskFilter::default(),
            show_archived,
            mode: BoardMode::Normal,
            input: InputField::new(),
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; 3],
            status_message: String::new(),
            show_task_detail: false,
            columns: Default::default(),
        };
        app.update_columns();
        app
    }

    /// Recompute the visible cards from the store and the current filter.
    fn update_columns(&mut self) {
        let visible = filter_tasks(self.store.tasks(), &self.filter);
        let visible = if self.show_archived {
            visible
        } else {
            without_archived(visible)
        };
        let grouped = partition_by_status(visible);
        let ids: [Vec<String>; 3] =
            Status::ALL.map(|s| grouped.column(s).iter().map(|t| t.id.clone()).collect());
        self.columns = ids;
        self.column_scroll_offsets = [0; 3];
        self.clamp_selection();
    }

    /// Ensure selected column and card indices are valid
    fn clamp_selection(&mut self) {
        if self.selected_column >= self.columns.len() {
            self.selected_column = 0;
        }
        let column_len = self.columns[self.selected_column].len();
        if column_len == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= column_len {
            self.selected_card = column_len - 1;
        }
    }

    fn selected_task_id(&self) -> Option<String> {
        self.columns[self.selected_column]
            .get(self.selected_card)
            .cloned()
    }

    fn selected_task(&self) -> Option<&Task> {
        let id = self.columns[self.selected_column].get(self.selected_card)?;
        self.store.tasks().iter().find(|t| &t.id == id)
    }

    /// Point the selection at `id` if it is visible.
    fn select_task(&mut self, id: &str) {
        for (column, ids) in self.columns.iter().enumerate() {
            if let Some(position) = ids.iter().position(|t| t == id) {
                self.selected_column = column;
                self.selected_card = position;
                return;
            }
        }
        self.clamp_selection();
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Move the selected card one column left or right.
    fn move_card(&mut self, forward: bool) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let current = Status::from_column(self.selected_column).unwrap_or_default();
        let target = if forward { current.next() } else { current.previous() };
        let Some(target) = target else {
            return;
        };

        match self.store.task_service().set_status(&id, target) {
            Ok(task) => {
                self.update_columns();
                self.select_task(&task.id);
                let msg = if task.is_completed() {
                    "Task completed!".to_string()
                } else {
                    format!("Moved task to {}", format_status(target))
                };
                self.set_status_message(msg);
            }
            Err(e) if e.is_not_found() => {
                self.update_columns();
                self.set_status_message("Task no longer exists");
            }
            Err(e) => self.set_status_message(format!("Failed to update task: {e}")),
        }
    }

    fn cycle_priority(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        let priority = task.priority.cycle();
        let patch = TaskPatch {
            priority: Some(priority),
            ..Default::default()
        };
        match self.store.task_service().update(&id, patch) {
            Ok(_) => {
                self.update_columns();
                self.select_task(&id);
                self.set_status_message(format!("Priority set to {}", format_priority(priority)));
            }
            Err(e) => self.set_status_message(format!("Failed to update task: {e}")),
        }
    }

    fn toggle_archived(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        let archive = !task.archived;
        let mut tasks = self.store.task_service();
        let result = if archive { tasks.archive(&id) } else { tasks.unarchive(&id) };
        match result {
            Ok(_) => {
                self.update_columns();
                self.select_task(&id);
                self.set_status_message(if archive { "Task archived" } else { "Task restored" });
            }
            Err(e) => self.set_status_message(format!("Failed to update task: {e}")),
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        match self.store.task_service().delete(&id) {
            Ok(task) => {
                self.update_columns();
                self.set_status_message(format!("Deleted '{}'", task.title));
            }
            Err(e) => self.set_status_message(format!("Failed to delete task: {e}")),
        }
    }

    fn quick_add(&mut self, title: String) {
        let title = title.trim().to_string();
        if title.is_empty() {
            self.set_status_message("Task title is required");
            return;
        }
        let category = self
            .filter
            .category
            .clone()
            .unwrap_or_else(|| self.store.preferred_category());
        let patch = TaskPatch::titled(title).with_category(category);
        let task = self.store.task_service().create(patch);
        self.update_columns();
        self.select_task(&task.id);
        if self.columns.iter().all(|c| !c.contains(&task.id)) {
            self.set_status_message("Task created (hidden by current filters)");
        } else {
            self.set_status_message("Task created");
        }
    }

    fn cycle_category_filter(&mut self) {
        let names: Vec<String> = self.store.categories().iter().map(|c| c.name.clone()).collect();
        let next = match &self.filter.category {
            None => names.first().cloned(),
            Some(current) => names
                .iter()
                .position(|n| n == current)
                .and_then(|i| names.get(i + 1).cloned()),
        };
        self.filter.category = next;
        self.update_columns();
        let label = self.filter.category.as_deref().unwrap_or("All Tasks");
        self.set_status_message(format!("Category: {label}"));
    }

    fn cycle_status_filter(&mut self) {
        self.filter.status = match self.filter.status {
            None => Some(Status::Todo),
            Some(s) => s.next(),
        };
        self.update_columns();
        let label = self.filter.status.map(format_status).unwrap_or("All Statuses");
        self.set_status_message(format!("Status: {label}"));
    }

    /// Handle a single key press. Returns true when the board should close.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            BoardMode::Search => {
                match key.code {
                    KeyCode::Esc => {
                        self.mode = BoardMode::Normal;
                        self.input.take();
                        self.filter.query.clear();
                        self.update_columns();
                        self.set_status_message("Search cleared");
                    }
                    KeyCode::Enter => {
                        self.mode = BoardMode::Normal;
                        let shown: usize = self.columns.iter().map(|c| c.len()).sum();
                        self.set_status_message(format!("Search: '{}' ({} tasks shown)", self.filter.query, shown));
                    }
                    KeyCode::Backspace => {
                        self.input.handle_backspace();
                        self.filter.query = self.input.value.clone();
                        self.update_columns();
                    }
                    KeyCode::Left => self.input.move_cursor_left(),
                    KeyCode::Right => self.input.move_cursor_right(),
                    KeyCode::Char(c) => {
                        self.input.handle_char(c);
                        self.filter.query = self.input.value.clone();
                        self.update_columns();
                    }
                    _ => {}
                }
                return false;
            }
            BoardMode::QuickAdd => {
                match key.code {
                    KeyCode::Esc => {
                        self.mode = BoardMode::Normal;
                        self.input.take();
                        self.status_message.clear();
                    }
                    KeyCode::Enter => {
                        self.mode = BoardMode::Normal;
                        let title = self.input.take();
                        self.quick_add(title);
                    }
                    KeyCode::Backspace => self.input.handle_backspace(),
                    KeyCode::Left => self.input.move_cursor_left(),
                    KeyCode::Right => self.input.move_cursor_right(),
                    KeyCode::Char(c) => self.input.handle_char(c),
                    _ => {}
                }
                return false;
            }
            BoardMode::ConfirmDelete => {
                self.mode = BoardMode::Normal;
                if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                    self.delete_selected();
                } else {
                    self.set_status_message("Delete cancelled");
                }
                return false;
            }
            BoardMode::Normal => {}
        }

        self.status_message.clear();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Esc | KeyCode::Char('q') => {
                if self.show_task_detail {
                    self.show_task_detail = false;
                } else {
                    return true;
                }
            }

            KeyCode::Enter => {
                self.show_task_detail = !self.show_task_detail && self.selected_task().is_some();
            }

            // Card movement between columns (check first, before regular navigation)
            KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => self.move_card(false),
            KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => self.move_card(true),

            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                if self.selected_column < self.columns.len() - 1 {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down => {
                let column_len = self.columns[self.selected_column].len();
                if column_len > 0 && self.selected_card < column_len - 1 {
                    self.selected_card += 1;
                }
            }

            KeyCode::Char('/') => {
                self.mode = BoardMode::Search;
                self.input = InputField::with_value(&self.filter.query);
            }
            KeyCode::Char('a') => {
                self.mode = BoardMode::QuickAdd;
                self.input = InputField::new();
            }
            KeyCode::Char('x') => {
                if let Some(task) = self.selected_task() {
                    let msg = format!("Delete '{}'? (y/n)", task.title);
                    self.mode = BoardMode::ConfirmDelete;
                    self.set_status_message(msg);
                }
            }
            KeyCode::Char('c') => self.cycle_category_filter(),
            KeyCode::Char('s') => self.cycle_status_filter(),
            KeyCode::Char('p') => self.cycle_priority(),
            KeyCode::Char('z') => self.toggle_archived(),
            KeyCode::Char('t') => {
                self.show_archived = !self.show_archived;
                self.update_columns();
                let msg = if self.show_archived { "Showing archived tasks" } else { "Hiding archived tasks" };
                self.set_status_message(msg);
            }
            KeyCode::Char('r') => {
                if self.filter.is_empty() {
                    self.set_status_message("No filters to clear");
                } else {
                    self.filter = TaskFilter::default();
                    self.update_columns();
                    self.set_status_message("Filters cleared");
                }
            }
            KeyCode::Char('h') => {
                self.set_status_message(
                    "a: Add | Ctrl+←/→: Move | p: Priority | z: Archive | x: Delete | /: Search | c: Category | s: Status | t: Archived | r: Reset | Esc: Exit",
                );
            }
            _ => {}
        }
        false
    }

    /// Poll for keyboard input
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    /// Render the board
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Sidebar + board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(chunks[1]);

        self.render_header(f, chunks[0]);
        self.render_sidebar(f, body[0]);
        self.render_board(f, body[1]);
        self.render_status_bar(f, chunks[2]);

        if self.show_task_detail {
            self.render_task_detail_popup(f);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let summary = summarize(self.store.tasks(), Local::now().date_naive());
        let header_text = vec![Line::from(vec![
            Span::styled("TASK BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!(
                    "{} tasks · {} to do · {} in progress · {} completed · {} overdue",
                    summary.total, summary.todo, summary.in_progress, summary.completed, summary.overdue
                ),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];

        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, area);
    }

    fn render_sidebar(&self, f: &mut Frame, area: Rect) {
        let highlight = |active: bool| {
            if active {
                Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default()
            }
        };

        let mut lines = vec![Line::from(Span::styled(
            "All Tasks",
            highlight(self.filter.category.is_none()),
        ))];
        for category in self.store.categories() {
            let active = self.filter.category.as_deref() == Some(category.name.as_str());
            lines.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(category_color(&category.color))),
                Span::styled(category.name.clone(), highlight(active)),
                Span::raw(format!(" ({})", category.task_count)),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Status", Style::default().add_modifier(Modifier::BOLD))));
        lines.push(Line::from(Span::styled("All Statuses", highlight(self.filter.status.is_none()))));
        for status in Status::ALL {
            lines.push(Line::from(Span::styled(
                format_status(status),
                highlight(self.filter.status == Some(status)),
            )));
        }

        let sidebar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Categories"));
        f.render_widget(sidebar, area);
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        for (i, &column_area) in columns_layout.iter().enumerate() {
            self.render_column(f, column_area, i);
        }
    }

    fn render_column(&mut self, f: &mut Frame, area: Rect, column_index: usize) {
        let is_selected = column_index == self.selected_column;
        let accent = COLUMN_ACCENTS[column_index];
        let status = Status::from_column(column_index).unwrap_or_default();
        let cards = &self.columns[column_index];

        let border_style = if is_selected {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", format_status(status), cards.len()))
            .border_style(border_style);

        let inner = block.inner(area);
        f.render_widget(block, area);

        if cards.is_empty() {
            let empty = Paragraph::new(format!("No {} tasks", format_status(status).to_lowercase()))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(empty, inner);
            return;
        }

        let available_height = inner.height as usize;
        let visible_cards = (available_height / CARD_HEIGHT).max(1);

        let scroll_offset = if is_selected {
            let start_visible = self.column_scroll_offsets[column_index];
            if self.selected_card < start_visible {
                self.selected_card
            } else if self.selected_card >= start_visible + visible_cards {
                self.selected_card + 1 - visible_cards
            } else {
                start_visible
            }
        } else {
            self.column_scroll_offsets[column_index]
        };
        self.column_scroll_offsets[column_index] = scroll_offset;

        let today = Local::now().date_naive();
        let mut current_y = 0;
        let mut rendered_cards = 0;
        for (card_index, task_id) in self.columns[column_index].iter().enumerate().skip(scroll_offset) {
            if current_y + CARD_HEIGHT > available_height {
                break;
            }
            let Some(task) = self.store.tasks().iter().find(|t| &t.id == task_id) else {
                continue;
            };
            let card_area = Rect {
                x: inner.x,
                y: inner.y + current_y as u16,
                width: inner.width,
                height: CARD_HEIGHT as u16,
            };
            let is_this_card_selected = is_selected && card_index == self.selected_card;
            render_card(f, card_area, task, is_this_card_selected, today);
            current_y += CARD_HEIGHT;
            rendered_cards += 1;
        }

        let remaining = self.columns[column_index]
            .len()
            .saturating_sub(scroll_offset + rendered_cards);
        if scroll_offset > 0 {
            let indicator = Paragraph::new(format!("▲ +{} above", scroll_offset))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(indicator, Rect { height: 1, ..inner });
        }
        if remaining > 0 && inner.height > 0 {
            let indicator = Paragraph::new(format!("▼ +{} below", remaining))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    y: inner.y + inner.height - 1,
                    height: 1,
                    ..inner
                },
            );
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = match self.mode {
            BoardMode::Search => format!("Search: {}_ | Enter to apply, Esc to clear", self.input.value),
            BoardMode::QuickAdd => format!("New task: {}_ | Enter to add, Esc to cancel", self.input.value),
            _ if !self.status_message.is_empty() => self.status_message.clone(),
            _ => {
                let shown: usize = self.columns.iter().map(|c| c.len()).sum();
                let archived = if self.show_archived { " [+Archived]" } else { "" };
                let query = if self.filter.query.is_empty() {
                    String::new()
                } else {
                    format!(" [Search: {}]", self.filter.query)
                };
                format!(
                    "Tasks: {}{}{} | a: Add | Ctrl+←/→: Move | /: Search | c: Category | s: Status | h: Help",
                    shown, archived, query
                )
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(COLUMN_ACCENTS[self.selected_column]).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task) = self.selected_task() else {
            return;
        };

        let popup_area = {
            let area = f.area();
            let popup_width = (area.width * 70) / 100;
            let popup_height = (area.height * 70) / 100;
            let x = (area.width - popup_width) / 2;
            let y = (area.height - popup_height) / 2;
            Rect::new(x, y, popup_width, popup_height)
        };
        f.render_widget(Clear, popup_area);

        let today = Local::now().date_naive();
        let completed = task
            .completed_at
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".into());
        let detail_lines = vec![
            Line::from(vec![Span::styled(
                task.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!("Status:     {}", format_status(task.status))),
            Line::from(format!("Priority:   {}", format_priority(task.priority))),
            Line::from(format!("Category:   {}", task.category)),
            Line::from(format!("Due:        {} ({})", task.due_date, format_due(task.due_date, today))),
            Line::from(format!(
                "Created:    {}",
                task.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            )),
            Line::from(format!("Completed:  {}", completed)),
            Line::from(format!("Archived:   {}", if task.archived { "yes" } else { "no" })),
            Line::from(""),
            Line::from("Description:"),
            Line::from(if task.description.is_empty() { "-".to_string() } else { task.description.clone() }),
        ];

        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Press Enter to close)")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(COLUMN_ACCENTS[task.status.column()]).add_modifier(Modifier::BOLD));

        let popup_paragraph = Paragraph::new(detail_lines)
            .block(popup_block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup_paragraph, popup_area);
    }

    /// Main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => PRIORITY_HIGH,
        Priority::Medium => PRIORITY_MEDIUM,
        Priority::Low => PRIORITY_LOW,
    }
}

/// Render a single task card
fn render_card(f: &mut Frame, area: Rect, task: &Task, is_selected: bool, today: chrono::NaiveDate) {
    let accent = priority_color(task.priority);
    let style = if is_selected {
        Style::default().bg(accent).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray)
    };

    // Simple word wrapping, two lines of title at most
    let available_width = area.width.saturating_sub(2) as usize;
    let mut lines: Vec<String> = Vec::new();
    let mut current_line = String::new();
    for word in task.title.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.chars().count() + 1 + word.chars().count() <= available_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
            if lines.len() >= 2 {
                break;
            }
        }
    }
    if !current_line.is_empty() && lines.len() < 2 {
        lines.push(current_line);
    }

    let mut card_text: Vec<Line> = lines.into_iter().map(Line::from).collect();
    let due_style = if task.is_overdue(today) {
        Style::default().fg(PRIORITY_HIGH)
    } else {
        Style::default()
    };
    let archived = if task.archived { " · archived" } else { "" };
    card_text.push(Line::from(vec![
        Span::raw(format!("{} | {} | ", task.priority.as_str(), task.category)),
        Span::styled(format_due(task.due_date, today), due_style),
        Span::raw(archived),
    ]));

    let card_block = Paragraph::new(card_text)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(accent)))
        .style(style)
        .wrap(Wrap { trim: true });
    f.render_widget(card_block, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Defaults;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn seeded() -> EntityStore {
        EntityStore::open(None, Defaults::default()).expect("builtin seed")
    }

    fn type_text(app: &mut BoardApp<'_>, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_columns_follow_status() {
        let mut store = seeded();
        let expected: Vec<usize> = Status::ALL
            .iter()
            .map(|s| store.tasks().iter().filter(|t| t.status == *s && !t.archived).count())
            .collect();
        let app = BoardApp::new(&mut store, false);
        let actual: Vec<usize> = app.columns.iter().map(|c| c.len()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_ctrl_right_moves_card_and_stamps_completion() {
        let mut store = seeded();
        let id = {
            let mut app = BoardApp::new(&mut store, false);
            app.selected_column = Status::InProgress.column();
            app.selected_card = 0;
            let id = app.selected_task_id().expect("in-progress card");
            app.handle_key(ctrl(KeyCode::Right));
            assert_eq!(app.selected_column, Status::Completed.column());
            assert_eq!(app.selected_task_id().as_deref(), Some(id.as_str()));
            id
        };
        let task = store.task_service().get(&id).expect("task");
        assert_eq!(task.status, Status::Completed);
        assert!(task.completed_at.is_some());
    }

    #[test]
    fn test_ctrl_left_from_completed_clears_completion() {
        let mut store = seeded();
        let id = {
            let mut app = BoardApp::new(&mut store, false);
            app.selected_column = Status::Completed.column();
            app.selected_card = 0;
            let id = app.selected_task_id().expect("completed card");
            app.handle_key(ctrl(KeyCode::Left));
            id
        };
        let task = store.task_service().get(&id).expect("task");
        assert_eq!(task.status, Status::InProgress);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_search_filters_cards() {
        let mut store = seeded();
        let mut app = BoardApp::new(&mut store, false);
        app.handle_key(press(KeyCode::Char('/')));
        type_text(&mut app, "GROCERIES");
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.mode, BoardMode::Normal);
        assert_eq!(app.filter.query, "GROCERIES");
        let shown: usize = app.columns.iter().map(|c| c.len()).sum();
        assert_eq!(shown, 1);

        app.handle_key(press(KeyCode::Char('r')));
        assert!(app.filter.is_empty());
    }

    #[test]
    fn test_quick_add_creates_todo_in_first_category() {
        let mut store = seeded();
        let before = store.tasks().len();
        let first_category = store.categories()[0].name.clone();
        {
            let mut app = BoardApp::new(&mut store, false);
            app.handle_key(press(KeyCode::Char('a')));
            type_text(&mut app, "Water plants");
            app.handle_key(press(KeyCode::Enter));
            assert_eq!(app.selected_column, Status::Todo.column());
            assert_eq!(app.selected_task().map(|t| t.title.as_str()), Some("Water plants"));
        }
        assert_eq!(store.tasks().len(), before + 1);
        let created = store.tasks().last().expect("created");
        assert_eq!(created.category, first_category);
        assert_eq!(created.priority, Priority::Medium);
        assert_eq!(created.status, Status::Todo);
    }

    #[test]
    fn test_quick_add_rejects_blank_title() {
        let mut store = seeded();
        let before = store.tasks().len();
        {
            let mut app = BoardApp::new(&mut store, false);
            app.handle_key(press(KeyCode::Char('a')));
            type_text(&mut app, "   ");
            app.handle_key(press(KeyCode::Enter));
            assert_eq!(app.status_message, "Task title is required");
        }
        assert_eq!(store.tasks().len(), before);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut store = seeded();
        let before = store.tasks().len();
        {
            let mut app = BoardApp::new(&mut store, false);
            app.handle_key(press(KeyCode::Char('x')));
            app.handle_key(press(KeyCode::Char('n')));
            assert_eq!(app.mode, BoardMode::Normal);
        }
        assert_eq!(store.tasks().len(), before);
        {
            let mut app = BoardApp::new(&mut store, false);
            app.handle_key(press(KeyCode::Char('x')));
            app.handle_key(press(KeyCode::Char('y')));
        }
        assert_eq!(store.tasks().len(), before - 1);
    }

    #[test]
    fn test_archive_hides_card_until_toggled() {
        let mut store = seeded();
        let mut app = BoardApp::new(&mut store, false);
        let shown = |app: &BoardApp<'_>| app.columns.iter().map(|c| c.len()).sum::<usize>();
        let before = shown(&app);

        app.handle_key(press(KeyCode::Char('z')));
        assert_eq!(shown(&app), before - 1);

        app.handle_key(press(KeyCode::Char('t')));
        assert_eq!(shown(&app), before);
    }

    #[test]
    fn test_category_and_status_filters_cycle_back_to_all() {
        let mut store = seeded();
        let count = store.categories().len();
        let mut app = BoardApp::new(&mut store, false);

        app.handle_key(press(KeyCode::Char('c')));
        assert_eq!(app.filter.category.as_deref(), Some("Work"));
        for _ in 0..count {
            app.handle_key(press(KeyCode::Char('c')));
        }
        assert_eq!(app.filter.category, None);

        for expected in [Some(Status::Todo), Some(Status::InProgress), Some(Status::Completed), None] {
            app.handle_key(press(KeyCode::Char('s')));
            assert_eq!(app.filter.status, expected);
        }
    }

    #[test]
    fn test_render_shows_three_columns() {
        let mut store = seeded();
        let mut app = BoardApp::new(&mut store, false);
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).expect("terminal");
        terminal.draw(|f| app.render(f)).expect("draw");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("TASK BOARD"));
        assert!(text.contains("To Do"));
        assert!(text.contains("In Progress"));
        assert!(text.contains("Completed"));
    }
}
