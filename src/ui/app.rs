use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{error, info, warn};

use crate::db::MovieStore;
use crate::error::StoreError;
use crate::models::MovieRecord;

use super::forms::{MovieField, MovieForm, WarningDialog};
use super::helpers::{centered_rect, error_chain, movie_list_item};
use super::screens::MovieListScreen;

/// Height of the form block: four inputs, a spacer, the button and borders.
const FORM_HEIGHT: u16 = 8;
/// Footer space reserved for key hints.
const FOOTER_HEIGHT: u16 = 2;
/// Rows skipped by PageUp/PageDown in the movie list.
const PAGE_STEP: isize = 5;

/// Whether a modal is covering the screen.
enum Mode {
    Normal,
    Warning(WarningDialog),
}

/// Observable state of the form. Validation and the insert both run inside a
/// single `submit` call, so only these three are ever visible between keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Empty,
    Editing,
    /// The warning dialog is up; typed values are still in place.
    Rejected,
}

/// Result of one submit attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field was empty; nothing was written and the warning is showing.
    Rejected,
    /// The row was written with this id, the form cleared, the list reloaded.
    Saved(i64),
    /// The store refused the insert. The error went to the log and the form
    /// keeps its values.
    Failed,
}

/// Owns the store, the form and the cached movie list.
pub struct App {
    store: MovieStore,
    form: MovieForm,
    list: MovieListScreen,
    mode: Mode,
}

impl App {
    pub fn new(store: MovieStore) -> Self {
        Self {
            store,
            form: MovieForm::default(),
            list: MovieListScreen::default(),
            mode: Mode::Normal,
        }
    }

    /// First-frame setup: make sure the table exists, then load it. A schema
    /// failure is logged and otherwise ignored; the fetch that follows will
    /// fail and log on its own.
    pub fn mount(&mut self) {
        match self.store.ensure_schema() {
            Ok(()) => info!("Movies table ready"),
            Err(err) => error!(error = %error_chain(err), "failed to create Movies table"),
        }
        self.refresh();
    }

    /// Replace the whole list with a fresh copy of the table. On failure the
    /// previous list stays on screen.
    pub fn refresh(&mut self) -> bool {
        match self.store.fetch_all() {
            Ok(movies) => {
                self.list.set_movies(movies);
                true
            }
            Err(err) => {
                error!(error = %error_chain(err), "failed to load movies");
                false
            }
        }
    }

    /// Validate the form and, when every field holds something, write it.
    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.form.is_complete() {
            warn!("submission rejected: empty field");
            self.mode = Mode::Warning(WarningDialog::missing_fields());
            return SubmitOutcome::Rejected;
        }

        match self.store.insert(&self.form.to_new_movie()) {
            Ok(movie) => {
                info!(id = movie.id, title = %movie.title, "movie added");
                self.form.clear();
                self.refresh();
                SubmitOutcome::Saved(movie.id)
            }
            Err(err) => {
                error!(error = %error_chain(err), "failed to insert movie");
                SubmitOutcome::Failed
            }
        }
    }

    /// Dispatch one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => {
                self.handle_normal_key(code, &mut exit);
                // `submit` may have raised the dialog.
                mem::replace(&mut self.mode, Mode::Normal)
            }
            Mode::Warning(dialog) => self.handle_warning_key(code, dialog),
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) {
        match code {
            KeyCode::Esc => *exit = true,
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Tab => self.form.next_field(),
            KeyCode::BackTab => self.form.previous_field(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Up => self.list.move_selection(-1),
            KeyCode::Down => self.list.move_selection(1),
            KeyCode::PageUp => self.list.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.list.move_selection(PAGE_STEP),
            KeyCode::Home => self.list.select_first(),
            KeyCode::End => self.list.select_last(),
            KeyCode::Char(ch) => {
                self.form.push_char(ch);
            }
            _ => {}
        }
    }

    /// The dialog swallows every key except its single acknowledgement.
    fn handle_warning_key(&mut self, code: KeyCode, dialog: WarningDialog) -> Mode {
        match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Mode::Normal,
            _ => Mode::Warning(dialog),
        }
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.list.movies
    }

    pub fn form_phase(&self) -> FormPhase {
        match self.mode {
            Mode::Warning(_) => FormPhase::Rejected,
            Mode::Normal if self.form.is_empty() => FormPhase::Empty,
            Mode::Normal => FormPhase::Editing,
        }
    }

    /// Hand the connection back for an explicit close.
    pub fn shutdown(self) -> Result<(), StoreError> {
        self.store.close()
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_movie_list(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if let Mode::Warning(dialog) = &self.mode {
            self.draw_warning(frame, area, dialog);
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("New Movie").borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let mut lines: Vec<Line> = MovieField::INPUTS
            .iter()
            .map(|field| self.form.build_line(*field))
            .collect();
        lines.push(Line::from(""));
        lines.push(self.form.build_button());

        frame.render_widget(Paragraph::new(lines), inner);

        if !matches!(self.mode, Mode::Normal) {
            return;
        }
        if let Some(row) = MovieField::INPUTS
            .iter()
            .position(|field| *field == self.form.active)
        {
            let field = self.form.active;
            let prefix = field.label().len() as u16 + 2;
            let cursor_x = inner.x + prefix + self.form.value_len(field) as u16;
            let cursor_y = inner.y + row as u16;
            if cursor_y < inner.y + inner.height {
                frame.set_cursor_position((cursor_x.min(inner.right()), cursor_y));
            }
        }
    }

    fn draw_movie_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Movies ({})", self.list.movies.len()));

        if self.list.movies.is_empty() {
            let message = Paragraph::new("No movies yet. Fill in the form and press Enter.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<_> = self
            .list
            .movies
            .iter()
            .enumerate()
            .map(|(idx, movie)| movie_list_item(movie, idx == self.list.selected))
            .collect();
        let mut state = ListState::default().with_selected(Some(self.list.selected));
        frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let hint = Style::default().fg(Color::Gray);
        let line = match self.mode {
            Mode::Warning(_) => Line::from(vec![
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(" OK", hint),
            ]),
            Mode::Normal => Line::from(vec![
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(" Add  ", hint),
                Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(" Next field  ", hint),
                Span::styled("↑/↓", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(" Scroll  ", hint),
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(" Quit", hint),
            ]),
        };
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::TOP));
        frame.render_widget(paragraph, area);
    }

    fn draw_warning(&self, frame: &mut Frame, area: Rect, dialog: &WarningDialog) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(dialog.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(dialog.message),
            Line::from(""),
            Line::from(Span::styled(
                format!("[ {} ]", dialog.action),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn mounted_app() -> App {
        let mut app = App::new(MovieStore::open_in_memory().unwrap());
        app.mount();
        app
    }

    /// Type `title`, `year`, `director`, `rating` into the form with Tab in
    /// between, exactly as a user would.
    fn fill(app: &mut App, values: [&str; 4]) {
        for (idx, value) in values.iter().enumerate() {
            for ch in value.chars() {
                app.handle_key(KeyCode::Char(ch));
            }
            if idx < 3 {
                app.handle_key(KeyCode::Tab);
            }
        }
    }

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    const INCEPTION: [&str; 4] = ["Inception", "2010", "Christopher Nolan", "8.8"];

    #[test]
    fn valid_submission_adds_one_row_and_clears_form() {
        let mut app = mounted_app();
        fill(&mut app, INCEPTION);
        assert_eq!(app.form_phase(), FormPhase::Editing);

        let outcome = app.submit();

        let SubmitOutcome::Saved(id) = outcome else {
            panic!("expected save, got {outcome:?}");
        };
        assert_eq!(app.store.count().unwrap(), 1);
        assert!(app.form.is_empty());
        assert_eq!(app.form_phase(), FormPhase::Empty);
        assert_eq!(app.movies().len(), 1);
        assert_eq!(app.movies()[0].id, id);
        assert_eq!(app.movies()[0].title, "Inception");

        let screen = screen_text(&app, 70, 30);
        assert!(screen.contains("Inception, 2010"));
        assert!(screen.contains("Director: Christopher Nolan"));
        assert!(screen.contains("Rating: 8.8"));
    }

    #[test]
    fn any_single_empty_field_is_rejected() {
        for missing in 0..4 {
            let mut app = mounted_app();
            let mut values = INCEPTION;
            values[missing] = "";
            fill(&mut app, values);

            assert_eq!(app.submit(), SubmitOutcome::Rejected);
            assert_eq!(app.store.count().unwrap(), 0);
            assert_eq!(app.form_phase(), FormPhase::Rejected);
            assert!(screen_text(&app, 70, 30).contains("Please fill in all fields"));
        }
    }

    #[test]
    fn rejected_form_keeps_typed_values() {
        let mut app = mounted_app();
        fill(&mut app, ["Inception", "2010", "Christopher Nolan", ""]);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.form_phase(), FormPhase::Rejected);

        // Typing is ignored until the dialog is acknowledged.
        app.handle_key(KeyCode::Char('9'));
        assert_eq!(app.form.rating, "");
        assert!(!app.handle_key(KeyCode::Esc));
        assert_eq!(app.form_phase(), FormPhase::Editing);

        assert_eq!(app.form.title, "Inception");
        assert_eq!(app.form.year, "2010");
        assert_eq!(app.form.director, "Christopher Nolan");
        assert_eq!(app.form.active, MovieField::Rating);
    }

    #[test]
    fn typed_numbers_always_reach_the_store() {
        let mut app = mounted_app();
        let long_year = "1".repeat(20);
        fill(&mut app, ["Inception", long_year.as_str(), "Christopher Nolan", "8.8.8"]);

        assert!(matches!(app.submit(), SubmitOutcome::Saved(_)));
        assert_eq!(app.form_phase(), FormPhase::Empty);
        let movie = &app.movies()[0];
        assert_eq!(movie.year, "1".repeat(18).parse::<i64>().unwrap());
        assert_eq!(movie.rating, 8.88);
    }

    #[test]
    fn whitespace_only_title_is_accepted() {
        // Known gap: the check is "non-empty", not "non-blank".
        let mut app = mounted_app();
        fill(&mut app, [" ", "2010", "Christopher Nolan", "8.8"]);

        assert!(matches!(app.submit(), SubmitOutcome::Saved(_)));
        assert_eq!(app.movies()[0].title, " ");
    }

    #[test]
    fn n_submissions_list_n_movies() {
        let mut app = mounted_app();
        let titles = ["Alien", "Heat", "Ran"];
        for title in titles {
            fill(&mut app, [title, "1980", "Someone", "7.5"]);
            app.handle_key(KeyCode::Enter);
        }

        assert_eq!(app.store.fetch_all().unwrap().len(), 3);
        assert_eq!(app.movies().len(), 3);
        let screen = screen_text(&app, 70, 40);
        assert_eq!(screen.matches("Director: Someone").count(), 3);
        assert!(screen.contains("Movies (3)"));
    }

    #[test]
    fn duplicates_render_as_separate_entries() {
        let mut app = mounted_app();
        fill(&mut app, INCEPTION);
        app.submit();
        fill(&mut app, INCEPTION);
        app.submit();

        let ids: Vec<_> = app.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        let screen = screen_text(&app, 70, 40);
        assert_eq!(screen.matches("Inception, 2010").count(), 2);
    }

    #[test]
    fn remounting_keeps_existing_rows() {
        let mut app = mounted_app();
        fill(&mut app, INCEPTION);
        app.submit();

        app.mount();

        assert_eq!(app.store.count().unwrap(), 1);
        assert_eq!(app.movies().len(), 1);
    }

    #[test]
    fn failed_insert_keeps_form_values() {
        // No mount, so the table does not exist and the insert fails.
        let mut app = App::new(MovieStore::open_in_memory().unwrap());
        fill(&mut app, INCEPTION);

        assert_eq!(app.submit(), SubmitOutcome::Failed);
        assert_eq!(app.form.title, "Inception");
        assert_eq!(app.form.rating, "8.8");
        assert_eq!(app.form_phase(), FormPhase::Editing);
    }

    #[test]
    fn failed_fetch_leaves_stale_list() {
        let mut app = mounted_app();
        fill(&mut app, INCEPTION);
        app.submit();

        app.store.conn_for_tests().execute("DROP TABLE Movies", []).unwrap();

        assert!(!app.refresh());
        assert_eq!(app.movies().len(), 1);
    }

    #[test]
    fn list_scrolls_with_arrow_keys() {
        let mut app = mounted_app();
        for title in ["A", "B", "C"] {
            fill(&mut app, [title, "2000", "D", "5"]);
            app.submit();
        }

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.list.movies[app.list.selected].title, "C");
        app.handle_key(KeyCode::Home);
        assert_eq!(app.list.selected, 0);
    }

    #[test]
    fn escape_quits_and_shutdown_closes_store() {
        let mut app = mounted_app();
        assert!(app.handle_key(KeyCode::Esc));
        app.shutdown().unwrap();
    }

    #[test]
    fn empty_store_shows_hint() {
        let app = mounted_app();
        let screen = screen_text(&app, 70, 30);
        assert!(screen.contains("No movies yet"));
        assert!(screen.contains("Title: <title>"));
    }
}
