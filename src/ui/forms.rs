use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::NewMovie;

/// Longest year the form accepts. Any 18-digit number fits in an `i64`.
const MAX_YEAR_DIGITS: usize = 18;

/// The four text inputs plus which one currently has focus.
#[derive(Default, Clone, Debug)]
pub(crate) struct MovieForm {
    pub(crate) title: String,
    pub(crate) year: String,
    pub(crate) director: String,
    pub(crate) rating: String,
    pub(crate) active: MovieField,
}

/// Focus targets on the form. `Submit` is the "Add movie" button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum MovieField {
    #[default]
    Title,
    Year,
    Director,
    Rating,
    Submit,
}

impl MovieField {
    /// Field label, also used as the placeholder text while a field is empty.
    pub(crate) fn label(self) -> &'static str {
        match self {
            MovieField::Title => "Title",
            MovieField::Year => "Year",
            MovieField::Director => "Director",
            MovieField::Rating => "Rating",
            MovieField::Submit => "Add movie",
        }
    }

    /// Text inputs in display order.
    pub(crate) const INPUTS: [MovieField; 4] = [
        MovieField::Title,
        MovieField::Year,
        MovieField::Director,
        MovieField::Rating,
    ];
}

impl MovieForm {
    /// Move focus forward (Title → Year → Director → Rating → button).
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            MovieField::Title => MovieField::Year,
            MovieField::Year => MovieField::Director,
            MovieField::Director => MovieField::Rating,
            MovieField::Rating => MovieField::Submit,
            MovieField::Submit => MovieField::Title,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            MovieField::Title => MovieField::Submit,
            MovieField::Year => MovieField::Title,
            MovieField::Director => MovieField::Year,
            MovieField::Rating => MovieField::Director,
            MovieField::Submit => MovieField::Rating,
        };
    }

    /// Append a character to the active field. Year takes up to
    /// `MAX_YEAR_DIGITS` digits and rating takes digits with at most one
    /// decimal point, mimicking a numeric keypad.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            MovieField::Title => self.title.push(ch),
            MovieField::Director => self.director.push(ch),
            MovieField::Year => {
                if !ch.is_ascii_digit() || self.year.len() >= MAX_YEAR_DIGITS {
                    return false;
                }
                self.year.push(ch);
            }
            MovieField::Rating => {
                let accepted = ch.is_ascii_digit() || (ch == '.' && !self.rating.contains('.'));
                if !accepted {
                    return false;
                }
                self.rating.push(ch);
            }
            MovieField::Submit => return false,
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        if let Some(value) = self.value_mut(self.active) {
            value.pop();
        }
    }

    /// True when every input holds at least one character. Whitespace counts:
    /// a title of `" "` passes.
    pub(crate) fn is_complete(&self) -> bool {
        MovieField::INPUTS
            .iter()
            .all(|field| !self.value(*field).is_empty())
    }

    pub(crate) fn is_empty(&self) -> bool {
        MovieField::INPUTS
            .iter()
            .all(|field| self.value(*field).is_empty())
    }

    /// Reset all four inputs at once and return focus to the title.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn to_new_movie(&self) -> NewMovie {
        NewMovie::new(
            self.title.clone(),
            self.year.clone(),
            self.director.clone(),
            self.rating.clone(),
        )
    }

    pub(crate) fn value(&self, field: MovieField) -> &str {
        match field {
            MovieField::Title => &self.title,
            MovieField::Year => &self.year,
            MovieField::Director => &self.director,
            MovieField::Rating => &self.rating,
            MovieField::Submit => "",
        }
    }

    fn value_mut(&mut self, field: MovieField) -> Option<&mut String> {
        match field {
            MovieField::Title => Some(&mut self.title),
            MovieField::Year => Some(&mut self.year),
            MovieField::Director => Some(&mut self.director),
            MovieField::Rating => Some(&mut self.rating),
            MovieField::Submit => None,
        }
    }

    /// Character length of the requested field, used to place the cursor.
    pub(crate) fn value_len(&self, field: MovieField) -> usize {
        self.value(field).chars().count()
    }

    /// Render one input line: the label followed by the value, or a dimmed
    /// placeholder while the field is empty.
    pub(crate) fn build_line(&self, field: MovieField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            format!("<{}>", field.label().to_lowercase())
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Render the submit button, highlighted when it has focus.
    pub(crate) fn build_button(&self) -> Line<'static> {
        let style = if self.active == MovieField::Submit {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Line::from(Span::styled(
            format!("[ {} ]", MovieField::Submit.label()),
            style,
        ))
    }
}

/// Blocking warning shown when a submission is rejected. It carries a single
/// acknowledgement action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WarningDialog {
    pub(crate) title: &'static str,
    pub(crate) message: &'static str,
    pub(crate) action: &'static str,
}

impl WarningDialog {
    pub(crate) fn missing_fields() -> Self {
        Self {
            title: "Warning",
            message: "Please fill in all fields",
            action: "OK",
        }
    }
}
