use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListItem;

use crate::error::StoreError;
use crate::models::MovieRecord;

/// Build the three-line list entry for a movie: bold `Title, Year`, then the
/// director and the rating.
pub(crate) fn movie_list_item(movie: &MovieRecord, selected: bool) -> ListItem<'static> {
    let detail_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let mut headline_style = detail_style.add_modifier(Modifier::BOLD);
    if selected {
        headline_style = headline_style.fg(Color::Yellow);
    }

    ListItem::new(vec![
        Line::from(Span::styled(movie.headline(), headline_style)),
        Line::from(Span::styled(movie.director_line(), detail_style)),
        Line::from(Span::styled(movie.rating_line(), detail_style)),
        Line::from(""),
    ])
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Flatten a store error and its sources into one `a: b: c` string for the
/// log.
pub(crate) fn error_chain(err: StoreError) -> String {
    format!("{:#}", anyhow::Error::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_chain_includes_sources() {
        let err = StoreError::Insert(rusqlite::Error::InvalidQuery);
        let text = error_chain(err);
        assert!(text.starts_with("failed to insert movie: "));
        assert!(text.len() > "failed to insert movie: ".len());
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 10);
    }
}
