use crate::models::MovieRecord;

/// The movie list shown under the form. The contents are always a full copy of
/// the table; `selected` is just a scroll cursor.
#[derive(Default)]
pub(crate) struct MovieListScreen {
    pub(crate) movies: Vec<MovieRecord>,
    pub(crate) selected: usize,
}

impl MovieListScreen {
    /// Swap in a freshly fetched list, keeping the cursor in range.
    pub(crate) fn set_movies(&mut self, movies: Vec<MovieRecord>) {
        self.movies = movies;
        self.ensure_in_bounds();
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.movies.is_empty() {
            return;
        }
        let len = self.movies.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.movies.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        if self.movies.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.movies.len() {
            self.selected = self.movies.len() - 1;
        }
    }
}
