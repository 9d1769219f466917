use crate::models::{MoviePatch, MovieRecord};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortField {
    Title,
    Year,
    Director,
    Genre,
    Actors,
    Rating,
    Seen,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// In-memory cache of the full record list, loaded once per session. Filter
/// and sort run entirely on this copy; mutations are applied optimistically
/// and rolled back if the server rejects them.
#[derive(Default)]
pub struct MovieList {
    movies: Vec<MovieRecord>,
    sort_by: Option<(SortField, SortDirection)>,
}

/// Receipt for an optimistic edit: remembers which record changed and the
/// prior values of exactly the fields the patch touched.
#[derive(Debug)]
pub struct PendingUpdate {
    title: String,
    prior: MoviePatch,
}

impl MovieList {
    pub fn load(&mut self, movies: Vec<MovieRecord>) {
        self.movies = movies;
        self.sort_by = None;
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Free-text filter, matched case-insensitively against the string form
    /// of every field. The literal terms "seen" and "not seen" select on the
    /// boolean flag instead of its stringified form.
    pub fn filtered(&self, term: &str) -> Vec<&MovieRecord> {
        let term = term.to_lowercase();
        match term.as_str() {
            "" => self.movies.iter().collect(),
            "seen" => self.movies.iter().filter(|m| m.seen).collect(),
            "not seen" => self.movies.iter().filter(|m| !m.seen).collect(),
            _ => self.movies.iter().filter(|m| record_matches(m, &term)).collect(),
        }
    }

    /// Sorts by one column; picking the same column again flips direction.
    pub fn sort_by(&mut self, field: SortField) {
        let direction = match self.sort_by {
            Some((current, SortDirection::Ascending)) if current == field => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.sort_by = Some((field, direction));

        self.movies.sort_by(|a, b| {
            let ordering = compare_field(a, b, field);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    pub fn sort_state(&self) -> Option<(SortField, SortDirection)> {
        self.sort_by
    }

    /// Applies the patch to the local copy immediately and returns a receipt
    /// for reconciling with the server's answer. `None` if no record matches.
    pub fn begin_update(&mut self, title: &str, patch: &MoviePatch) -> Option<PendingUpdate> {
        let movie = self.movies.iter_mut().find(|m| m.title_matches(title))?;
        let prior = MoviePatch {
            rating: patch.rating.map(|_| movie.rating),
            seen: patch.seen.map(|_| movie.seen),
        };
        patch.apply_to(movie);
        Some(PendingUpdate { title: movie.title.clone(), prior })
    }

    /// The server acknowledged; the optimistic value is now the real one.
    pub fn confirm_update(&mut self, pending: PendingUpdate) {
        drop(pending);
    }

    /// The server rejected the edit; restore the prior field values.
    pub fn fail_update(&mut self, pending: PendingUpdate) {
        if let Some(movie) = self.movies.iter_mut().find(|m| m.title_matches(&pending.title)) {
            pending.prior.apply_to(movie);
        }
    }
}

fn record_matches(movie: &MovieRecord, term: &str) -> bool {
    movie.title.to_lowercase().contains(term)
        || movie.year.to_lowercase().contains(term)
        || movie.director.to_lowercase().contains(term)
        || movie.genre.to_lowercase().contains(term)
        || movie.poster.to_lowercase().contains(term)
        || movie.actors.iter().any(|a| a.to_lowercase().contains(term))
        || movie.rating.to_string().contains(term)
        || movie.seen.to_string().contains(term)
}

fn compare_field(a: &MovieRecord, b: &MovieRecord, field: SortField) -> std::cmp::Ordering {
    match field {
        SortField::Title => a.title.cmp(&b.title),
        SortField::Year => a.year.cmp(&b.year),
        SortField::Director => a.director.cmp(&b.director),
        SortField::Genre => a.genre.cmp(&b.genre),
        SortField::Actors => a.actors.join(", ").cmp(&b.actors.join(", ")),
        SortField::Rating => a.rating.total_cmp(&b.rating),
        SortField::Seen => a.seen.cmp(&b.seen),
    }
}
