use serde::{Deserialize, Serialize};

/// One tracked movie. The title doubles as the lookup key for the public
/// API, compared case-insensitively; see `store` for how each backend
/// resolves it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: String,
    pub director: String,
    pub actors: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub seen: bool,
    pub genre: String,
    pub poster: String,
}

impl MovieRecord {
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

/// Partial update of the two mutable fields. Absent fields are left
/// untouched by the store.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MoviePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seen: Option<bool>,
}

impl MoviePatch {
    pub fn apply_to(&self, record: &mut MovieRecord) {
        if let Some(rating) = self.rating {
            record.rating = rating;
        }
        if let Some(seen) = self.seen {
            record.seen = seen;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> MovieRecord {
        MovieRecord {
            title: "Dune".to_string(),
            year: "2021".to_string(),
            director: "Denis Villeneuve".to_string(),
            actors: vec!["Timothée Chalamet".to_string()],
            rating: 0.0,
            seen: false,
            genre: "Sci-Fi".to_string(),
            poster: "http://x/p.jpg".to_string(),
        }
    }

    #[test]
    fn title_match_ignores_case() {
        let movie = dune();
        assert!(movie.title_matches("DUNE"));
        assert!(movie.title_matches("dune"));
        assert!(!movie.title_matches("Dune: Part Two"));
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut movie = dune();
        let patch = MoviePatch { rating: Some(8.5), seen: None };
        patch.apply_to(&mut movie);
        assert_eq!(movie.rating, 8.5);
        assert!(!movie.seen);

        let patch = MoviePatch { rating: None, seen: Some(true) };
        patch.apply_to(&mut movie);
        assert_eq!(movie.rating, 8.5);
        assert!(movie.seen);
    }

    #[test]
    fn rating_and_seen_default_when_missing() {
        let movie: MovieRecord = serde_json::from_str(
            r#"{"title":"Heat","year":"1995","director":"Michael Mann",
                "actors":["Al Pacino","Robert De Niro"],
                "genre":"Crime","poster":"http://x/heat.jpg"}"#,
        )
        .unwrap();
        assert_eq!(movie.rating, 0.0);
        assert!(!movie.seen);
    }
}
