//! Media descriptors accepted by the scraper.

use serde::{Deserialize, Serialize};

/// A movie to look up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieMedia {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    pub year: u32,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowMedia {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    pub season: u32,
    pub episode: u32,
}

/// What the caller wants streams for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaDescriptor {
    Movie(MovieMedia),
    Show(ShowMedia),
}

impl MediaDescriptor {
    pub fn title(&self) -> &str {
        match self {
            MediaDescriptor::Movie(m) => &m.title,
            MediaDescriptor::Show(s) => &s.title,
        }
    }

    /// IMDb id, ignoring blank values.
    pub fn imdb_id(&self) -> Option<&str> {
        let id = match self {
            MediaDescriptor::Movie(m) => m.imdb_id.as_deref(),
            MediaDescriptor::Show(s) => s.imdb_id.as_deref(),
        };
        id.filter(|id| !id.trim().is_empty())
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            MediaDescriptor::Movie(_) => MediaKind::Movie,
            MediaDescriptor::Show(_) => MediaKind::Show,
        }
    }
}

impl From<MovieMedia> for MediaDescriptor {
    fn from(movie: MovieMedia) -> Self {
        MediaDescriptor::Movie(movie)
    }
}

impl From<ShowMedia> for MediaDescriptor {
    fn from(show: ShowMedia) -> Self {
        MediaDescriptor::Show(show)
    }
}

/// Discriminant of [`MediaDescriptor`], used for labels and error prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Show,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "show",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_movie() {
        let json = r#"{"type": "movie", "title": "Example", "year": 2020}"#;
        let media: MediaDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(
            media,
            MediaDescriptor::Movie(MovieMedia {
                title: "Example".to_string(),
                imdb_id: None,
                year: 2020,
            })
        );
        assert_eq!(media.kind(), MediaKind::Movie);
    }

    #[test]
    fn test_deserialize_show_with_imdb_id() {
        let json = r#"{"type": "show", "title": "Series", "imdbId": "tt0903747", "season": 1, "episode": 3}"#;
        let media: MediaDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(media.imdb_id(), Some("tt0903747"));
        assert_eq!(media.title(), "Series");
        assert_eq!(media.kind(), MediaKind::Show);
    }

    #[test]
    fn test_blank_imdb_id_is_ignored() {
        let media = MediaDescriptor::Movie(MovieMedia {
            title: "Example".to_string(),
            imdb_id: Some("  ".to_string()),
            year: 2020,
        });
        assert_eq!(media.imdb_id(), None);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{"type": "album", "title": "X"}"#;
        assert!(serde_json::from_str::<MediaDescriptor>(json).is_err());
    }
}
