//! Album models
//!
//! Album records as exchanged with the remote album API, plus the input
//! payload used for create and update.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FieldErrors;

/// Earliest release year accepted for a listing.
pub const MIN_YEAR: i32 = 1900;

// == Genre ==
/// The store's closed list of genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Soul,
    #[serde(rename = "R&B/Soul")]
    RnbSoul,
    Motown,
    Pop,
    Rock,
    Funk,
    Disco,
    Other,
}

impl Genre {
    /// Parses the exact wire label, as listed in the store.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Soul" => Some(Genre::Soul),
            "R&B/Soul" => Some(Genre::RnbSoul),
            "Motown" => Some(Genre::Motown),
            "Pop" => Some(Genre::Pop),
            "Rock" => Some(Genre::Rock),
            "Funk" => Some(Genre::Funk),
            "Disco" => Some(Genre::Disco),
            "Other" => Some(Genre::Other),
            _ => None,
        }
    }

    /// Maps a free-form upstream genre label onto the store's genres.
    ///
    /// Checks run in a fixed order, so "Pop/Soul" lands on `Soul`.
    pub fn from_upstream(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("soul") {
            Genre::Soul
        } else if label.contains("r&b") || label.contains("rhythm") {
            Genre::RnbSoul
        } else if label.contains("motown") {
            Genre::Motown
        } else if label.contains("pop") {
            Genre::Pop
        } else if label.contains("rock") {
            Genre::Rock
        } else if label.contains("funk") {
            Genre::Funk
        } else if label.contains("disco") {
            Genre::Disco
        } else {
            Genre::Other
        }
    }
}

// == Album ==
/// A stored album listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub price: f64,
    pub genre: Genre,
    pub image_url: String,
}

// == Album Input ==
/// Body for creating or updating an album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumInput {
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub price: f64,
    pub genre: Genre,
    pub image_url: String,
}

impl AlbumInput {
    /// Validates the payload.
    ///
    /// Returns every failing field with its messages, empty when valid.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_required(&mut errors, "title", &self.title, "Title is required.");
        check_required(&mut errors, "artist", &self.artist, "Artist is required.");
        check_year(&mut errors, self.year);
        check_price(&mut errors, self.price);
        check_required(&mut errors, "imageUrl", &self.image_url, "Image URL is required.");
        errors
    }
}

// == Album Draft ==
/// Album body as submitted by a client, before validation.
///
/// Every field is optional and numbers may arrive as strings, so that a
/// partial or sloppy form yields per-field errors rather than a decode
/// failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDraft {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub year: Option<Value>,
    pub price: Option<Value>,
    pub genre: Option<String>,
    pub image_url: Option<String>,
}

impl AlbumDraft {
    /// Validates the draft into an [`AlbumInput`].
    ///
    /// Collects every failing field before giving up.
    pub fn into_input(self) -> Result<AlbumInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = self.title.unwrap_or_default();
        check_required(&mut errors, "title", &title, "Title is required.");
        let artist = self.artist.unwrap_or_default();
        check_required(&mut errors, "artist", &artist, "Artist is required.");

        let year = self
            .year
            .as_ref()
            .and_then(coerce_number)
            .filter(|y| y.fract() == 0.0 && y.abs() <= f64::from(i32::MAX))
            .map(|y| y as i32);
        match year {
            Some(year) => check_year(&mut errors, year),
            None => add_error(&mut errors, "year", "Invalid year."),
        }

        let price = self.price.as_ref().and_then(coerce_number);
        match price {
            Some(price) => check_price(&mut errors, price),
            None => add_error(&mut errors, "price", "Price must be a number."),
        }

        let genre = self.genre.as_deref().and_then(Genre::from_label);
        if genre.is_none() {
            add_error(&mut errors, "genre", "Please select a genre.");
        }

        let image_url = self.image_url.unwrap_or_default();
        check_required(&mut errors, "imageUrl", &image_url, "Image URL is required.");

        match (year, price, genre) {
            (Some(year), Some(price), Some(genre)) if errors.is_empty() => Ok(AlbumInput {
                title,
                artist,
                year,
                price,
                genre,
                image_url,
            }),
            _ => Err(errors),
        }
    }
}

fn add_error(errors: &mut FieldErrors, field: &str, msg: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(msg.to_string());
}

fn check_required(errors: &mut FieldErrors, field: &str, value: &str, msg: &str) {
    if value.trim().is_empty() {
        add_error(errors, field, msg);
    }
}

fn check_year(errors: &mut FieldErrors, year: i32) {
    if !(MIN_YEAR..=max_year()).contains(&year) {
        add_error(errors, "year", "Invalid year.");
    }
}

fn check_price(errors: &mut FieldErrors, price: f64) {
    if !price.is_finite() || price < 0.0 {
        add_error(errors, "price", "Price must be positive.");
    }
}

/// Reads a JSON number, or a string holding one.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Latest accepted release year: next calendar year, for pre-orders.
pub fn max_year() -> i32 {
    chrono::Utc::now().year() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> AlbumInput {
        AlbumInput {
            title: "What's Going On".to_string(),
            artist: "Marvin Gaye".to_string(),
            year: 1971,
            price: 24.99,
            genre: Genre::Soul,
            image_url: "https://is1-ssl.mzstatic.com/image/cover.jpg".to_string(),
        }
    }

    #[test]
    fn test_valid_input_has_no_errors() {
        assert!(valid_input().validate().is_empty());
    }

    #[test]
    fn test_missing_fields_reported() {
        let input = AlbumInput {
            title: "  ".to_string(),
            artist: String::new(),
            image_url: String::new(),
            ..valid_input()
        };

        let errors = input.validate();
        assert_eq!(errors["title"], vec!["Title is required."]);
        assert_eq!(errors["artist"], vec!["Artist is required."]);
        assert_eq!(errors["imageUrl"], vec!["Image URL is required."]);
        assert!(!errors.contains_key("year"));
    }

    #[test]
    fn test_year_bounds() {
        let too_old = AlbumInput {
            year: 1899,
            ..valid_input()
        };
        let too_new = AlbumInput {
            year: max_year() + 1,
            ..valid_input()
        };
        let next_year = AlbumInput {
            year: max_year(),
            ..valid_input()
        };

        assert!(too_old.validate().contains_key("year"));
        assert!(too_new.validate().contains_key("year"));
        assert!(next_year.validate().is_empty());
    }

    #[test]
    fn test_negative_price_rejected() {
        let input = AlbumInput {
            price: -0.01,
            ..valid_input()
        };
        assert_eq!(input.validate()["price"], vec!["Price must be positive."]);

        let free = AlbumInput {
            price: 0.0,
            ..valid_input()
        };
        assert!(free.validate().is_empty());
    }

    #[test]
    fn test_album_wire_format() {
        let json = r#"{"id":7,"title":"Innervisions","artist":"Stevie Wonder","year":1973,
            "price":22.99,"genre":"R&B/Soul","imageUrl":"https://x/y.jpg"}"#;
        let album: Album = serde_json::from_str(json).unwrap();

        assert_eq!(album.id, 7);
        assert_eq!(album.genre, Genre::RnbSoul);
        assert_eq!(album.image_url, "https://x/y.jpg");

        let back = serde_json::to_value(&album).unwrap();
        assert_eq!(back["imageUrl"], "https://x/y.jpg");
        assert_eq!(back["genre"], "R&B/Soul");
    }

    #[test]
    fn test_unknown_genre_rejected() {
        let json = r#"{"title":"t","artist":"a","year":2000,"price":1,
            "genre":"Polka","imageUrl":"u"}"#;
        assert!(serde_json::from_str::<AlbumInput>(json).is_err());
    }

    #[test]
    fn test_genre_from_label_matches_wire_names() {
        for genre in [
            Genre::Soul,
            Genre::RnbSoul,
            Genre::Motown,
            Genre::Pop,
            Genre::Rock,
            Genre::Funk,
            Genre::Disco,
            Genre::Other,
        ] {
            let label = serde_json::to_value(genre).unwrap();
            assert_eq!(Genre::from_label(label.as_str().unwrap()), Some(genre));
        }
        assert_eq!(Genre::from_label("Polka"), None);
        assert_eq!(Genre::from_label("soul"), None);
    }

    fn draft(json: serde_json::Value) -> AlbumDraft {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_draft_into_input() {
        let input = draft(serde_json::json!({
            "title": "What's Going On",
            "artist": "Marvin Gaye",
            "year": "1971",
            "price": 24.99,
            "genre": "Soul",
            "imageUrl": "https://is1-ssl.mzstatic.com/image/cover.jpg"
        }))
        .into_input()
        .unwrap();

        assert_eq!(input, valid_input());
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let errors = AlbumDraft::default().into_input().unwrap_err();

        assert_eq!(errors["title"], vec!["Title is required."]);
        assert_eq!(errors["artist"], vec!["Artist is required."]);
        assert_eq!(errors["year"], vec!["Invalid year."]);
        assert_eq!(errors["price"], vec!["Price must be a number."]);
        assert_eq!(errors["genre"], vec!["Please select a genre."]);
        assert_eq!(errors["imageUrl"], vec!["Image URL is required."]);
    }

    #[test]
    fn test_draft_unknown_genre_and_bad_numbers() {
        let errors = draft(serde_json::json!({
            "title": "t",
            "artist": "a",
            "year": 1999.5,
            "price": "free",
            "genre": "Polka",
            "imageUrl": "u"
        }))
        .into_input()
        .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors["genre"], vec!["Please select a genre."]);
        assert_eq!(errors["year"], vec!["Invalid year."]);
        assert_eq!(errors["price"], vec!["Price must be a number."]);
    }

    #[test]
    fn test_genre_from_upstream() {
        assert_eq!(Genre::from_upstream("Neo-Soul"), Genre::Soul);
        assert_eq!(Genre::from_upstream("R&B"), Genre::RnbSoul);
        assert_eq!(Genre::from_upstream("Rhythm and Blues"), Genre::RnbSoul);
        assert_eq!(Genre::from_upstream("MOTOWN"), Genre::Motown);
        assert_eq!(Genre::from_upstream("Pop"), Genre::Pop);
        assert_eq!(Genre::from_upstream("Hard Rock"), Genre::Rock);
        assert_eq!(Genre::from_upstream("Funk"), Genre::Funk);
        assert_eq!(Genre::from_upstream("Disco"), Genre::Disco);
        assert_eq!(Genre::from_upstream("Jazz"), Genre::Other);
    }
}
