use serde::{Deserialize, Serialize};

use crate::author::Author;

/// A title in the catalogue.
///
/// `author` is a denormalized copy of the record referenced by `author_id`.
/// It is filled in by the service layer and is never the source of truth:
/// storage backends persist only `author_id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    #[serde(rename = "bookID")]
    pub id: i64,
    #[serde(rename = "authID")]
    pub author_id: i64,
    #[serde(rename = "auth", skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    pub title: String,
    pub publication: String,
    /// `day/month/year`, validated positionally by the service layer.
    #[serde(rename = "publishedDate")]
    pub published_date: String,
}

impl Book {
    pub fn new(
        id: i64,
        author_id: i64,
        title: impl Into<String>,
        publication: impl Into<String>,
        published_date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            author_id,
            author: None,
            title: title.into(),
            publication: publication.into(),
            published_date: published_date.into(),
        }
    }

    /// Attach the resolved author record.
    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    /// Return a copy of this record carrying a different id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// The storable part of the record: everything but the embedded author.
    pub fn without_author(&self) -> Self {
        Self {
            author: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_states() -> Book {
        Book::new(1, 1, "2 States", "Scholastic", "16/03/2016")
    }

    #[test]
    fn embedded_author_is_omitted_when_absent() {
        let value = serde_json::to_value(two_states()).unwrap();
        assert_eq!(value["bookID"], 1);
        assert_eq!(value["authID"], 1);
        assert_eq!(value["publishedDate"], "16/03/2016");
        assert!(value.get("auth").is_none());
    }

    #[test]
    fn embedded_author_is_serialized_under_auth() {
        let author = Author::new(1, "Chetan", "Bhagat", "06/04/2001", "Chetan");
        let value = serde_json::to_value(two_states().with_author(author)).unwrap();
        assert_eq!(value["auth"]["firstName"], "Chetan");
    }

    #[test]
    fn decodes_partial_body() {
        let book: Book =
            serde_json::from_str(r#"{"bookID": 3, "authID": 2, "title": "Wings of Fire"}"#)
                .unwrap();
        assert_eq!(book.id, 3);
        assert_eq!(book.author_id, 2);
        assert!(book.publication.is_empty());
        assert!(book.author.is_none());
    }

    #[test]
    fn without_author_strips_only_the_embedded_record() {
        let author = Author::new(1, "Chetan", "Bhagat", "06/04/2001", "Chetan");
        let stored = two_states().with_author(author).without_author();
        assert_eq!(stored, two_states());
    }
}
