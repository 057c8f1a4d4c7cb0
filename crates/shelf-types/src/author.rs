use serde::{Deserialize, Serialize};

/// A writer in the catalogue.
///
/// All fields default when absent from a request body, so an incomplete
/// record reaches the validation engine and is rejected there with the list
/// of missing fields rather than by the JSON decoder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(rename = "authID")]
    pub id: i64,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    /// Date of birth. Kept as free text; nothing parses it.
    pub dob: String,
    #[serde(rename = "penName")]
    pub pen_name: String,
}

impl Author {
    pub fn new(
        id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        dob: impl Into<String>,
        pen_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            dob: dob.into(),
            pen_name: pen_name.into(),
        }
    }

    /// Return a copy of this record carrying a different id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_camel_case_wire_names() {
        let author = Author::new(1, "Chetan", "Bhagat", "06/04/2001", "Chetan");
        let value = serde_json::to_value(&author).unwrap();
        assert_eq!(value["authID"], 1);
        assert_eq!(value["firstName"], "Chetan");
        assert_eq!(value["lastName"], "Bhagat");
        assert_eq!(value["penName"], "Chetan");
        assert_eq!(value["dob"], "06/04/2001");
    }

    #[test]
    fn missing_json_fields_default_to_empty() {
        let author: Author = serde_json::from_str(r#"{"authID": 4, "firstName": "R"}"#).unwrap();
        assert_eq!(author.id, 4);
        assert_eq!(author.first_name, "R");
        assert!(author.last_name.is_empty());
        assert!(author.pen_name.is_empty());
        assert!(author.dob.is_empty());
    }

    #[test]
    fn with_id_replaces_only_the_id() {
        let author = Author::new(1, "A", "B", "01/01/1990", "C").with_id(9);
        assert_eq!(author.id, 9);
        assert_eq!(author.first_name, "A");
    }
}
