use std::fmt;

/// The kinds of record managed by the catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entity {
    Author,
    Book,
}

impl Entity {
    /// Lower-case name, used as the `entity` field in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Book => "book",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Author => write!(f, "Author"),
            Self::Book => write!(f, "Book"),
        }
    }
}
