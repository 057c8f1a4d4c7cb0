//! Field rules shared by the author and book services.
//!
//! These are pure functions over a candidate record; none of them touch
//! storage.

use shelf_types::{Author, Book};

use crate::error::{ServiceError, ServiceResult};

/// Accepted publishers, compared case-insensitively.
pub const PUBLICATIONS: [&str; 3] = ["scholastic", "arihant", "penguin"];

/// Earliest accepted year of publication.
pub const MIN_PUBLISHED_YEAR: i64 = 1880;

/// Latest accepted year of publication.
pub const MAX_PUBLISHED_YEAR: i64 = 2022;

/// Reject non-positive identifiers.
pub fn check_id(id: i64) -> ServiceResult<()> {
    if id <= 0 {
        return Err(ServiceError::InvalidId(id));
    }
    Ok(())
}

/// Wire names of the required author fields that are empty, in declaration
/// order.
pub fn missing_author_fields(author: &Author) -> Vec<&'static str> {
    [
        ("firstName", &author.first_name),
        ("lastName", &author.last_name),
        ("dob", &author.dob),
        ("penName", &author.pen_name),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect()
}

/// Wire names of the required book fields that are empty, in declaration
/// order.
pub fn missing_book_fields(book: &Book) -> Vec<&'static str> {
    [
        ("title", &book.title),
        ("publication", &book.publication),
        ("publishedDate", &book.published_date),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect()
}

/// Check a `day/month/year` date positionally.
///
/// Day must be in `0..=31`, month in `0..=12`, and year within
/// [`MIN_PUBLISHED_YEAR`]..=[`MAX_PUBLISHED_YEAR`]. Month lengths and leap
/// years are not considered. Anything that is not three integer components
/// separated by `/` is invalid.
pub fn is_valid_published_date(date: &str) -> bool {
    let parts: Vec<&str> = date.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return false;
    };
    let (Ok(day), Ok(month), Ok(year)) = (
        day.trim().parse::<i64>(),
        month.trim().parse::<i64>(),
        year.trim().parse::<i64>(),
    ) else {
        return false;
    };

    (0..=31).contains(&day)
        && (0..=12).contains(&month)
        && (MIN_PUBLISHED_YEAR..=MAX_PUBLISHED_YEAR).contains(&year)
}

/// Case-insensitive membership in [`PUBLICATIONS`].
pub fn is_valid_publication(publication: &str) -> bool {
    let publication = publication.to_lowercase();
    PUBLICATIONS.contains(&publication.as_str())
}

/// Required-field check for an author candidate.
pub fn validate_author(author: &Author) -> ServiceResult<()> {
    let missing = missing_author_fields(author);
    if !missing.is_empty() {
        return Err(ServiceError::MissingFields(missing));
    }
    Ok(())
}

/// Field checks for a book candidate, first failure wins: required fields,
/// then published date, then publication.
pub fn validate_book(book: &Book) -> ServiceResult<()> {
    let missing = missing_book_fields(book);
    if !missing.is_empty() {
        return Err(ServiceError::MissingFields(missing));
    }
    if !is_valid_published_date(&book.published_date) {
        return Err(ServiceError::InvalidDate(book.published_date.clone()));
    }
    if !is_valid_publication(&book.publication) {
        return Err(ServiceError::InvalidPublication(book.publication.clone()));
    }
    Ok(())
}
