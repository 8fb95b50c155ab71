//! Catalogue records and their reviews.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Username;

/// Validation errors raised by catalogue value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// ISBN was missing or empty.
    EmptyIsbn,
    /// Review text was missing or empty.
    EmptyReview,
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIsbn => write!(f, "isbn must not be empty"),
            Self::EmptyReview => write!(f, "review text must not be empty"),
        }
    }
}

impl std::error::Error for BookValidationError {}

/// Catalogue key.
///
/// Any non-empty string is accepted and kept exactly, so `" 1"` and `"1"` are
/// different keys. The catalogue seed uses short numeric keys as well as
/// ten-digit ISBNs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    /// Validate and construct an ISBN key.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, BookValidationError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Err(BookValidationError::EmptyIsbn);
        }
        Ok(Self(raw.to_owned()))
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Isbn> for String {
    fn from(value: Isbn) -> Self {
        value.0
    }
}

impl TryFrom<String> for Isbn {
    type Error = BookValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-text review body. Never empty; stored as provided, whitespace included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewText(String);

impl ReviewText {
    /// Validate and construct review text.
    pub fn new(raw: impl Into<String>) -> Result<Self, BookValidationError> {
        let text = raw.into();
        if text.is_empty() {
            return Err(BookValidationError::EmptyReview);
        }
        Ok(Self(text))
    }
}

impl AsRef<str> for ReviewText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Reviews on one book, keyed by author username.
///
/// Holds at most one entry per user: [`Reviews::set`] overwrites.
///
/// # Examples
/// ```
/// use bookstore::domain::{ReviewText, Reviews, Username};
///
/// let alice = Username::new("alice").unwrap();
/// let mut reviews = Reviews::default();
/// reviews.set(&alice, ReviewText::new("A").unwrap());
/// reviews.set(&alice, ReviewText::new("B").unwrap());
/// assert_eq!(reviews.len(), 1);
/// assert_eq!(reviews.by(&alice), Some("B"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reviews(BTreeMap<String, String>);

impl Reviews {
    /// Set the review written by `username`, replacing any previous one.
    pub fn set(&mut self, username: &Username, text: ReviewText) {
        self.0.insert(username.as_ref().to_owned(), text.0);
    }

    /// Remove the review written by `username`, returning its text.
    pub fn remove(&mut self, username: &Username) -> Option<String> {
        self.0.remove(username.as_ref())
    }

    /// Text of the review written by `username`.
    pub fn by(&self, username: &Username) -> Option<&str> {
        self.0.get(username.as_ref()).map(String::as_str)
    }

    /// Number of reviews.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the book has no reviews.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the username → text mapping.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl From<BTreeMap<String, String>> for Reviews {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self(value)
    }
}

/// A book in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Catalogue key.
    pub isbn: Isbn,
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Reviews keyed by username.
    pub reviews: Reviews,
}

/// Snapshot of books keyed by ISBN.
pub type Catalogue = BTreeMap<Isbn, Book>;

/// Exact, case-sensitive field match used by author and title lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookSearch {
    /// Match the author field.
    Author(String),
    /// Match the title field.
    Title(String),
}

impl BookSearch {
    /// Whether `book` satisfies the search.
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Self::Author(author) => book.author == *author,
            Self::Title(title) => book.title == *title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn book() -> Book {
        Book {
            isbn: Isbn::new("1").expect("isbn"),
            title: "Things Fall Apart".to_owned(),
            author: "Chinua Achebe".to_owned(),
            reviews: Reviews::default(),
        }
    }

    #[rstest]
    #[case(BookSearch::Author("Chinua Achebe".to_owned()), true)]
    #[case(BookSearch::Author("chinua achebe".to_owned()), false)]
    #[case(BookSearch::Author("Chinua".to_owned()), false)]
    #[case(BookSearch::Title("Things Fall Apart".to_owned()), true)]
    #[case(BookSearch::Title("Things Fall Apart ".to_owned()), false)]
    fn search_is_exact_and_case_sensitive(
        book: Book,
        #[case] search: BookSearch,
        #[case] expected: bool,
    ) {
        assert_eq!(search.matches(&book), expected);
    }

    #[rstest]
    fn empty_isbn_is_rejected() {
        assert_eq!(Isbn::new(""), Err(BookValidationError::EmptyIsbn));
    }

    #[rstest]
    #[case(" 1")]
    #[case("1 ")]
    #[case("  ")]
    fn isbn_is_kept_exactly(#[case] raw: &str) {
        let isbn = Isbn::new(raw).expect("non-empty key");
        assert_eq!(isbn.as_ref(), raw);
        assert_ne!(isbn, Isbn::new("1").expect("isbn"));
    }

    #[rstest]
    fn empty_review_is_rejected() {
        assert_eq!(ReviewText::new(""), Err(BookValidationError::EmptyReview));
    }

    #[rstest]
    fn whitespace_review_is_kept() {
        let text = ReviewText::new(" \n").expect("non-empty review");
        assert_eq!(text.as_ref(), " \n");
    }

    #[rstest]
    fn removing_review_leaves_others() {
        let alice = Username::new("alice").expect("username");
        let bob = Username::new("bob").expect("username");
        let mut reviews = Reviews::default();
        reviews.set(&alice, ReviewText::new("great").expect("text"));
        reviews.set(&bob, ReviewText::new("meh").expect("text"));

        assert_eq!(reviews.remove(&alice).as_deref(), Some("great"));
        assert_eq!(reviews.remove(&alice), None);
        assert_eq!(reviews.by(&bob), Some("meh"));
    }

    #[rstest]
    fn reviews_serialise_as_plain_map() {
        let alice = Username::new("alice").expect("username");
        let mut reviews = Reviews::default();
        reviews.set(&alice, ReviewText::new("great book").expect("text"));
        let value = serde_json::to_value(&reviews).expect("serialise reviews");
        assert_eq!(value, serde_json::json!({ "alice": "great book" }));
    }
}
