//! Catalogue seed loading.
//!
//! A seed is a JSON object keyed by ISBN:
//!
//! ```json
//! { "1": { "author": "Chinua Achebe", "title": "Things Fall Apart", "reviews": {} } }
//! ```
//!
//! `reviews` may be omitted. The default seed is compiled into the binary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::cap_fs;
use crate::domain::{Book, Catalogue, Isbn, Reviews};

const DEFAULT_SEED: &str = include_str!("../../fixtures/catalogue/books.json");

/// Errors raised while loading a catalogue seed.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read catalogue seed at {path}: {source}")]
    Read {
        /// Seed location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The seed is not valid JSON of the expected shape.
    #[error("invalid catalogue seed: {0}")]
    Parse(#[from] serde_json::Error),
    /// A seed entry has an empty ISBN key.
    #[error("catalogue seed contains an empty isbn key")]
    EmptyIsbn,
}

#[derive(Debug, Deserialize)]
struct SeedBook {
    author: String,
    title: String,
    #[serde(default)]
    reviews: BTreeMap<String, String>,
}

/// Parse a seed document into a catalogue.
///
/// # Examples
///
/// ```rust
/// use bookstore::outbound::seed::parse_catalogue;
///
/// let catalogue = parse_catalogue(r#"{"7": {"author": "Unknown", "title": "Njál's Saga"}}"#)?;
/// assert_eq!(catalogue.len(), 1);
/// # Ok::<(), bookstore::outbound::seed::SeedError>(())
/// ```
pub fn parse_catalogue(json: &str) -> Result<Catalogue, SeedError> {
    let entries: BTreeMap<String, SeedBook> = serde_json::from_str(json)?;
    entries
        .into_iter()
        .map(|(key, entry)| {
            let isbn = Isbn::new(&key).map_err(|_| SeedError::EmptyIsbn)?;
            let book = Book {
                isbn: isbn.clone(),
                title: entry.title,
                author: entry.author,
                reviews: Reviews::from(entry.reviews),
            };
            Ok((isbn, book))
        })
        .collect()
}

/// The catalogue compiled into the binary.
pub fn default_catalogue() -> Result<Catalogue, SeedError> {
    parse_catalogue(DEFAULT_SEED)
}

/// Load the seed at `path`, or the built-in seed when no path is given.
pub fn load_catalogue(path: Option<&Path>) -> Result<Catalogue, SeedError> {
    let catalogue = match path {
        Some(path) => {
            let bytes = cap_fs::read_file(path).map_err(|source| SeedError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let text = String::from_utf8(bytes).map_err(|err| SeedError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
            })?;
            parse_catalogue(&text)?
        }
        None => default_catalogue()?,
    };
    info!(
        books = catalogue.len(),
        source = %path.map_or_else(|| "built-in".to_owned(), |p| p.display().to_string()),
        "catalogue seeded"
    );
    Ok(catalogue)
}
