//! Capability-scoped file reads.
//!
//! The backend opens files through `cap_std::fs::Dir` rather than `std::fs`,
//! granting ambient authority only to the parent directory of each path.

use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};

/// Read the whole file at `path`.
///
/// # Examples
///
/// ```rust
/// use bookstore::cap_fs::read_file;
///
/// let path = std::env::temp_dir().join("cap-fs-read-example.bin");
/// std::fs::write(&path, b"hello")?;
/// assert_eq!(read_file(&path)?, b"hello");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path must name a file")
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    directory.read(Path::new(file_name))
}
