//! In-memory repositories.
//!
//! State lives for the lifetime of the process. Each store sits behind a
//! single std lock that is never held across an `.await`.

mod books;
mod users;

pub use books::InMemoryBookRepository;
pub use users::InMemoryUserRepository;
