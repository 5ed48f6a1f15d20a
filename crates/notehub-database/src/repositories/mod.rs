//! PostgreSQL repositories for NoteHub entities.

pub mod note;
pub mod user;

pub use note::NoteRepository;
pub use user::UserRepository;
