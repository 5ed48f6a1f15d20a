//! Per-user notes.

pub mod service;

pub use service::NoteService;
