//! Core type definitions used across the NoteHub workspace.

pub mod id;

pub use id::{NoteId, UserId};
