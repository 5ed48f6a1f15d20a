//! Request and response bodies for the HTTP surface.

pub mod request;
pub mod response;
