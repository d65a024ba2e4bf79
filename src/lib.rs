//! Client for a presentation backend: uploads a deck and renders the slide images
//! the backend reports back.

pub mod config;
pub mod control;
pub mod page;
pub mod transport;
pub mod upload;
