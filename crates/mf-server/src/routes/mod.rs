//! Route handlers for the HTTP API.

pub mod genres;
pub mod health;
pub mod movies;
