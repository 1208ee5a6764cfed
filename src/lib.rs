// Allow some overly strict pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::missing_errors_doc)]

//! Newsroom Admin Service
//!
//! Administrative backend for a news platform: user accounts and their
//! lifecycle, the live stream registry, and uploaded image assets.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use application::dto::*;
pub use domain::entities::*;
