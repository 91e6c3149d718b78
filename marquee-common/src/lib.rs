//! # Marquee Common Library
//!
//! Shared code for the marquee content tools including:
//! - Content model entities (hero, albums, videos, tours, about)
//! - Record normalization (partial server JSON -> strict entities)
//! - API request/response wire types
//! - Error types
//! - Configuration loading

pub mod api;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod normalize;

pub use error::{Error, Result};
pub use model::ContentModel;
