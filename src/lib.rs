//! gemini-image-lab: generate and edit images with Gemini.
//!
//! Five editor modes (variations, merge, edit, style transfer, bulk) funnel
//! into one remote contract: ordered images plus one prompt in, exactly one
//! generated image out.

pub mod ai;
pub mod app;
pub mod bulk;
pub mod config;
pub mod error;
pub mod files;
pub mod models;

pub use error::{Error, Result};
