//! Gemini-backed image editing
//!
//! Takes one or more images plus a text prompt, sends them to Gemini's
//! `generateContent` endpoint, and saves whatever comes back: the generated
//! image as PNG, or the model's text reply when no image is produced.

pub mod adapter;
pub mod ai;
pub mod config;
pub mod error;
pub mod image;
pub mod output;

pub use error::{Error, Result};
