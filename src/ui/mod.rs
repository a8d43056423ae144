//! UI module for nlpassist-cli.
//!
//! This module contains all UI rendering logic including:
//! - Main UI layout and rendering
//! - Gradient utilities
//! - Text sanitizing and wrapping

mod gradient;
mod render;
pub mod text;

pub use render::{message_lines, ui};
