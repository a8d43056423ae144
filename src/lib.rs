//! NLPAssist CLI - a terminal chat client for a question-answering backend.
//!
//! This library exposes the core modules for testing and reuse.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod input;
pub mod logging;
pub mod message;
pub mod ui;
