//! Core domain + application logic for the Bengali relay bot.
//!
//! This crate is intentionally framework-agnostic. Telegram, the translation
//! backend and the Graph API live behind ports (traits) implemented in adapter
//! crates.

pub mod bot;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod ports;
pub mod profile;
pub mod utils;

pub use errors::{Error, Result};
