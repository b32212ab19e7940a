//! orbdeck - live game status orbs and icons for a macro deck.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod models;
pub mod plugin;
pub mod registry;
pub mod render;
pub mod state;
pub mod streamdeck;
pub mod traits;
