//! Plotline Core - spatial land-registry navigation
//!
//! This crate provides the client-side logic for browsing and editing a
//! six-level spatial hierarchy (zone, block, plot, building, floor, room)
//! served by a registry REST API.
//!
//! # Modules
//!
//! - [`models`] - Spatial nodes, levels, lookup categories and mutation payloads
//! - [`navigator`] - Pure tree operations: metrics, lookup, flattening, navigation state
//! - [`services`] - Typed REST wrappers for the locations and lookups endpoints
//! - [`registry`] - The controller that ties services and navigation together
//! - [`config`] - Console settings from `plotline.toml` or the environment

pub mod config;
pub mod models;
pub mod navigator;
pub mod registry;
pub mod services;

// Re-export commonly used types
pub use config::{ConfigError, ConsoleConfig};
pub use models::*;
pub use navigator::*;
pub use registry::{ConfirmPrompt, Notification, NotificationLevel, RegistryController};
pub use services::*;
