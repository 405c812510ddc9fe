//! Shared types and configuration for the Zakath backend.
//!
//! This crate provides common types used across all other crates:
//! - Validated currency codes; amounts use decimal precision throughout
//! - Typed IDs for type-safe entity references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
