//! Core business logic for the Zakath backend.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, collaborator traits, and calculations
//! live here.
//!
//! # Modules
//!
//! - `calendar` - Gregorian/Hijri conversion and lunar-year (hawl) arithmetic
//! - `currency` - Multi-currency conversion with a cached exchange-rate store
//! - `zakath` - The zakath calculation engine and its snapshot types

pub mod calendar;
pub mod currency;
pub mod zakath;
