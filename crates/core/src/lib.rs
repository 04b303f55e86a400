//! Core business logic for Spesa.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies.
//!
//! # Modules
//!
//! - `budget` - Budget ceiling arithmetic for the pay-expense check
//! - `fiscal` - Fiscal-year derivation from timestamps

pub mod budget;
pub mod fiscal;
