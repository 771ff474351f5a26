//! Screener Core: price data model and the technical-indicator library.
//!
//! This crate holds everything the screening pipeline computes from:
//! - Domain types (price bars, validated series, instrument metadata)
//! - True range, directional movement and Wilder smoothing
//! - DMI / ADX, EMA, PPO, PPO slope and hook detection
//! - Horizon returns and volume statistics
//! - Price sources (CSV directory, deterministic simulator, in-memory)
//! - The injectable instrument universe

pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;

pub use error::IndicatorError;
