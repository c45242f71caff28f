//! # Showbill Common Library
//!
//! Shared code for the Showbill listing service:
//! - Venue, artist and show models
//! - Show classification (past/upcoming) and venue listing aggregation
//! - Partial-name search
//! - Form validation
//! - Configuration loading
//! - SQLite persistence

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schedule;
pub mod search;
pub mod time;
pub mod validation;

pub use error::{Error, FailureCategory, Result};
pub use schedule::{CountPolicy, CounterpartRole};
