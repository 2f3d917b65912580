//! Shared constants for end-to-end tests
//!
//! When the seed catalog changes, update only this file.

// ============================================================================
// Seed Catalog
// ============================================================================

pub const DIRTY_DIANA_ID: i64 = 1;
pub const DIRTY_DIANA_TITLE: &str = "Dirty Diana";
pub const DIRTY_DIANA_PRICE: f64 = 1.25;

pub const COMFORTABLY_NUMB_ID: i64 = 2;
pub const COMFORTABLY_NUMB_TITLE: &str = "Comfortably Numb";

pub const SPACE_ODDITY_ID: i64 = 3;
pub const SPACE_ODDITY_TITLE: &str = "Space Oddity";

/// Not part of the seed catalog
pub const UNKNOWN_TRACK_ID: i64 = 4;

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
