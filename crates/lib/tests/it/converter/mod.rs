//! TreeConverter integration tests
//!
//! Organized by concern: plain round trips, nested objects, and the failure
//! and asymmetry behaviour of the load walk.

mod nested;
