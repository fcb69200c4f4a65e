//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the frontend:
//! - Math types
//! - Interval timing
//! - Clock/time-of-day formatting
//! - Logging utilities

pub mod math;
pub mod time;
pub mod timeutil;
pub mod logging;
