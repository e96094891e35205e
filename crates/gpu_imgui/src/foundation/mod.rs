//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the backends:
//! - Math types shared by input translation and rendering
//! - Frame time management
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
