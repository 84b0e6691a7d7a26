//! Common utilities and types shared across the bearer-auth crates.

#![warn(clippy::pedantic)]

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for compact token format primitives (size limit, segments, header)
pub mod jwt;
