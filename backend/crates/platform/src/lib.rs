//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cookie building and parsing
//! - Backend HTTP client (reqwest)
//! - Environment configuration helpers
//! - Single-flight guard for user-triggered operations

pub mod client;
pub mod config;
pub mod cookie;
pub mod flight;
