//! Shared utilities and common types for the hotel settings backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (API key hashing)
//! - Common validation logic for setting keys and categories

pub mod crypto;
pub mod validation;
