//! Persistence layer for the hotel settings backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations, including the PostgreSQL settings backend

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
