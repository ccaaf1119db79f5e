//! # Placeboard Shared Library
//!
//! Core functionality shared by the Placeboard API server:
//!
//! - `db`: PostgreSQL connection pool and migration runner
//! - `models`: Place and User rows with their read/write operations
//! - `repo`: the transactional place repository (the only code path allowed
//!   to mutate the Place↔User reference)
//! - `auth`: password hashing
//! - `geocode`: address-to-coordinates collaborator

pub mod auth;
pub mod db;
pub mod geocode;
pub mod models;
pub mod repo;
