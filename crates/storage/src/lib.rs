//! Storage and scoring for a house sports scoreboard.
//!
//! Houses, events and results live in a single SQLite file behind
//! [`Database`]. Repositories under [`repository`] perform the writes under
//! the store's constraints, and [`services::standings`] recomputes the house
//! ranking from a fresh snapshot on every call.

mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;


pub use database::{Database, PoolGuard};
