//! Persistence module - settings storage

mod database;

pub use database::Database;
