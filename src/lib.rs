pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod file_store;
pub mod models;
pub mod search;
pub mod state;
pub mod utils;

#[cfg(test)]
mod testutil;
