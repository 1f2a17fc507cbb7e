//! Wellness check-in journal.
//!
//! The server side ([`api`], [`db`], [`service`], [`generator`]) hosts insight
//! generation and per-user history. The client side ([`client`],
//! [`identity`], [`render`]) backs the `vibej` command line.

pub mod api;
pub mod client;
pub mod db;
pub mod generator;
pub mod identity;
pub mod render;
pub mod service;

pub use journal_core::{insight, models, stats};
