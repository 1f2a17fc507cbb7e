//! Core library for the wellness journal: models, the insight contract and
//! history aggregation. Nothing in here performs I/O.

pub mod insight;
pub mod models;
pub mod stats;
