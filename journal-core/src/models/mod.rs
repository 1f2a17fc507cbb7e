//! Domain models for the wellness journal.
//!
//! # Core Concepts
//!
//! - [`CheckIn`]: one five-field self-report. Ephemeral, only lives while an
//!   insight is generated.
//! - [`Insight`]: the interpretation of a check-in with suggested
//!   [`MicroAction`]s. Immutable once produced.
//! - [`HistoryRecord`]: a check-in and its insight flattened into one
//!   append-only row, partitioned by [`UserIdentity`].
//! - [`Vibe`]: the closed set of mood categories used for aggregation.

mod checkin;
mod history;
mod insight;
mod vibe;

pub use checkin::*;
pub use history::*;
pub use insight::*;
pub use vibe::*;
