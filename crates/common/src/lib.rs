//! StudioFlow Common Library
//!
//! Shared domain vocabulary for the StudioFlow acceptance suite: the wire
//! enums and request payload shapes of the production management API, plus
//! the date-range and monetary arithmetic the scenarios assert against.

pub mod error;
pub mod money;
pub mod schedule;
pub mod types;

pub use error::{Error, Result};
pub use schedule::DateRange;
pub use types::*;
