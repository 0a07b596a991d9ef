//! Classification logic.
//!
//! This module contains the business logic run for every request:
//! - [`classify`] - first-match scan of the range dataset
//! - [`pop`] - PoP code extraction and city lookup
//! - [`lookup`] - classification enriched with PoP details

mod classify;
mod lookup;
mod pop;

// Re-export public functions
pub use classify::{classify, first_match, match_client, Classification};
pub use lookup::{lookup, Lookup};
pub use pop::{pop_city, pop_code};
