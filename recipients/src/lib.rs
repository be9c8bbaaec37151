//! Recipient list parsing and deduplication.
//!
//! Airdrop recipients arrive as free-form text, one `address,amount` pair
//! per line, pasted into a textbox or read from a CSV file. This crate turns
//! that text into a [`RecipientSet`]: addresses deduplicated with their
//! amounts summed, first-seen order preserved, malformed lines dropped.

pub mod parse;
pub mod set;

pub use parse::{parse, ParseReport};
pub use set::RecipientSet;
