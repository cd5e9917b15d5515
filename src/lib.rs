//! Stoic Journal - a daily reflection paired with a Stoic quote
//!
//! Entries are kept in a local SQLite file, one per calendar day. Quotes
//! come from public endpoints with a built-in fallback list, so writing
//! never depends on the network.

pub mod config;
pub mod journal;
pub mod quotes;
pub mod storage;
