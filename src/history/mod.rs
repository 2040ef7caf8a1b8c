//! Tetra League history from the p1nkl0bst3r tlhist API.
//!
//! The source publishes periodic snapshots of each player's league
//! statistics as CSV, one row per snapshot:
//!
//! ```text
//! user_id,gamesplayed,gameswon,rating,glicko,rank,apm,pps,vs,created_at
//! 5e32fc85ab319c2ab1beb07c,10,6,15000.1,1800,s,60,1.8,130,2023-01-01 00:00:00
//! ```
//!
//! [`HistoryReader`] parses such text from any reader; [`HistoryClient`]
//! fetches it for one user id.

mod client;
mod reader;
mod record;

pub use client::HistoryClient;
pub use reader::HistoryReader;
pub use record::{NUM_FIELDS, Record};

/// Base URL of the history source. The user id is appended.
pub const HISTORY_BASE_URL: &str = "https://api.p1nkl0bst3r.xyz/tlhist/";
