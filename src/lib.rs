//! Rank soccer players by tiered, min-max normalized performance scores.
//!
//! The binary (`scout-rank`) is a thin wrapper: load a spreadsheet export
//! with [`table::PlayerTable`], pick a [`positions::PositionGroup`], run
//! [`scoring::score_players`] and render the result with [`output`].

pub mod config;
pub mod logging;
pub mod output;
pub mod positions;
pub mod scoring;
pub mod table;
