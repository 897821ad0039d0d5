//! Best-K opponent selection.
//!
//! [`BestOpponents`] keeps the K opponents that leave an evaluated team
//! weakest (lowest remaining-HP fraction, ties to the higher stats sum).
//! The query functions feed it from a team's one-substitution neighbourhood.

mod queries;
mod selector;

pub use queries::{opponent_score, rank_neighbor_opponents, rank_sampled_opponents};
pub use selector::{rank_order, BestOpponents, RankedOpponent};
