//! Teams and their generation.
//!
//! - [`Team`]: an ordered line-up of distinct catalog units with derived
//!   views (stats sum, HP list, [`Signature`]).
//! - [`generate_team`], [`generate_team_retrying`], [`random_replacement`]:
//!   legal random construction and mutation.
//! - [`generate_opponent_pool`]: deduplicated benchmark pools.
//! - [`neighbor_opponents`]: single-substitution neighbourhood of a team.

mod generator;
mod types;

pub use generator::{
    generate_opponent_pool, generate_team, generate_team_retrying, neighbor_opponents,
    random_replacement,
    OpponentPoolConfig,
};
pub use types::{types_unique, Signature, Team, MAX_TEAM_SIZE, TEAM_SIZE};
