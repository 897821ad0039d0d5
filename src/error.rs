//! Error taxonomy shared by every layer of the crate.

/// Errors raised by catalog construction, team generation and the solvers.
///
/// Configuration problems are always reported before any battle is fought;
/// nothing in this crate fails halfway through a search run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A parameter, or a combination of parameters, is not usable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The catalog cannot produce a legal team of the requested size.
    #[error(
        "legality exhausted: built {built} of {requested} members from {candidates} candidates"
    )]
    LegalityExhausted {
        /// Number of members requested.
        requested: usize,
        /// Number of members accepted before candidates ran out.
        built: usize,
        /// Size of the candidate pool that was searched.
        candidates: usize,
    },

    /// A catalog row violates the unit invariants.
    #[error("invalid unit {id}: {reason}")]
    InvalidUnit {
        /// Identity of the offending unit.
        id: u32,
        /// What is wrong with it.
        reason: String,
    },

    /// A team could not be built from the given members.
    #[error("invalid team: {0}")]
    InvalidTeam(String),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
