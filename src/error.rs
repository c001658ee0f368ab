//! Game-facing error types.
//!
//! Externally-sourced failures (wallet, contract, rendering surface) are
//! funnelled through these types instead of panicking, so the frame loop can
//! keep running while the surrounding UI surfaces a transient notice.

use std::fmt;

/// Top-level error enum for the combat client.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The 3D rendering surface could not be acquired; starting a match is
    /// aborted and the player stays on the menu with no partial state.
    RenderSurfaceUnavailable,

    /// A match was started with no ship selected. Rejected synchronously
    /// before any state mutation.
    NoShipSelected,

    /// The selected ship is staked in the contract and ineligible for play.
    ShipStaked {
        /// Token id of the staked ship.
        ship_id: u64,
    },

    /// A stake/unstake was requested for the ship flying the current match.
    ShipInMatch {
        /// Token id of the in-match ship.
        ship_id: u64,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::RenderSurfaceUnavailable => {
                write!(f, "3D rendering surface unavailable; cannot start a match")
            }
            GameError::NoShipSelected => {
                write!(f, "no ship selected; pick a ship before launching")
            }
            GameError::ShipStaked { ship_id } => {
                write!(f, "ship #{ship_id} is staked and cannot fly; unstake it first")
            }
            GameError::ShipInMatch { ship_id } => {
                write!(f, "ship #{ship_id} is flying the current match and cannot be (un)staked")
            }
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_ship() {
        let msg = GameError::ShipStaked { ship_id: 7 }.to_string();
        assert!(msg.contains("#7"));

        let msg = GameError::ShipInMatch { ship_id: 3 }.to_string();
        assert!(msg.contains("#3"));
    }
}
