//! Ship archetypes and fleet records.
//!
//! Every playable ship belongs to one of four fixed archetypes. All derived
//! combat stats (health cap, energy cap, weapon profile, scope capability)
//! are pure functions of the archetype, resolved **once** at match start and
//! never re-derived from a display name mid-frame.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ── Archetypes ────────────────────────────────────────────────────────────────

/// Fixed ship class with a constant stat and weapon profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipArchetype {
    /// Fast and agile; lightest hull, smallest energy bank, single laser.
    Interceptor,
    /// Heavy battleship with guided rounds and a precision targeting scope.
    Destroyer,
    /// Heavy firepower platform; conical blast rounds, scope-assisted.
    Battlecruiser,
    /// Ultimate hull; dual wing cannons firing two rounds per trigger pull.
    Dreadnought,
}

/// One weapon mount: local-space offset from the ship's origin.
pub type MountOffset = Vec3;

/// Static weapon profile of an archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponProfile {
    /// Hull damage dealt per round.
    pub damage: f32,
    /// Round speed (u/s, fired along −Z).
    pub speed: f32,
    /// Mount points; one projectile is spawned per mount per trigger pull.
    pub mounts: &'static [MountOffset],
}

/// Full derived stat block of an archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeStats {
    pub engine_power: f32,
    pub maneuverability: f32,
    pub boost_capacity: f32,
    pub shield_strength: f32,
    pub max_health: f32,
    pub max_energy: f32,
    pub weapon: WeaponProfile,
    /// Whether this hull carries the cosmetic targeting scope.
    pub has_scope: bool,
    /// Score awarded per enemy kill made with this hull's rounds.
    pub enemy_kill_score: u32,
    /// Hull colour (sRGB), used for the ship mesh and its rounds.
    pub color: (f32, f32, f32),
}

const SINGLE_MOUNT: &[MountOffset] = &[Vec3::ZERO];
const WING_MOUNTS: &[MountOffset] = &[Vec3::new(-2.0, 0.0, 0.2), Vec3::new(2.0, 0.0, 0.2)];

const INTERCEPTOR: ArchetypeStats = ArchetypeStats {
    engine_power: 75.0,
    maneuverability: 85.0,
    boost_capacity: 60.0,
    shield_strength: 100.0,
    max_health: 100.0,
    max_energy: 50.0,
    weapon: WeaponProfile { damage: 1.0, speed: 36.0, mounts: SINGLE_MOUNT },
    has_scope: false,
    enemy_kill_score: 100,
    color: (0.0, 1.0, 1.0),
};

const DESTROYER: ArchetypeStats = ArchetypeStats {
    engine_power: 65.0,
    maneuverability: 70.0,
    boost_capacity: 85.0,
    shield_strength: 150.0,
    max_health: 150.0,
    max_energy: 70.0,
    weapon: WeaponProfile { damage: 2.0, speed: 36.0, mounts: SINGLE_MOUNT },
    has_scope: true,
    enemy_kill_score: 150,
    color: (1.0, 0.42, 0.42),
};

const BATTLECRUISER: ArchetypeStats = ArchetypeStats {
    engine_power: 80.0,
    maneuverability: 95.0,
    boost_capacity: 90.0,
    shield_strength: 200.0,
    max_health: 200.0,
    max_energy: 90.0,
    weapon: WeaponProfile { damage: 5.0, speed: 36.0, mounts: SINGLE_MOUNT },
    has_scope: true,
    enemy_kill_score: 200,
    color: (1.0, 0.84, 0.0),
};

const DREADNOUGHT: ArchetypeStats = ArchetypeStats {
    engine_power: 100.0,
    maneuverability: 100.0,
    boost_capacity: 100.0,
    shield_strength: 300.0,
    max_health: 300.0,
    max_energy: 100.0,
    weapon: WeaponProfile { damage: 10.0, speed: 42.0, mounts: WING_MOUNTS },
    has_scope: false,
    enemy_kill_score: 100,
    color: (0.54, 0.17, 0.89),
};

impl ShipArchetype {
    /// Static stat table lookup. Cheap; callers may still cache the reference
    /// at match start so per-frame systems never touch the name path.
    pub fn stats(self) -> &'static ArchetypeStats {
        match self {
            ShipArchetype::Interceptor => &INTERCEPTOR,
            ShipArchetype::Destroyer => &DESTROYER,
            ShipArchetype::Battlecruiser => &BATTLECRUISER,
            ShipArchetype::Dreadnought => &DREADNOUGHT,
        }
    }

    /// Display name as minted on-chain.
    pub fn name(self) -> &'static str {
        match self {
            ShipArchetype::Interceptor => "Interceptor",
            ShipArchetype::Destroyer => "Destroyer",
            ShipArchetype::Battlecruiser => "Battlecruiser",
            ShipArchetype::Dreadnought => "Dreadnought",
        }
    }

    /// Parse a contract-side display name. Unknown names map to `None`;
    /// callers decide their own fallback.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Interceptor" => Some(ShipArchetype::Interceptor),
            "Destroyer" => Some(ShipArchetype::Destroyer),
            "Battlecruiser" => Some(ShipArchetype::Battlecruiser),
            "Dreadnought" => Some(ShipArchetype::Dreadnought),
            _ => None,
        }
    }

    pub const ALL: [ShipArchetype; 4] = [
        ShipArchetype::Interceptor,
        ShipArchetype::Destroyer,
        ShipArchetype::Battlecruiser,
        ShipArchetype::Dreadnought,
    ];
}

// ── Fleet records ─────────────────────────────────────────────────────────────

/// One owned ship as read from the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipRecord {
    /// Token id.
    pub id: u64,
    pub archetype: ShipArchetype,
    pub experience: u32,
    pub wins: u32,
    pub matches: u32,
    /// Staked ships earn yield but are ineligible for play.
    pub staked: bool,
}

/// The player's owned ships, refreshed from the contract boundary.
#[derive(Resource, Debug, Clone, Default)]
pub struct FleetRoster {
    pub ships: Vec<ShipRecord>,
}

impl FleetRoster {
    pub fn ship_by_id(&self, id: u64) -> Option<&ShipRecord> {
        self.ships.iter().find(|s| s.id == id)
    }

    /// First unstaked ship, used as the default selection.
    pub fn first_available(&self) -> Option<&ShipRecord> {
        self.ships.iter().find(|s| !s.staked)
    }
}

/// The ship currently picked on the menu (and flown once a match starts).
#[derive(Resource, Debug, Clone, Default)]
pub struct SelectedShip(pub Option<ShipRecord>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_are_fixed_per_archetype() {
        assert_eq!(ShipArchetype::Interceptor.stats().max_health, 100.0);
        assert_eq!(ShipArchetype::Interceptor.stats().max_energy, 50.0);
        assert_eq!(ShipArchetype::Destroyer.stats().max_health, 150.0);
        assert_eq!(ShipArchetype::Battlecruiser.stats().max_health, 200.0);
        assert_eq!(ShipArchetype::Dreadnought.stats().max_health, 300.0);
        assert_eq!(ShipArchetype::Dreadnought.stats().max_energy, 100.0);
    }

    #[test]
    fn dreadnought_fires_from_both_wings() {
        assert_eq!(ShipArchetype::Dreadnought.stats().weapon.mounts.len(), 2);
        for arch in [
            ShipArchetype::Interceptor,
            ShipArchetype::Destroyer,
            ShipArchetype::Battlecruiser,
        ] {
            assert_eq!(arch.stats().weapon.mounts.len(), 1);
        }
    }

    #[test]
    fn scope_is_a_destroyer_and_battlecruiser_trait() {
        assert!(!ShipArchetype::Interceptor.stats().has_scope);
        assert!(ShipArchetype::Destroyer.stats().has_scope);
        assert!(ShipArchetype::Battlecruiser.stats().has_scope);
        assert!(!ShipArchetype::Dreadnought.stats().has_scope);
    }

    #[test]
    fn name_round_trips() {
        for arch in ShipArchetype::ALL {
            assert_eq!(ShipArchetype::from_name(arch.name()), Some(arch));
        }
        assert_eq!(ShipArchetype::from_name("Gunboat"), None);
    }

    #[test]
    fn kill_score_carries_archetype_bonus() {
        assert_eq!(ShipArchetype::Interceptor.stats().enemy_kill_score, 100);
        assert_eq!(ShipArchetype::Destroyer.stats().enemy_kill_score, 150);
        assert_eq!(ShipArchetype::Battlecruiser.stats().enemy_kill_score, 200);
    }

    #[test]
    fn roster_default_selection_skips_staked_ships() {
        let roster = FleetRoster {
            ships: vec![
                ShipRecord {
                    id: 1,
                    archetype: ShipArchetype::Interceptor,
                    experience: 0,
                    wins: 0,
                    matches: 0,
                    staked: true,
                },
                ShipRecord {
                    id: 2,
                    archetype: ShipArchetype::Destroyer,
                    experience: 0,
                    wins: 0,
                    matches: 0,
                    staked: false,
                },
            ],
        };
        assert_eq!(roster.first_available().map(|s| s.id), Some(2));
    }
}
