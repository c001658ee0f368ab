//! Contract boundary: fleet ownership reads and fire-and-forget writes.
//!
//! The combat core never talks to a wallet or RPC endpoint directly. It sees
//! the chain through the [`FleetContract`] trait: read calls fetch ship
//! records, write calls return a [`TxHandle`] and settle (or revert) on their
//! own time. The frame loop **never awaits** a transaction:
//!
//! 1. The match lifecycle emits a [`MatchResultReport`] message at game-over
//!    carrying an owned snapshot of the final counters.
//! 2. [`submit_result_system`] hands that snapshot to the async task pool and
//!    returns immediately.
//! 3. A rejection is logged and surfaced as a transient [`TxNotice`]; it is
//!    never retried and never unwinds into the simulation.
//!
//! [`DemoLedger`] is the in-process implementation used when no wallet is
//! connected; it owns the demo fleet the menu shows on a fresh start.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::tasks::AsyncComputeTaskPool;
use serde::Serialize;

use crate::error::GameError;
use crate::ship::{FleetRoster, SelectedShip, ShipArchetype, ShipRecord};

// ── Wire types ────────────────────────────────────────────────────────────────

/// Opaque handle to a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHandle(pub String);

/// Failure at the contract boundary. Always recovered locally.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainError {
    /// No wallet/provider is connected.
    NotConnected,
    /// The contract rejected or reverted the call.
    Rejected(String),
}

impl std::fmt::Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainError::NotConnected => write!(f, "no wallet connected"),
            ChainError::Rejected(reason) => write!(f, "transaction rejected: {reason}"),
        }
    }
}

impl std::error::Error for ChainError {}

/// Read-only snapshot of a finished match, as submitted on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub ship_id: u64,
    pub score: u32,
    pub enemies_destroyed: u32,
    pub asteroids_destroyed: u32,
    pub resources_collected: u32,
    /// Zero when the match was not part of a tournament.
    pub tournament_id: u64,
}

// ── Contract trait ────────────────────────────────────────────────────────────

/// The fleet contract as the combat client sees it.
///
/// Write calls are fire-and-forget from the caller's perspective: the returned
/// [`TxHandle`] identifies the submission, confirmation happens elsewhere.
pub trait FleetContract: Send + Sync {
    fn owned_ships(&self) -> Result<Vec<ShipRecord>, ChainError>;
    fn selected_ship(&self) -> Result<Option<ShipRecord>, ChainError>;
    fn submit_match_result(&self, result: &MatchResult) -> Result<TxHandle, ChainError>;
    fn stake(&self, ship_id: u64) -> Result<TxHandle, ChainError>;
    fn unstake(&self, ship_id: u64) -> Result<TxHandle, ChainError>;
    fn mint_ship(&self, archetype: ShipArchetype) -> Result<TxHandle, ChainError>;
    fn breed_ships(&self, parent_a: u64, parent_b: u64) -> Result<TxHandle, ChainError>;
    fn join_tournament(&self, tournament_id: u64) -> Result<TxHandle, ChainError>;
}

// ── Demo ledger ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct LedgerState {
    ships: Vec<ShipRecord>,
    last_result: Option<MatchResult>,
}

/// In-process [`FleetContract`] backing the game when no wallet is connected.
///
/// Seeds one ship of each archetype so the hangar is never empty. State lives
/// behind a `Mutex`; every call takes the lock briefly and never blocks on IO.
pub struct DemoLedger {
    state: Mutex<LedgerState>,
    tx_counter: AtomicU64,
}

impl Default for DemoLedger {
    fn default() -> Self {
        let ships = ShipArchetype::ALL
            .iter()
            .enumerate()
            .map(|(i, &archetype)| ShipRecord {
                id: i as u64 + 1,
                archetype,
                experience: 0,
                wins: 0,
                matches: 0,
                staked: false,
            })
            .collect();
        Self {
            state: Mutex::new(LedgerState { ships, last_result: None }),
            tx_counter: AtomicU64::new(0),
        }
    }
}

impl DemoLedger {
    fn next_tx(&self) -> TxHandle {
        let n = self.tx_counter.fetch_add(1, Ordering::Relaxed);
        TxHandle(format!("demo-tx-{n:04}"))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LedgerState> {
        // A poisoned ledger lock means a panic already happened elsewhere;
        // the demo ledger state is still valid, so keep serving it.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Last submitted result, for tests and the demo leaderboard row.
    pub fn last_result(&self) -> Option<MatchResult> {
        self.lock().last_result
    }
}

impl FleetContract for DemoLedger {
    fn owned_ships(&self) -> Result<Vec<ShipRecord>, ChainError> {
        Ok(self.lock().ships.clone())
    }

    fn selected_ship(&self) -> Result<Option<ShipRecord>, ChainError> {
        Ok(self.lock().ships.iter().find(|s| !s.staked).cloned())
    }

    fn submit_match_result(&self, result: &MatchResult) -> Result<TxHandle, ChainError> {
        let mut state = self.lock();
        let ship = state
            .ships
            .iter_mut()
            .find(|s| s.id == result.ship_id)
            .ok_or_else(|| ChainError::Rejected(format!("unknown ship #{}", result.ship_id)))?;
        ship.matches += 1;
        ship.experience += result.score / 10;
        state.last_result = Some(*result);
        Ok(self.next_tx())
    }

    fn stake(&self, ship_id: u64) -> Result<TxHandle, ChainError> {
        let mut state = self.lock();
        let ship = state
            .ships
            .iter_mut()
            .find(|s| s.id == ship_id)
            .ok_or_else(|| ChainError::Rejected(format!("unknown ship #{ship_id}")))?;
        if ship.staked {
            return Err(ChainError::Rejected(format!("ship #{ship_id} already staked")));
        }
        ship.staked = true;
        Ok(self.next_tx())
    }

    fn unstake(&self, ship_id: u64) -> Result<TxHandle, ChainError> {
        let mut state = self.lock();
        let ship = state
            .ships
            .iter_mut()
            .find(|s| s.id == ship_id)
            .ok_or_else(|| ChainError::Rejected(format!("unknown ship #{ship_id}")))?;
        if !ship.staked {
            return Err(ChainError::Rejected(format!("ship #{ship_id} is not staked")));
        }
        ship.staked = false;
        Ok(self.next_tx())
    }

    fn mint_ship(&self, archetype: ShipArchetype) -> Result<TxHandle, ChainError> {
        let mut state = self.lock();
        let id = state.ships.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        state.ships.push(ShipRecord {
            id,
            archetype,
            experience: 0,
            wins: 0,
            matches: 0,
            staked: false,
        });
        Ok(self.next_tx())
    }

    fn breed_ships(&self, parent_a: u64, parent_b: u64) -> Result<TxHandle, ChainError> {
        let archetype = {
            let state = self.lock();
            let a = state
                .ships
                .iter()
                .find(|s| s.id == parent_a)
                .ok_or_else(|| ChainError::Rejected(format!("unknown ship #{parent_a}")))?;
            let b = state
                .ships
                .iter()
                .find(|s| s.id == parent_b)
                .ok_or_else(|| ChainError::Rejected(format!("unknown ship #{parent_b}")))?;
            // Offspring takes the sturdier parent's hull.
            if a.archetype.stats().max_health >= b.archetype.stats().max_health {
                a.archetype
            } else {
                b.archetype
            }
        };
        self.mint_ship(archetype)
    }

    fn join_tournament(&self, _tournament_id: u64) -> Result<TxHandle, ChainError> {
        Ok(self.next_tx())
    }
}

// ── Bevy integration ──────────────────────────────────────────────────────────

/// Shared handle to the active [`FleetContract`] implementation.
#[derive(Resource, Clone)]
pub struct ChainClient(pub Arc<dyn FleetContract>);

/// Token id of the ship flying the current match, if any. While set, that
/// ship cannot be staked or unstaked.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct ActiveMatchShip(pub Option<u64>);

/// Transient user-facing notice from the transaction boundary.
/// Cleared automatically after `remaining_secs` runs out.
#[derive(Resource, Debug, Default, Clone)]
pub struct TxNotice {
    pub text: String,
    pub remaining_secs: f32,
}

impl TxNotice {
    const DISPLAY_SECS: f32 = 5.0;

    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.remaining_secs = Self::DISPLAY_SECS;
    }
}

/// Final-counter snapshot emitted by the match lifecycle at game-over.
#[derive(Message, Debug, Clone, Copy)]
pub struct MatchResultReport(pub MatchResult);

/// Stake/unstake request from the hangar UI.
#[derive(Message, Debug, Clone, Copy)]
pub struct StakeRequest {
    pub ship_id: u64,
    /// `true` to unstake, `false` to stake.
    pub release: bool,
}

pub struct ChainPlugin;

impl Plugin for ChainPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ChainClient(Arc::new(DemoLedger::default())))
            .insert_resource(ActiveMatchShip::default())
            .insert_resource(TxNotice::default())
            .add_message::<MatchResultReport>()
            .add_message::<StakeRequest>()
            .add_systems(Startup, load_fleet_roster)
            .add_systems(
                Update,
                (submit_result_system, stake_request_system, tx_notice_decay_system),
            );
    }
}

/// Startup system: pull the owned fleet from the contract and default the
/// selection to the first unstaked ship.
pub fn load_fleet_roster(
    client: Res<ChainClient>,
    mut roster: ResMut<FleetRoster>,
    mut selected: ResMut<SelectedShip>,
) {
    match client.0.owned_ships() {
        Ok(ships) => {
            roster.ships = ships;
            if selected.0.is_none() {
                selected.0 = roster.first_available().cloned();
            }
            eprintln!("[SETUP] Fleet roster loaded: {} ships", roster.ships.len());
        }
        Err(e) => {
            warn!("failed to load fleet roster: {e}");
        }
    }
}

/// Hand each game-over snapshot to the async pool, fire-and-forget.
///
/// The task owns its copy of the result and the client `Arc`; nothing in the
/// frame loop waits on it. A rejection is logged, not retried.
pub fn submit_result_system(
    mut reports: MessageReader<MatchResultReport>,
    client: Res<ChainClient>,
) {
    for report in reports.read() {
        let client = client.0.clone();
        let result = report.0;
        AsyncComputeTaskPool::get()
            .spawn(async move {
                match client.submit_match_result(&result) {
                    Ok(tx) => info!(
                        "match result for ship #{} submitted ({})",
                        result.ship_id, tx.0
                    ),
                    Err(e) => warn!("failed to submit match result: {e}"),
                }
            })
            .detach();
    }
}

/// Handle hangar stake/unstake requests.
///
/// The ship flying the current match is rejected before the contract is
/// touched; everything else goes through and the roster mirrors the outcome.
pub fn stake_request_system(
    mut requests: MessageReader<StakeRequest>,
    client: Res<ChainClient>,
    active: Res<ActiveMatchShip>,
    mut roster: ResMut<FleetRoster>,
    mut notice: ResMut<TxNotice>,
) {
    for request in requests.read() {
        if active.0 == Some(request.ship_id) {
            let err = GameError::ShipInMatch { ship_id: request.ship_id };
            warn!("{err}");
            notice.show(err.to_string());
            continue;
        }

        let outcome = if request.release {
            client.0.unstake(request.ship_id)
        } else {
            client.0.stake(request.ship_id)
        };

        match outcome {
            Ok(tx) => {
                if let Some(ship) = roster.ships.iter_mut().find(|s| s.id == request.ship_id) {
                    ship.staked = !request.release;
                }
                let verb = if request.release { "unstaked" } else { "staked" };
                notice.show(format!("Ship #{} {verb} ({})", request.ship_id, tx.0));
            }
            Err(e) => {
                warn!("stake request for ship #{} failed: {e}", request.ship_id);
                notice.show(format!("Stake failed: {e}"));
            }
        }
    }
}

/// Tick down the transient notice and clear it when it expires.
pub fn tx_notice_decay_system(time: Res<Time>, mut notice: ResMut<TxNotice>) {
    if notice.remaining_secs > 0.0 {
        notice.remaining_secs = (notice.remaining_secs - time.delta_secs()).max(0.0);
        if notice.remaining_secs == 0.0 {
            notice.text.clear();
        }
    }
}
