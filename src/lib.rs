// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Muster: a deterministic two-general war simulation core.
//!
//! Two opposing generals recruit and train rosters of ranked soldiers,
//! battle each other, and persist their state through versioned binary
//! snapshots. The crate provides:
//! - Single-step battle resolution driven purely by aggregate strength
//! - A rank ladder where experience drives in-place promotion
//! - Atomic gold accounting (failed commands change nothing)
//! - A portable snapshot wire format with strict validation
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         Snapshot Store              │
//! ├─────────────────────────────────────┤
//! │  Generals (recruit / train / gold)  │
//! ├─────────────────────────────────────┤
//! │        Battle Resolver              │
//! ├─────────────────────────────────────┤
//! │     Soldier state machines          │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Determinism
//!
//! The core never constructs a random generator. The only random
//! decision, culling on a drawn battle, samples an injected
//! `rand::Rng`, so callers (and tests) control reproducibility by
//! seeding.
//!
//! Everything is single-threaded and synchronous; callers serialize
//! access to a shared general themselves.

pub mod error;
pub mod game;
pub mod snapshot;

pub use error::{CommandError, CommandResult, SnapshotError, SnapshotResult};

// Re-export key game types at crate root for convenience
pub use game::{Army, BattleOutcome, General, Rank, Soldier, resolve_battle};
