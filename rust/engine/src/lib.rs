//! # pokermachine-engine: Draw-Poker Wagering Core
//!
//! A session-based five-card draw machine played against a multi-pack shoe.
//! Provides the full hand lifecycle (wager, deal, hold, redraw, settlement),
//! an escalating "killer hand" schedule, and a persistent statistics ledger,
//! all with reproducible seeded RNG.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and pack construction
//! - [`shoe`] - Multi-pack shoe with deterministic ChaCha20 shuffling
//! - [`hand`] - Five-card classification into the twelve payout ranks
//! - [`payout`] - The multiplier table and gross/net settlement arithmetic
//! - [`killer`] - The killer-hand schedule, penalties and bonuses
//! - [`session`] - The phase machine driving one sitting at the machine
//! - [`stats`] - The persistent statistics record and its stores
//! - [`config`] - Tunable game parameters and their validation
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use pokermachine_engine::cards::{Card, Rank, Suit};
//! use pokermachine_engine::hand::{evaluate_hand, HandRank};
//!
//! // Classify a five-card hand
//! let cards = [
//!     Card { suit: Suit::Hearts, rank: Rank::Ace, pack: 0 },
//!     Card { suit: Suit::Clubs, rank: Rank::Ace, pack: 0 },
//!     Card { suit: Suit::Hearts, rank: Rank::King, pack: 0 },
//!     Card { suit: Suit::Diamonds, rank: Rank::Four, pack: 0 },
//!     Card { suit: Suit::Spades, rank: Rank::Nine, pack: 0 },
//! ];
//!
//! assert_eq!(evaluate_hand(&cards), Some(HandRank::PaidPair));
//! ```
//!
//! ## Deterministic Shuffles
//!
//! The shoe is reproducible from a seed:
//!
//! ```rust
//! use pokermachine_engine::shoe::Shoe;
//!
//! let mut a = Shoe::new_with_seed(10, 42);
//! let mut b = Shoe::new_with_seed(10, 42);
//! a.rebuild_and_shuffle();
//! b.rebuild_and_shuffle();
//! assert_eq!(a.draw(5).unwrap(), b.draw(5).unwrap());
//! ```
//!
//! ## Running a Hand
//!
//! ```rust
//! use pokermachine_engine::config::GameConfig;
//! use pokermachine_engine::session::{HoldMask, Session, WagerRequest};
//! use pokermachine_engine::stats::{MemoryStore, StatsRecord};
//!
//! let mut session = Session::new(
//!     GameConfig::default(),
//!     StatsRecord::default(),
//!     Box::new(MemoryStore::new()),
//!     Some(42),
//! )
//! .unwrap();
//!
//! session.begin_hand().unwrap();
//! session.place_wager(WagerRequest::Minimum).unwrap();
//! session.deal().unwrap();
//! session.offer_draw().unwrap();
//! let outcome = session.resolve(HoldMask::NONE).unwrap();
//! println!("scored {:?}, bankroll {}", outcome.rank, outcome.bankroll);
//! ```

pub mod cards;
pub mod config;
pub mod errors;
pub mod hand;
pub mod killer;
pub mod payout;
pub mod session;
pub mod shoe;
pub mod stats;
