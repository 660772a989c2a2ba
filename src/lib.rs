//! Morris-Rust: rules engine and computer opponent for men's morris.
//!
//! The board is a stack of concentric eight-point rings, which covers six
//! men's morris (two rings) as well as the nine and twelve piece games on
//! three rings.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and rule constants
//! - [`board`] - Board storage, adjacency and mill lines
//! - [`rules`] - Phase/turn state machine and move validation
//! - [`ai`] - Heuristic computer opponent
//! - [`selfplay`] - Computer-vs-computer games
//! - [`protocol`] - Line-based text protocol for front ends
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use morris_rust::ai::Opponent;
//! use morris_rust::board::{Color, Variant};
//! use morris_rust::rules::{Advance, RulesEngine};
//!
//! // Start a six men's morris game with red to play
//! let mut engine = RulesEngine::new(Variant::SIX, Color::Red);
//! assert_eq!(engine.attempt_place(0, Color::Red), Ok(Advance::Turn(Color::Blue)));
//!
//! // Let the computer answer for blue
//! let mut rng = fastrand::Rng::with_seed(7);
//! let action = Opponent::new(Color::Blue).decide(&engine, &mut rng).unwrap();
//! println!("blue plays {action}");
//! engine.apply(action, Color::Blue).unwrap();
//! ```

pub mod ai;
pub mod board;
pub mod constants;
pub mod error;
pub mod protocol;
pub mod rules;
pub mod selfplay;
