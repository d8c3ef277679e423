//! Slot Traffic Library
//!
//! A discrete-time traffic simulation where vehicles hop between fixed
//! slots on lanes wired together into a network.

pub mod config;
pub mod pace;
pub mod simulation;
