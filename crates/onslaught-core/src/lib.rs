//! Core types and definitions for the ONSLAUGHT simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, entity records, commands, snapshots, events, constants and
//! the balance table. It has no runtime framework dependency.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod entities;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
