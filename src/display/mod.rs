// src/display/mod.rs
//! Display modules for the demo viewer

pub mod terminal;

pub use terminal::{CellState, TerminalDisplay};
