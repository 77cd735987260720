//! Concrete implementations of the `Board` trait.

/// A three-in-a-row board on a square grid.
pub mod tic_tac_toe;
