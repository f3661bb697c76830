pub mod grid;
pub mod placement;
pub mod render;
pub mod session;

pub use grid::Grid;
pub use placement::PlacementEngine;
pub use session::{GameSession, GuessOutcome, PlayerInput};
