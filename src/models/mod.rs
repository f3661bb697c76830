pub mod game;

pub use game::{Difficulty, Orientation, Position};
