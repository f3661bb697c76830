use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Axis along which a word's letters are laid out
#[derive(Debug, Clone, Copy, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Constant row, increasing column
    Horizontal,
    /// Constant column, increasing row
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// The `offset`-th cell of a run starting at `anchor`
    pub fn step(self, anchor: Position, offset: usize) -> Position {
        match self {
            Orientation::Horizontal => Position::new(anchor.row, anchor.col + offset),
            Orientation::Vertical => Position::new(anchor.row + offset, anchor.col),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            "vertical" | "v" => Ok(Orientation::Vertical),
            other => Err(format!("unknown orientation '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Side length of the square grid
    pub fn grid_size(self) -> usize {
        match self {
            Difficulty::Easy => 7,
            Difficulty::Medium => 10,
            Difficulty::Hard => 15,
        }
    }

    /// Number of words the puzzle asks for
    pub fn word_count(self) -> usize {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 7,
            Difficulty::Hard => 10,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_step() {
        let anchor = Position::new(2, 3);
        assert_eq!(Orientation::Horizontal.step(anchor, 2), Position::new(2, 5));
        assert_eq!(Orientation::Vertical.step(anchor, 2), Position::new(4, 3));
        assert_eq!(Orientation::Vertical.step(anchor, 0), anchor);
    }

    #[test]
    fn test_parse_orientation() {
        assert_eq!("Horizontal".parse::<Orientation>(), Ok(Orientation::Horizontal));
        assert_eq!(" v ".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert!("diagonal".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::Easy.grid_size(), 7);
        assert_eq!(Difficulty::Easy.word_count(), 5);
        assert_eq!(Difficulty::Medium.grid_size(), 10);
        assert_eq!(Difficulty::Medium.word_count(), 7);
        assert_eq!(Difficulty::Hard.grid_size(), 15);
        assert_eq!(Difficulty::Hard.word_count(), 10);
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
    }

    #[test]
    fn test_deserialize_lowercase_names() {
        let difficulty: Difficulty = serde_json::from_str(r#""easy""#).unwrap();
        let orientations: Vec<Orientation> =
            serde_json::from_str(r#"["horizontal", "vertical"]"#).unwrap();

        assert_eq!(difficulty, Difficulty::Easy);
        assert_eq!(orientations, Orientation::ALL.to_vec());
    }
}
