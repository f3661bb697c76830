use crossterm::style::Color;
use rand::Rng;
use thiserror::Error;

use crate::{models::Position, utils::letters::random_letter};

/// Symbol held by a cell no word has claimed yet
pub const PLACEHOLDER: char = '*';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid size must be positive, got {0}")]
    InvalidSize(usize),
}

/// Square puzzle board.
///
/// Logical letters and display highlights are stored separately: highlighting a
/// cell never changes the letter it holds, and a cell carries at most one
/// highlight at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<char>>,
    highlights: Vec<Vec<Option<Color>>>,
}

impl Grid {
    /// Create an empty `size` x `size` grid of placeholders
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::InvalidSize(size));
        }

        Ok(Self {
            size,
            cells: vec![vec![PLACEHOLDER; size]; size],
            highlights: vec![vec![None; size]; size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn get(&self, pos: Position) -> Option<char> {
        self.contains(pos).then(|| self.cells[pos.row][pos.col])
    }

    /// True if `letter` may occupy the cell: it is empty or already holds `letter`
    pub fn cell_compatible(&self, pos: Position, letter: char) -> bool {
        matches!(self.get(pos), Some(c) if c == PLACEHOLDER || c == letter)
    }

    /// Overwrite a cell. Callers check `cell_compatible` first.
    pub fn set_cell(&mut self, pos: Position, letter: char) {
        self.cells[pos.row][pos.col] = letter;
    }

    pub fn highlight(&self, pos: Position) -> Option<Color> {
        self.contains(pos)
            .then(|| self.highlights[pos.row][pos.col])
            .flatten()
    }

    /// Replace whatever highlight the cell had with `color`
    pub fn set_highlight(&mut self, pos: Position, color: Color) {
        self.highlights[pos.row][pos.col] = Some(color);
    }

    /// Logical letters in row-major order
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Letters along a coordinate sequence
    pub fn read(&self, positions: &[Position]) -> String {
        positions.iter().filter_map(|pos| self.get(*pos)).collect()
    }

    pub fn placeholder_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| **c == PLACEHOLDER)
            .count()
    }

    /// Replace every remaining placeholder with a frequency-weighted random letter.
    /// Only meaningful once placement is finished.
    pub fn fill_placeholders(&mut self, rng: &mut impl Rng) {
        for cell in self.cells.iter_mut().flatten() {
            if *cell == PLACEHOLDER {
                *cell = random_letter(rng);
            }
        }
    }
}
