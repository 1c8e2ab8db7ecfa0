//! Core board types and win detection for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// One of the two exclusive move markers assigned per room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// First mark (goes first).
    X,
    /// Second mark (goes second).
    O,
}

impl Mark {
    /// The mark that opens every game.
    pub const FIRST: Mark = Mark::X;

    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A single board cell: empty, or holding one of the two marks.
pub type Cell = Option<Mark>;

/// 3x3 tic-tac-toe board, cells in row-major order (0-8).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self { cells: [None; 9] }
    }

    /// Gets the cell at the given index, or `None` if out of range.
    pub fn get(&self, idx: usize) -> Option<Cell> {
        self.cells.get(idx).copied()
    }

    /// Writes a mark into a cell. The caller must have validated the index.
    pub fn set(&mut self, idx: usize, mark: Mark) {
        self.cells[idx] = Some(mark);
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.cells = [None; 9];
    }

    /// Checks if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Returns all cells as a fixed-size slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Checks for a winning line on the board.
    ///
    /// Returns the mark holding three equal non-empty cells across any of the
    /// 8 fixed lines, or `None`. A full board with no winning line is a draw,
    /// classified by the caller.
    pub fn winner(&self) -> Option<Mark> {
        const LINES: [[usize; 3]; 8] = [
            // Rows
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            // Columns
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            // Diagonals
            [0, 4, 8],
            [2, 4, 6],
        ];

        for [a, b, c] in LINES {
            if let Some(mark) = self.cells[a] {
                if self.cells[b] == Some(mark) && self.cells[c] == Some(mark) {
                    return Some(mark);
                }
            }
        }

        None
    }

    /// Formats the board as a human-readable grid for logs and diagnostics.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let idx = row * 3 + col;
                let symbol = match self.cells[idx] {
                    None => (idx + 1).to_string(),
                    Some(Mark::X) => "X".to_string(),
                    Some(Mark::O) => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}
