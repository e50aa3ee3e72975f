//! Grid module - manages the settled blocks
//!
//! The grid is a fixed `width x height` matrix where each cell is empty or
//! holds the color of a locked block. Storage is a flat row-major vector.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom,
//! row 0 is the top row.
//!
//! Grid operations do not bounds-check on behalf of the caller: passing a
//! coordinate outside the grid to [`Grid::collides`] or [`Grid::lock`] is a
//! caller bug and panics. The engine performs its own bounds checks first.

use crate::piece::Piece;
use crate::types::Cell;

/// The playfield - settled cells in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether (x, y) lies inside the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    /// Flat index of an in-bounds cell; panics otherwise.
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            self.in_bounds(x, y),
            "cell ({}, {}) is outside the {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize) * self.width + (x as usize)
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Whether any of the piece's cells overlaps a settled block.
    ///
    /// Panics if any cell lies outside the grid.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece
            .coords()
            .iter()
            .any(|&(x, y)| self.cells[self.index(x, y)].is_some())
    }

    /// Write the piece's color into each of its cells, overwriting whatever
    /// is there.
    ///
    /// Panics if any cell lies outside the grid.
    pub fn lock(&mut self, piece: &Piece) {
        for &(x, y) in piece.coords() {
            let idx = self.index(x, y);
            self.cells[idx] = Some(piece.color());
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned top to bottom. Each full row is collapsed where it is
    /// found, pulling every row above it down by one, before the scan moves
    /// on. Collapsing only moves rows at or above the current index, so rows
    /// further down keep their absolute positions for the rest of the scan.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..self.height {
            if self.is_row_full(y) {
                self.eliminate_line(y);
                cleared += 1;
            }
        }
        cleared
    }

    /// Cascade rows 0..y down by one onto row y, leaving row 0 empty.
    fn eliminate_line(&mut self, y: usize) {
        let width = self.width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);
    }

    /// Row `y` as a slice. Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, ShapeKind};

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(10, 20);
        assert_eq!(grid.index(0, 0), 0);
        assert_eq!(grid.index(9, 0), 9);
        assert_eq!(grid.index(0, 1), 10);
        assert_eq!(grid.index(9, 19), 199);
    }

    #[test]
    #[should_panic(expected = "outside the 10x20 grid")]
    fn test_collides_panics_below_floor() {
        let grid = Grid::new(10, 20);
        let mut piece = Piece::new(ShapeKind::I, Color::Red);
        piece.translate(0, 17);
        grid.collides(&piece);
    }

    #[test]
    #[should_panic]
    fn test_lock_panics_left_of_grid() {
        let mut grid = Grid::new(10, 20);
        let mut piece = Piece::new(ShapeKind::O, Color::Red);
        piece.translate(-1, 0);
        grid.lock(&piece);
    }

    #[test]
    fn test_eliminate_line_cascades_to_top() {
        let mut grid = Grid::new(3, 4);
        grid.set(0, 0, Some(Color::Red));
        grid.set(1, 1, Some(Color::Blue));
        grid.set(2, 2, Some(Color::Green));
        grid.set(0, 3, Some(Color::Cyan));

        grid.eliminate_line(2);

        assert_eq!(grid.row(0), &[None, None, None]);
        assert_eq!(grid.row(1), &[Some(Color::Red), None, None]);
        assert_eq!(grid.row(2), &[None, Some(Color::Blue), None]);
        // Below the eliminated row nothing moves.
        assert_eq!(grid.row(3), &[Some(Color::Cyan), None, None]);
    }

    #[test]
    fn test_eliminate_top_line_just_empties_it() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, Some(Color::Red));
        grid.set(1, 0, Some(Color::Red));
        grid.set(0, 1, Some(Color::Blue));

        grid.eliminate_line(0);

        assert_eq!(grid.row(0), &[None, None]);
        assert_eq!(grid.row(1), &[Some(Color::Blue), None]);
    }

    #[test]
    fn test_rows_iterates_top_to_bottom() {
        let mut grid = Grid::new(2, 3);
        grid.set(1, 2, Some(Color::Purple));
        let rows: Vec<&[Cell]> = grid.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], &[None, Some(Color::Purple)]);
    }
}
