//! Piece module - the active falling polyomino
//!
//! A piece is four integer cells, a color, and a pivot. The pivot is the
//! rounded centroid of the cells at spawn time; it follows the piece through
//! translations and is never recomputed, so every rotation of a piece turns
//! about the same point.

use crate::rng::SimpleRng;
use crate::types::{Color, Coord, ShapeKind, ShapeOffsets};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: ShapeKind,
    color: Color,
    coords: ShapeOffsets,
    pivot: Coord,
}

impl Piece {
    /// Create a piece at the catalog's native offsets
    pub fn new(kind: ShapeKind, color: Color) -> Self {
        let coords = kind.offsets();
        Self {
            kind,
            color,
            coords,
            pivot: centroid(&coords),
        }
    }

    /// Spawn a piece with a uniformly random shape and an independently
    /// uniformly random color
    pub fn spawn(rng: &mut SimpleRng) -> Self {
        let kind = rng.choose(&ShapeKind::ALL);
        let color = rng.choose(&Color::ALL);
        Self::new(kind, color)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn coords(&self) -> &ShapeOffsets {
        &self.coords
    }

    pub fn pivot(&self) -> Coord {
        self.pivot
    }

    /// Shift every cell and the pivot. No collision awareness.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        for (x, y) in &mut self.coords {
            *x += dx;
            *y += dy;
        }
        self.pivot.0 += dx;
        self.pivot.1 += dy;
    }

    /// Rotate every cell counter-clockwise (in x-right/y-up terms) about the
    /// frozen pivot. With the grid's y axis pointing down a positive angle
    /// turns the piece clockwise on screen.
    ///
    /// Both new components are derived from the pre-rotation cell, and each is
    /// rounded to the nearest integer (ties away from zero). For multiples of
    /// 90 degrees `rotate(a)` followed by `rotate(-a)` is an exact inverse.
    pub fn rotate(&mut self, angle_degrees: f64) {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let (px, py) = self.pivot;

        for (x, y) in &mut self.coords {
            let rx = (*x - px) as f64;
            let ry = (*y - py) as f64;
            let new_x = (rx * cos - ry * sin + px as f64).round() as i32;
            let new_y = (rx * sin + ry * cos + py as f64).round() as i32;
            *x = new_x;
            *y = new_y;
        }
    }
}

/// Coordinate-wise mean of the cells, each axis rounded independently.
fn centroid(coords: &ShapeOffsets) -> Coord {
    let n = coords.len() as f64;
    let (sx, sy) = coords
        .iter()
        .fold((0, 0), |(sx, sy), &(x, y)| (sx + x, sy + y));
    (
        (sx as f64 / n).round() as i32,
        (sy as f64 / n).round() as i32,
    )
}
