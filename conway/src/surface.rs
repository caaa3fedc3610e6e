// surface.rs - Drawing contract the renderer paints onto

use std::f32::consts::{PI, TAU};

use egui::{Color32, Pos2, Shape, pos2};

pub const TRANSPARENT: Color32 = Color32::TRANSPARENT;
pub const WHITE: Color32 = Color32::WHITE;
pub const GRID_GREY: Color32 = Color32::from_rgb(77, 77, 77);

/// Composed frame handed to the host: egui shapes in surface coordinates,
/// origin top-left, one unit per cell.
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// Shapes moved so the surface origin lands on `origin`.
    pub fn placed_at(&self, origin: Pos2) -> Vec<Shape> {
        self.shapes
            .iter()
            .cloned()
            .map(|mut shape| {
                shape.translate(origin.to_vec2());
                shape
            })
            .collect()
    }

    /// Top-left corners of every 1x1 rect filled with `color`.
    pub fn filled_cells(&self, color: Color32) -> Vec<(usize, usize)> {
        self.shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Rect(rect) if rect.fill == color && rect.rect.width() == 1.0 && rect.rect.height() == 1.0 => {
                    Some((rect.rect.min.x as usize, rect.rect.min.y as usize))
                }
                _ => None,
            })
            .collect()
    }
}

/// Hexagon overlay drawn behind the cells each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGrid {
    /// Centre-to-vertex distance in surface units.
    pub radius: f32,
    pub columns: usize,
    pub color: Color32,
    pub line_width: f32,
}

impl Default for HexGrid {
    fn default() -> Self {
        Self { radius: 16.0, columns: 25, color: GRID_GREY, line_width: 1.0 }
    }
}

impl HexGrid {
    /// Centres of a flat-topped hex tiling; odd columns sit half a row lower.
    pub fn centres(&self, height: usize) -> Vec<Pos2> {
        if self.radius <= 0.0 {
            return Vec::new();
        }
        let row_step = 3f32.sqrt() * self.radius;
        let rows = (height as f32 / row_step).ceil() as usize + 1;
        let mut centres = Vec::with_capacity(rows * self.columns);
        for col in 0..self.columns {
            let x = col as f32 * 1.5 * self.radius;
            let shift = if col % 2 == 1 { row_step / 2.0 } else { 0.0 };
            for row in 0..rows {
                centres.push(pos2(x, row as f32 * row_step + shift));
            }
        }
        centres
    }
}

/// Vertices of a regular polygon, first vertex at `rotation` radians.
pub fn polygon_vertices(sides: usize, centre: Pos2, radius: f32, rotation: f32) -> Vec<Pos2> {
    // Odd polygons point up, matching the usual canvas convention
    let rotation = if sides % 2 == 1 { rotation - PI / 2.0 } else { rotation };
    (0..sides)
        .map(|i| {
            let a = rotation + TAU * i as f32 / sides as f32;
            pos2(centre.x + radius * a.cos(), centre.y + radius * a.sin())
        })
        .collect()
}

/// The drawing surface a frame is composed on. Implementations keep their
/// own current stroke and fill state, like a 2D canvas context.
pub trait RenderSurface {
    fn size(&self) -> (usize, usize);

    /// Drops everything drawn so far and fills the surface with `color`.
    fn clear(&mut self, color: Color32);

    fn set_stroke(&mut self, color: Color32, width: f32);

    /// Outlines a regular polygon with the current stroke.
    fn stroke_regular_polygon(&mut self, sides: usize, centre: Pos2, radius: f32, rotation: f32);

    fn set_fill(&mut self, color: Color32);

    /// Fills the unit cell at (x, y) with the current fill colour.
    /// Off-surface points are ignored.
    fn set_pixel(&mut self, x: usize, y: usize);

    fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize);

    fn hex_grid(&mut self, grid: &HexGrid) {
        let (_, height) = self.size();
        self.set_stroke(grid.color, grid.line_width);
        for centre in grid.centres(height) {
            self.stroke_regular_polygon(6, centre, grid.radius, 0.0);
        }
    }

    /// Snapshot of the composed frame.
    fn scene(&self) -> Scene;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hexagon_vertices_are_flat_topped() {
        let v = polygon_vertices(6, pos2(10.0, 10.0), 4.0, 0.0);
        assert_eq!(v.len(), 6);
        assert!((v[0].x - 14.0).abs() < 1e-4 && (v[0].y - 10.0).abs() < 1e-4);
        assert!((v[3].x - 6.0).abs() < 1e-4);
    }

    #[test]
    fn hex_grid_covers_height() {
        let grid = HexGrid { radius: 10.0, columns: 3, ..HexGrid::default() };
        let centres = grid.centres(100);
        let rows = (100.0 / (3f32.sqrt() * 10.0)).ceil() as usize + 1;
        assert_eq!(centres.len(), 3 * rows);
        assert!(centres.iter().any(|c| c.y >= 100.0));
    }

    #[test]
    fn degenerate_hex_grid_is_empty() {
        let grid = HexGrid { radius: 0.0, ..HexGrid::default() };
        assert!(grid.centres(480).is_empty());
    }
}
