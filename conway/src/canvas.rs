// canvas.rs - Surface that records egui shapes for the host to paint

use egui::{Color32, Pos2, Rect, Shape, Stroke, pos2, vec2};

use crate::surface::{RenderSurface, Scene, WHITE, polygon_vertices};

/// Records every drawing call as an egui [`Shape`]. Nothing is rasterized
/// here; the host hands the shapes to its painter.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    shapes: Vec<Shape>,
    stroke: Stroke,
    fill: Color32,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
            stroke: Stroke::new(1.0, WHITE),
            fill: WHITE,
        }
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(self.width as f32, self.height as f32))
    }
}

impl RenderSurface for Canvas {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color32) {
        self.shapes.clear();
        if color != Color32::TRANSPARENT {
            self.shapes.push(Shape::rect_filled(self.bounds(), 0.0, color));
        }
    }

    fn set_stroke(&mut self, color: Color32, width: f32) {
        self.stroke = Stroke::new(width, color);
    }

    fn stroke_regular_polygon(&mut self, sides: usize, centre: Pos2, radius: f32, rotation: f32) {
        if sides < 3 {
            return;
        }
        let points = polygon_vertices(sides, centre, radius, rotation);
        self.shapes.push(Shape::closed_line(points, self.stroke));
    }

    fn set_fill(&mut self, color: Color32) {
        self.fill = color;
    }

    fn set_pixel(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let cell = Rect::from_min_size(pos2(x as f32, y as f32), vec2(1.0, 1.0));
        self.shapes.push(Shape::rect_filled(cell, 0.0, self.fill));
    }

    fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize) {
        let rect = Rect::from_min_size(pos2(x as f32, y as f32), vec2(width as f32, height as f32))
            .intersect(self.bounds());
        if rect.is_positive() {
            self.shapes.push(Shape::rect_filled(rect, 0.0, self.fill));
        }
    }

    fn scene(&self) -> Scene {
        Scene { width: self.width, height: self.height, shapes: self.shapes.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{GRID_GREY, HexGrid, TRANSPARENT};

    #[test]
    fn clear_drops_earlier_shapes() {
        let mut canvas = Canvas::new(4, 3);
        canvas.set_pixel(1, 1);
        canvas.clear(TRANSPARENT);
        assert!(canvas.scene().shapes.is_empty());

        canvas.clear(Color32::BLACK);
        assert_eq!(canvas.scene().shapes.len(), 1);
    }

    #[test]
    fn pixels_are_unit_rects() {
        let mut canvas = Canvas::new(4, 3);
        canvas.set_fill(WHITE);
        canvas.set_pixel(1, 2);
        canvas.set_pixel(9, 9);
        assert_eq!(canvas.scene().filled_cells(WHITE), vec![(1, 2)]);
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut canvas = Canvas::new(5, 5);
        canvas.fill_rect(3, 3, 10, 10);
        canvas.fill_rect(7, 7, 2, 2);
        let scene = canvas.scene();
        assert_eq!(scene.shapes.len(), 1);
        match &scene.shapes[0] {
            Shape::Rect(rect) => assert_eq!(rect.rect, Rect::from_min_max(pos2(3.0, 3.0), pos2(5.0, 5.0))),
            other => panic!("expected a rect, got {other:?}"),
        }
    }

    #[test]
    fn polygon_stroke_is_closed_path() {
        let mut canvas = Canvas::new(32, 32);
        canvas.set_stroke(GRID_GREY, 2.0);
        canvas.stroke_regular_polygon(4, pos2(16.0, 16.0), 8.0, 0.0);
        canvas.stroke_regular_polygon(2, pos2(16.0, 16.0), 8.0, 0.0);
        let scene = canvas.scene();
        assert_eq!(scene.shapes.len(), 1);
        match &scene.shapes[0] {
            Shape::Path(path) => {
                assert!(path.closed);
                assert_eq!(path.points.len(), 4);
                assert_eq!(path.stroke, Stroke::new(2.0, GRID_GREY));
            }
            other => panic!("expected a path, got {other:?}"),
        }
    }

    #[test]
    fn hex_overlay_is_one_path_per_hexagon() {
        let mut canvas = Canvas::new(64, 48);
        let grid = HexGrid { radius: 8.0, columns: 10, ..HexGrid::default() };
        canvas.hex_grid(&grid);
        assert_eq!(canvas.scene().shapes.len(), grid.centres(48).len());
    }

    #[test]
    fn placed_scene_is_translated() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set_pixel(0, 0);
        let placed = canvas.scene().placed_at(pos2(10.0, 20.0));
        match &placed[0] {
            Shape::Rect(rect) => assert_eq!(rect.rect.min, pos2(10.0, 20.0)),
            other => panic!("expected a rect, got {other:?}"),
        }
    }
}
