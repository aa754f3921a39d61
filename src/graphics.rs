use crate::math::Vector2;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// Character buffer the scene is rasterized into
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    cells: Vec<char>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    /// Sets a single cell, ignoring coordinates outside the canvas
    pub fn plot(&mut self, col: isize, row: isize, c: char) {
        if col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height {
            self.cells[row as usize * self.width + col as usize] = c;
        }
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        if col < self.width && row < self.height {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Writes `text` starting at the given cell, clipped to the canvas
    pub fn put_str(&mut self, col: isize, row: isize, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.plot(col + i as isize, row, c);
        }
    }

    pub fn row(&self, row: usize) -> String {
        self.cells[row * self.width..(row + 1) * self.width]
            .iter()
            .collect()
    }

    /// Draws a line between two cells using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, c: char) {
        let (mut x0, mut y0, x1, y1) = (
            x0.round() as isize,
            y0.round() as isize,
            x1.round() as isize,
            y1.round() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, c);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Draws the outline of a world-space circle as a closed polyline
    pub fn draw_circle(&mut self, view: &Viewport, center: Vector2, radius: f64, c: char) {
        let segments = ((radius * view.scale_x).ceil() as usize * 4).clamp(16, 720);
        let point = |i: usize| {
            let a = i as f64 * std::f64::consts::TAU / segments as f64;
            view.to_cell(Vector2::new(
                center.x + a.cos() * radius,
                center.y + a.sin() * radius,
            ))
        };
        let mut prev = point(0);
        for i in 1..=segments {
            let next = point(i);
            self.draw_line(prev.0, prev.1, next.0, next.1, c);
            prev = next;
        }
    }

    /// Fills a world-space disk; always covers at least the centre cell
    pub fn fill_disk(&mut self, view: &Viewport, center: Vector2, radius: f64, c: char) {
        let (cx, cy) = view.to_cell(center);
        let rx = radius * view.scale_x;
        let ry = radius * view.scale_y;
        // only visit cells that exist
        let min_col = (cx - rx).floor().max(0.0) as isize;
        let max_col = (cx + rx).ceil().min(self.width as f64 - 1.0) as isize;
        let min_row = (cy - ry).floor().max(0.0) as isize;
        let max_row = (cy + ry).ceil().min(self.height as f64 - 1.0) as isize;
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let nx = (col as f64 - cx) / rx.max(0.5);
                let ny = (row as f64 - cy) / ry.max(0.5);
                if nx * nx + ny * ny <= 1.0 {
                    self.plot(col, row, c);
                }
            }
        }
        self.plot(cx.round() as isize, cy.round() as isize, c);
    }
}

/// Maps scene coordinates to canvas cells, y pointing up in the scene
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub origin: Vector2,
    pub scale_x: f64,
    pub scale_y: f64,
    center_col: f64,
    center_row: f64,
}

impl Viewport {
    /// Fits a square of half-width `extent` around `origin` into the canvas
    pub fn fit(width: usize, height: usize, origin: Vector2, extent: f64) -> Self {
        let usable_rows = (height.max(2) - 1) as f64;
        let usable_cols = (width.max(2) - 1) as f64;
        let scale_y =
            (usable_rows / (2.0 * extent)).min(usable_cols / (2.0 * extent * CELL_ASPECT));
        Viewport {
            origin,
            scale_x: scale_y * CELL_ASPECT,
            scale_y,
            center_col: usable_cols / 2.0,
            center_row: usable_rows / 2.0,
        }
    }

    /// Fractional (column, row) of a scene point
    pub fn to_cell(&self, p: Vector2) -> (f64, f64) {
        (
            self.center_col + (p.x - self.origin.x) * self.scale_x,
            self.center_row - (p.y - self.origin.y) * self.scale_y,
        )
    }
}
