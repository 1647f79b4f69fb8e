/// Braille Unicode canvas for high-resolution terminal graphics.
/// Each character cell represents a 2x4 pixel grid (8 dots).
/// Unicode Braille patterns: U+2800 to U+28FF
#[derive(Clone, Debug)]
pub struct BrailleCanvas {
    width: usize,  // Characters
    height: usize, // Characters
    cells: Vec<u8>, // Bit pattern per char, row-major
}

impl BrailleCanvas {
    /// Create a canvas with the given character dimensions.
    /// Effective pixel resolution: width*2 x height*4
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Set a pixel; anything off the canvas is ignored.
    /// Braille dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    pub fn set_pixel(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let cx = x / 2;
        let cy = y / 4;
        if cx >= self.width || cy >= self.height {
            return;
        }

        const BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];
        self.cells[cy * self.width + cx] |= BITS[x % 2][y % 4];
    }

    /// Draw a line using Bresenham's algorithm
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Filled dot (for markers)
    pub fn dot(&mut self, cx: i32, cy: i32, radius: i32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy);
                }
            }
        }
    }

    /// Circle outline, sampled densely enough to stay connected at any radius
    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64) {
        let steps = ((radius * std::f64::consts::TAU).ceil() as usize).clamp(16, 20_000);
        let mut prev: Option<(i32, i32)> = None;
        for i in 0..=steps {
            let angle = i as f64 / steps as f64 * std::f64::consts::TAU;
            let p = (
                (cx + radius * angle.cos()).round() as i32,
                (cy + radius * angle.sin()).round() as i32,
            );
            if let Some(q) = prev {
                if self.segment_might_be_visible(q, p) {
                    self.line(q.0, q.1, p.0, p.1);
                }
            }
            prev = Some(p);
        }
    }

    /// Rough bounding box check before rasterizing a segment
    pub fn segment_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let max_x = p1.0.max(p2.0);
        let max_y = p1.1.max(p2.1);
        let min_x = p1.0.min(p2.0);
        let min_y = p1.1.min(p2.1);
        max_x >= 0
            && max_y >= 0
            && (min_x as i64) < self.pixel_width() as i64
            && (min_y as i64) < self.pixel_height() as i64
    }

    /// Get a specific row as a string (for line-by-line rendering)
    pub fn row_to_string(&self, row: usize) -> String {
        if row >= self.height {
            return String::new();
        }
        self.cells[row * self.width..(row + 1) * self.width]
            .iter()
            .map(|&b| char::from_u32(0x2800 + b as u32).unwrap_or(' '))
            .collect()
    }

    /// Get all rows as an iterator of strings
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.height).map(|i| self.row_to_string(i))
    }

    #[cfg(test)]
    fn render(&self) -> String {
        self.rows().collect::<Vec<_>>().join("\n")
    }
}
