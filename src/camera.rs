use crate::grid::LifeGrid;

/// Hex values of braille dots
///
/// ```notrust
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Pixels covered by a single braille character
pub const DOTS_PER_COL: usize = 2;
pub const DOTS_PER_ROW: usize = 4;

pub struct Camera {
    /// The pixel buffer, `true` where a dot is raised
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Dot patterns, one per braille character. Added to `BRAILLE_EMPTY` to get a codepoint.
    cp: Vec<u8>,

    /// Width of the pixel buffer
    w: usize,

    /// Height of the pixel buffer
    h: usize,
}

impl Camera {
    pub fn new(w: usize, h: usize) -> Self {
        // For each braille character, we need 3 bytes:
        //  - The leader byte:     0b11100010
        //  - Continuation byte 1: 0b101000xx
        //  - Continuation byte 2: 0b10xxxxxx
        // For each newline, we need one byte: 0b00001010
        //
        // `bw = ceil(w / 2)` and `bh = ceil(h / 4)` are the width and height of the framebuffer
        // in braille characters, so it takes `3 * (bw * bh) + bh` bytes.
        let (bw, bh) = (w.div_ceil(DOTS_PER_COL), h.div_ceil(DOTS_PER_ROW));

        Self {
            cb: vec![false; w * h],
            fb: String::with_capacity(3 * (bw * bh) + bh),
            cp: vec![0; bw * bh],
            w,
            h,
        }
    }

    /// A camera covering a terminal of `cols` by `rows` characters.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols as usize * DOTS_PER_COL, rows as usize * DOTS_PER_ROW)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Throw away the current contents and change the size of the pixel buffer.
    pub fn resize(&mut self, w: usize, h: usize) {
        *self = Self::new(w, h);
    }

    /// Turns on a single pixel of the pixel buffer
    pub fn draw_pixel(&mut self, x: usize, y: usize) {
        assert!(x < self.w, "x is out of bounds");
        assert!(y < self.h, "y is out of bounds");

        let i = self.xy_from(x, y);

        self.cb[i] = true;
    }

    /// Turns on an `s` by `s` square with its top left corner at `(x, y)`. Whatever falls outside
    /// the pixel buffer is dropped.
    pub fn draw_square(&mut self, x: usize, y: usize, s: usize) {
        let x_end = (x + s).min(self.w);
        let y_end = (y + s).min(self.h);

        for y in y..y_end {
            for x in x..x_end {
                let i = self.xy_from(x, y);
                self.cb[i] = true
            }
        }
    }

    /// Paint each live cell of `grid` as a `cell_size` square block of pixels. Every pixel takes
    /// the state of exactly one cell, so cell edges stay sharp at any magnification.
    pub fn draw_grid(&mut self, grid: &LifeGrid, cell_size: usize) {
        grid.for_each_cell(|x, y, alive| {
            if alive {
                self.draw_square(x * cell_size, y * cell_size, cell_size);
            }
        });
    }

    /// Reset the pixel buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Turn the pixel buffer into braille text, one line per 4 rows of pixels.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(DOTS_PER_COL);

        // compute new dot patterns
        self.cp.fill(0);

        for (n, &px) in self.cb.iter().enumerate() {
            if px {
                let (x, y) = self.xy_to(n);
                self.cp[(y / DOTS_PER_ROW) * bw + (x / DOTS_PER_COL)] |= Self::get_hex_value(x, y);
            }
        }

        self.fb.clear();

        for (i, &dots) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // U+2800..=U+28FF are all assigned, so this never falls back
            let c = char::from_u32(BRAILLE_EMPTY + dots as u32).unwrap_or(' ');
            self.fb.push(c);
        }

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u8 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
