use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing::warn;

use crate::camera::Camera;
use crate::camera::DOTS_PER_COL;
use crate::camera::DOTS_PER_ROW;
use crate::config::Config;
use crate::events::Event;
use crate::grid::LifeGrid;

/// Everything the terminal front end keeps between frames.
pub struct Life {
    config: Config,
    grid: LifeGrid,
    cam: Camera,
}

impl Life {
    /// Start a random grid on a terminal of `cols` by `rows` characters.
    pub fn new(config: Config, cols: u16, rows: u16) -> anyhow::Result<Self> {
        let cam = Camera::for_terminal(cols, rows);
        let grid = Self::make_grid(&config, cols, rows)?;

        Ok(Self { config, grid, cam })
    }

    /// Build a random grid filling the configured display, or the whole terminal if none is set.
    fn make_grid(config: &Config, cols: u16, rows: u16) -> anyhow::Result<LifeGrid> {
        let available = (cols as usize * DOTS_PER_COL, rows as usize * DOTS_PER_ROW);
        let (display_width, display_height) = config.display_size(available);

        let (w, h) = config
            .grid_dimensions(display_width, display_height)
            .context("Display too small for the configured cell size")?;

        info!(w, h, display_width, display_height, "creating grid");

        Ok(LifeGrid::random(w, h)?)
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn camera(&self) -> &Camera {
        &self.cam
    }

    pub fn frame_time(&self) -> Duration {
        self.config.frame_time()
    }

    /// Returns `false` once the app should exit
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Exit => return false,
            Event::Reset => {
                info!(generation = self.grid.generation(), "reset");
                self.grid.randomize();
            }
            Event::Resize { cols, rows } => {
                self.cam = Camera::for_terminal(cols, rows);

                // A fixed display keeps its grid; only the view changes
                if self.config.display.is_none() {
                    match Self::make_grid(&self.config, cols, rows) {
                        Ok(grid) => self.grid = grid,
                        Err(e) => warn!("Keeping old grid after resize: {e:#}"),
                    }
                }
            }
        }

        true
    }

    pub fn step(&mut self) {
        self.grid.step();
    }

    /// Draw the current generation and return it as braille text.
    pub fn render(&mut self) -> &str {
        self.cam.reset();
        self.cam.draw_grid(&self.grid, self.config.cell_size);
        self.cam.render()
    }
}
