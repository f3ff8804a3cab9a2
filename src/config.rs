use std::ffi::OsString;
use std::time::Duration;

use anyhow::Context;
use anyhow::bail;
use clap::Parser;
use thiserror::Error;

/// Display pixels per cell side. In the terminal a pixel is one braille dot.
pub const DEFAULT_CELL_SIZE: usize = 2;

pub const DEFAULT_FRAME_RATE: u32 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cell size must be at least 1 pixel")]
    ZeroCellSize,

    #[error("Frame rate must be at least 1 frame per second")]
    ZeroFrameRate,

    #[error(
        "A {display_width}x{display_height} display cannot fit a single {cell_size}x{cell_size} cell"
    )]
    EmptyGrid {
        display_width: usize,
        display_height: usize,
        cell_size: usize,
    },
}

/// Conway's Game of Life on a torus, drawn in the terminal. Press `r` to reset, `q` to quit.
#[derive(Parser, Debug)]
#[command(name = "torus-life", version)]
pub struct Args {
    /// Pixels (braille dots) per cell side
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: usize,

    /// Fixed display size in pixels, instead of the terminal size
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub size: Option<(usize, usize)>,

    /// Frames per second
    #[arg(long = "fps", value_name = "FPS", default_value_t = DEFAULT_FRAME_RATE)]
    pub frame_rate: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Side length of a cell, in display pixels
    pub cell_size: usize,

    /// Display size in pixels. `None` means "whatever the terminal gives us".
    pub display: Option<(usize, usize)>,

    pub frame_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            display: None,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let config = Config {
            cell_size: args.cell_size,
            display: args.size,
            frame_rate: args.frame_rate,
        };
        config.validate()?;

        Ok(config)
    }
}

impl Config {
    /// Parse command line arguments, program name first.
    pub fn from_args<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = Args::try_parse_from(args)?;

        Ok(Config::try_from(args)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }

        Ok(())
    }

    /// Time budget for one frame.
    ///
    /// Panics if the frame rate is zero, which [`Config::validate`] rejects.
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate
    }

    /// The display size to use, given the size the terminal offers.
    pub fn display_size(&self, available: (usize, usize)) -> (usize, usize) {
        self.display.unwrap_or(available)
    }

    /// Number of cells that fit on a `display_width` by `display_height` display. Leftover pixels
    /// on the right and bottom are not covered by the grid.
    pub fn grid_dimensions(
        &self,
        display_width: usize,
        display_height: usize,
    ) -> Result<(usize, usize), ConfigError> {
        self.validate()?;

        let (w, h) = (
            display_width / self.cell_size,
            display_height / self.cell_size,
        );

        if w == 0 || h == 0 {
            return Err(ConfigError::EmptyGrid {
                display_width,
                display_height,
                cell_size: self.cell_size,
            });
        }

        Ok((w, h))
    }
}

/// Parse `WxH`
fn parse_size(s: &str) -> anyhow::Result<(usize, usize)> {
    let Some((w, h)) = s.split_once(['x', 'X']) else {
        bail!("expected WIDTHxHEIGHT")
    };

    let w = w.trim().parse().context("Failed to parse width")?;
    let h = h.trim().parse().context("Failed to parse height")?;

    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::CommandFactory;
    use clap::Parser;
    use clap::error::ErrorKind;

    use super::Args;
    use super::Config;
    use super::ConfigError;

    fn args(s: &str) -> Vec<String> {
        std::iter::once("torus-life")
            .chain(s.split_whitespace())
            .map(String::from)
            .collect()
    }

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let config = Config::from_args(args("")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.display_size((80, 40)), (80, 40));
    }

    #[test]
    fn all_flags() {
        let parsed = Args::try_parse_from(args("--cell-size 20 --size 1024x768 --fps 30")).unwrap();
        assert_eq!(parsed.size, Some((1024, 768)));

        let config = Config::try_from(parsed).unwrap();

        assert_eq!(config.cell_size, 20);
        assert_eq!(config.display, Some((1024, 768)));
        assert_eq!(config.display_size((80, 40)), (1024, 768));
        assert_eq!(config.frame_time(), Duration::from_secs(1) / 30);
    }

    #[test]
    fn bad_flags() {
        let kind = |s: &str| Args::try_parse_from(args(s)).unwrap_err().kind();

        assert_eq!(kind("--cell-size"), ErrorKind::InvalidValue);
        assert_eq!(kind("--cell-size big"), ErrorKind::ValueValidation);
        assert_eq!(kind("--size 10by10"), ErrorKind::ValueValidation);
        assert_eq!(kind("--colour red"), ErrorKind::UnknownArgument);
        assert_eq!(kind("--help"), ErrorKind::DisplayHelp);

        let err = Config::from_args(args("--cell-size 0")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::ZeroCellSize)
        );

        let err = Config::from_args(args("--fps 0")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::ZeroFrameRate)
        );
    }

    #[test]
    fn validate() {
        assert_eq!(Config::default().validate(), Ok(()));

        let config = Config {
            frame_rate: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrameRate));
        assert_eq!(config.grid_dimensions(100, 100), Err(ConfigError::ZeroFrameRate));

        let config = Config {
            cell_size: 0,
            frame_rate: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCellSize));
    }

    #[test]
    #[should_panic]
    fn frame_time_needs_a_frame_rate() {
        let config = Config {
            frame_rate: 0,
            ..Config::default()
        };

        config.frame_time();
    }

    #[test]
    fn dimensions_round_down() {
        let config = Config {
            cell_size: 20,
            ..Config::default()
        };

        assert_eq!(config.grid_dimensions(1024, 768), Ok((51, 38)));
        assert_eq!(config.grid_dimensions(20, 20), Ok((1, 1)));
    }

    #[test]
    fn display_smaller_than_a_cell() {
        let config = Config {
            cell_size: 20,
            ..Config::default()
        };

        assert_eq!(
            config.grid_dimensions(19, 400),
            Err(ConfigError::EmptyGrid {
                display_width: 19,
                display_height: 400,
                cell_size: 20,
            })
        );

        let config = Config {
            cell_size: 0,
            ..Config::default()
        };

        assert_eq!(
            config.grid_dimensions(100, 100),
            Err(ConfigError::ZeroCellSize)
        );
    }
}
