use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use miette::{Context, IntoDiagnostic};
use serde::{Deserialize, Serialize};
use tracing::{Level, debug};

use crate::{
    board::{Board, layout::Layout},
    utils::prng::Prng,
};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "bitchess.toml";

/// Settings read from `bitchess.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout keyword for new boards
    pub layout: String,
    /// One of trace, debug, info, warn, error. Unset leaves `RUST_LOG` in charge.
    pub log_level: Option<String>,
    pub file_logging: bool,
    /// Seed for the `randompawns` layout; the clock is used when absent
    pub random_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: Layout::Classic.keyword().to_string(),
            log_level: None,
            file_logging: false,
            random_seed: None,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> miette::Result<Self> {
        let path = path.as_ref();
        let file_content = fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("Reading config {}", path.display()))?;
        let config: Self = toml::from_str(&file_content)
            .into_diagnostic()
            .with_context(|| format!("Parsing config {}", path.display()))?;
        // Reject bad values now rather than at first use
        config.layout()?;
        config.level()?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> miette::Result<()> {
        let toml_string = toml::to_string_pretty(self).into_diagnostic()?;
        fs::write(path, toml_string).into_diagnostic()?;
        Ok(())
    }

    /// An explicit path must exist. Without one, `bitchess.toml` is used if present
    /// and defaults otherwise.
    pub fn discover(explicit: Option<&Path>) -> miette::Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load_from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn layout(&self) -> miette::Result<Layout> {
        Ok(Layout::from_str(&self.layout)?)
    }

    /// The level set in the file, if any.
    pub fn level(&self) -> miette::Result<Option<Level>> {
        self.log_level.as_deref().map(parse_level).transpose()
    }

    /// Console level to install: the `--log-level` flag wins over the file.
    /// `None` means keep the filter built from `RUST_LOG` at startup.
    pub fn effective_level(&self, flag: Option<&str>) -> miette::Result<Option<Level>> {
        match flag {
            Some(level) => parse_level(level).map(Some),
            None => self.level(),
        }
    }

    pub fn prng(&self) -> Prng {
        self.random_seed.map_or_else(Prng::from_clock, Prng::init)
    }

    /// A fresh board in the configured layout.
    pub fn board(&self) -> miette::Result<Board> {
        Ok(self.board_for(self.layout()?))
    }

    /// A fresh board in `layout`, drawing random layouts from the configured seed.
    pub fn board_for(&self, layout: Layout) -> Board {
        match layout {
            Layout::RandomPawns => Board::random_pawns(&mut self.prng()),
            fixed => Board::new(fixed),
        }
    }
}

pub fn parse_level(level: &str) -> miette::Result<Level> {
    Level::from_str(level)
        .into_diagnostic()
        .with_context(|| format!("Unknown log level {level:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("layout = \"slide\"").unwrap();
        assert_eq!(config.layout().unwrap(), Layout::Slide);
        assert_eq!(config.level().unwrap(), None);
        assert!(!config.file_logging);
        assert_eq!(config.random_seed, None);
    }

    #[test]
    fn test_seeded_random_board_is_stable() {
        let config = Config {
            layout: "randompawns".into(),
            random_seed: Some(99),
            ..Default::default()
        };
        assert_eq!(config.board().unwrap(), config.board().unwrap());
    }

    #[test]
    fn test_round_trip_and_rejects_bad_values() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("bitchess_config_{}.toml", std::process::id()));
        let config = Config {
            layout: "pawns".into(),
            log_level: Some("debug".into()),
            file_logging: true,
            random_seed: Some(5),
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), config);

        fs::write(&path, "layout = \"checkers\"").unwrap();
        assert!(Config::load_from_file(&path).is_err());
        fs::write(&path, "log_level = \"loud\"").unwrap();
        assert!(Config::load_from_file(&path).is_err());
        let _ = fs::remove_file(&path);

        assert!(Config::discover(Some(Path::new("/nonexistent/bitchess.toml"))).is_err());
    }

    #[test]
    fn test_effective_level_precedence() {
        let unset = Config::default();
        // Neither flag nor file: the RUST_LOG filter stays
        assert_eq!(unset.effective_level(None).unwrap(), None);
        assert_eq!(unset.effective_level(Some("warn")).unwrap(), Some(Level::WARN));

        let from_file = Config {
            log_level: Some("debug".into()),
            ..Default::default()
        };
        assert_eq!(from_file.effective_level(None).unwrap(), Some(Level::DEBUG));
        assert_eq!(from_file.effective_level(Some("error")).unwrap(), Some(Level::ERROR));
        assert!(from_file.effective_level(Some("loud")).is_err());

        let round_trip: Config = toml::from_str(&toml::to_string_pretty(&unset).unwrap()).unwrap();
        assert_eq!(round_trip.log_level, None);
    }
}
