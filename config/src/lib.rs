extern crate logger;
extern crate rand;
extern crate util;

use std::error::Error;
use std::fmt;

use logger::{Level, Logger};
use rand::{SeedableRng, StdRng};
use util::ustime;

/// Seed used for reproducible runs.
pub const DEFAULT_SEED: usize = 42;

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MissingInput,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::MissingInput => write!(f, "Input file not specified!, try again"),
        }
    }
}

impl Error for ConfigError {
    fn description(&self) -> &str {
        match *self {
            ConfigError::MissingInput => "input file not specified",
        }
    }
}

pub struct Config {
    /// Path of the command file to execute.
    pub input: String,
    /// When true, the generator is seeded from the clock instead of
    /// `DEFAULT_SEED` and runs are no longer reproducible.
    pub unseeded: bool,
    pub logger: Logger,
}

impl Config {
    pub fn new(logger: Logger) -> Config {
        Config {
            input: String::new(),
            unseeded: false,
            logger: logger,
        }
    }

    pub fn mock() -> Config {
        Config::new(Logger::new(Level::Warning))
    }

    /// Reads the command line arguments, program name already stripped.
    /// The first argument is the input file and is mandatory. Any second
    /// argument, whatever its value, switches to clock seeding. Further
    /// arguments are ignored.
    pub fn parse_args(&mut self, args: Vec<String>) -> Result<(), ConfigError> {
        let mut args = args;
        if args.is_empty() {
            return Err(ConfigError::MissingInput);
        }
        self.unseeded = args.len() > 1;
        self.input = args.remove(0);
        Ok(())
    }

    /// Creates the generator that decides tower promotions.
    pub fn rng(&self) -> StdRng {
        let seed = if self.unseeded {
            ustime() as usize
        } else {
            DEFAULT_SEED
        };
        let seed: &[_] = &[seed];
        SeedableRng::from_seed(seed)
    }
}
