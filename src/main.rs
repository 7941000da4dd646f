extern crate config;
#[macro_use(log)]
extern crate logger;
extern crate session;

use std::env::args;
use std::process::exit;

use config::Config;
use logger::{Level, Logger};
use session::Session;

fn main() {
    let logger = Logger::new_err(Level::Notice);
    let mut config = Config::new(logger.clone());
    match config.parse_args(args().skip(1).collect()) {
        Ok(_) => (),
        Err(err) => {
            log!(logger, Warning, "{}", err);
            logger.sync();
            exit(1);
        }
    }
    let input = config.input.clone();
    let mut session = Session::new(config);
    match session.run() {
        Ok(_) => (),
        Err(err) => {
            log!(logger, Warning, "Error reading {}: {}", input, err);
            logger.sync();
            exit(1);
        }
    }
}
