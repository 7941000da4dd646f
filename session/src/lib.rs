extern crate command;
extern crate config;
#[macro_use(log)]
extern crate logger;
extern crate parser;
extern crate rand;
extern crate response;
extern crate skiplist;

use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Write};

use command::command;
use config::Config;
use logger::Level;
use parser::parse;
use rand::{Rng, StdRng};
use response::{Response, ResponseError};
use skiplist::SkipList;

/// Runs a command file against a fresh index, writing results to an
/// output stream. Lines that cannot be executed go to the logger instead
/// and never interrupt the run.
pub struct Session<R: Rng> {
    config: Config,
    index: SkipList,
    rng: R,
}

impl Session<StdRng> {
    pub fn new(config: Config) -> Session<StdRng> {
        let rng = config.rng();
        Session::with_rng(config, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: Config, rng: R) -> Session<R> {
        Session {
            config: config,
            index: SkipList::new(),
            rng: rng,
        }
    }

    /// Opens the configured input file and executes it against the
    /// standard output. Waits for the logger to drain before returning so
    /// no diagnostic is lost when the process exits right after.
    pub fn run(&mut self) -> io::Result<()> {
        let file = File::open(&self.config.input)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let result = self.process(BufReader::new(file), &mut out);
        self.config.logger.sync();
        result
    }

    /// Executes every line of `input` in order. The function loops until
    /// the input is exhausted; an `Err` is only returned when the streams
    /// themselves fail.
    pub fn process<B: BufRead, W: Write>(&mut self, input: B, out: &mut W) -> io::Result<()> {
        writeln!(out, "For the input file named {}", self.config.input)?;
        if self.config.unseeded {
            writeln!(out, "With the RNG unseeded,")?;
        } else {
            writeln!(out, "With the RNG seeded,")?;
        }
        // raw byte lines: a line that is not UTF-8 is a malformed line,
        // not a stream failure, and must not end the run
        for (i, line) in input.split(b'\n').enumerate() {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let text = String::from_utf8_lossy(&line);
            let parsed = match parse(&line) {
                Ok(p) => p,
                Err(err) => {
                    if !err.is_empty_line() {
                        log!(self.config.logger, Warning, "line {} {:?}: {}", i + 1, text, err);
                    }
                    continue;
                }
            };
            match command(parsed, &mut self.index, &mut self.rng) {
                Ok(Response::Error(err)) => {
                    log!(self.config.logger, Warning, "line {} {:?}: {}", i + 1, text, err)
                }
                Ok(response) => out.write_all(&response.as_bytes())?,
                Err(ResponseError::NoReply) => (),
            }
        }
        Ok(())
    }
}
