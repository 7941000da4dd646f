use std::fmt::{Debug, Error, Formatter};
use std::io;
use std::io::{stderr, stdout, Write};
use std::iter::FromIterator;
use std::sync::mpsc::{channel, Sender};
use std::thread;

/// Macro to log a message. Uses the `format!` syntax.
/// See `std::fmt` for more information.
///
/// # Examples
///
/// ```
/// # #[macro_use(log)]
/// # extern crate logger;
/// # use logger::{Logger, Level};
/// #
/// # fn main() {
/// # let logger = Logger::new(Level::Warning);
/// log!(logger, Debug, "hello {}", "world");
/// # }
/// ```
#[macro_export]
macro_rules! log {
    ($logger: expr, $level: ident, $($arg:tt)*) => ({
        $logger.log(Level::$level, format!($($arg)*))
    })
}

enum Output {
    /// Sends logs to a channel
    Channel(Sender<Vec<u8>>),
    /// Writes to the standard output
    Stdout,
    /// Writes to the standard error
    Stderr,
}

impl Debug for Output {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), Error> {
        match *self {
            Output::Channel(_) => fmt.write_str("Channel"),
            Output::Stderr => fmt.write_str("Stderr"),
            Output::Stdout => fmt.write_str("Stdout"),
        }
    }
}

impl Write for Output {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        match *self {
            Output::Channel(ref v) => {
                v.send(Vec::from_iter(data.iter().cloned())).unwrap();
                Ok(data.len())
            }
            Output::Stderr => stderr().write(data),
            Output::Stdout => stdout().write(data),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match *self {
            Output::Channel(_) => Ok(()),
            Output::Stderr => stderr().flush(),
            Output::Stdout => stdout().flush(),
        }
    }
}

impl Clone for Output {
    fn clone(&self) -> Self {
        match *self {
            Output::Channel(ref v) => Output::Channel(v.clone()),
            Output::Stderr => Output::Stderr,
            Output::Stdout => Output::Stdout,
        }
    }
}

/// A level that identifies a log message.
/// A lower level includes all higher levels.
#[derive(PartialEq, Clone, Debug)]
pub enum Level {
    Debug,
    Verbose,
    Notice,
    Warning,
}

impl Level {
    /// Whether the level is equal or lower than another level.
    /// For example, `Debug` includes all other levels, while `Warning` only
    /// includes itself.
    ///
    /// # Examples
    ///
    /// ```
    /// # use logger::Level;
    /// #
    /// assert!(Level::Debug.contains(&Level::Debug));
    /// assert!(!Level::Warning.contains(&Level::Debug));
    /// assert!(Level::Debug.contains(&Level::Warning));
    /// ```
    pub fn contains(&self, other: &Level) -> bool {
        match *self {
            Level::Debug => true,
            Level::Verbose => *other != Level::Debug,
            Level::Notice => *other == Level::Notice || *other == Level::Warning,
            Level::Warning => *other == Level::Warning,
        }
    }
}

enum Message {
    /// A log line and its severity
    Log(Level, String),
    /// Changes the minimum severity to write
    SetLevel(Level),
    /// Acknowledges that every earlier message was handled
    Sync(Sender<()>),
}

#[derive(Clone)]
pub struct Logger {
    tx: Sender<Message>,
}

impl Logger {
    /// Creates a new `Logger` for a given `Output` and severity `Level`.
    /// Messages are written from a background thread so callers never block
    /// on the sink.
    fn create(level: Level, output: Output) -> Logger {
        let (tx, rx) = channel::<Message>();
        {
            let mut level = level;
            let mut output = output;
            thread::spawn(move || loop {
                match rx.recv() {
                    Ok(Message::Log(lvl, msg)) => {
                        if level.contains(&lvl) {
                            match write!(output, "{}", format!("{}\n", msg)) {
                                Ok(_) => (),
                                Err(e) => {
                                    // failing to log a message... will write straight to stderr
                                    // if we cannot do that, we'll panic
                                    write!(stderr(), "Failed to log {:?} {}", e, msg).unwrap();
                                }
                            };
                        }
                    }
                    Ok(Message::SetLevel(l)) => level = l,
                    Ok(Message::Sync(ack)) => match ack.send(()) {
                        _ => (),
                    },
                    Err(_) => break,
                }
            });
        }

        Logger { tx: tx }
    }

    /// Creates a new logger that writes in the standard output.
    ///
    /// # Examples
    /// ```
    /// # use logger::{Logger, Level};
    /// #
    /// let logger = Logger::new(Level::Warning);
    /// logger.log(Level::Warning, "hello world".to_owned());
    /// ```
    pub fn new(level: Level) -> Self {
        Self::create(level, Output::Stdout)
    }

    /// Creates a new logger that writes in the standard error.
    ///
    /// # Examples
    /// ```
    /// # use logger::{Logger, Level};
    /// #
    /// let logger = Logger::new_err(Level::Warning);
    /// logger.log(Level::Warning, "hello world".to_owned());
    /// ```
    pub fn new_err(level: Level) -> Self {
        Self::create(level, Output::Stderr)
    }

    /// Creates a new logger that sends log messages to `s`.
    ///
    /// # Examples
    /// ```
    /// # use logger::{Logger, Level};
    /// # use std::sync::mpsc::channel;
    /// #
    /// let (tx, rx) = channel();
    /// let logger = Logger::channel(Level::Debug, tx);
    /// logger.log(Level::Debug, "hello world".to_owned());
    /// assert_eq!(rx.recv().unwrap(), b"hello world\n".to_vec());
    /// ```
    pub fn channel(level: Level, s: Sender<Vec<u8>>) -> Self {
        Self::create(level, Output::Channel(s))
    }

    /// Changes the log level.
    pub fn set_loglevel(&mut self, level: Level) {
        self.tx.send(Message::SetLevel(level)).unwrap();
    }

    /// Logs a message with a log level.
    pub fn log(&self, level: Level, msg: String) {
        self.tx.send(Message::Log(level, msg)).unwrap();
    }

    /// Blocks until every message sent before this call was written out.
    /// Short lived programs must call it before exiting or late messages
    /// may be lost with the writer thread.
    pub fn sync(&self) {
        let (tx, rx) = channel();
        if self.tx.send(Message::Sync(tx)).is_ok() {
            match rx.recv() {
                _ => (),
            }
        }
    }
}
