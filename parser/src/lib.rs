extern crate util;

use std::error::Error;
use std::fmt;
use std::num::ParseIntError;
use std::str::{from_utf8, Utf8Error};

use util::format_repr;

/// A command argument
#[derive(Debug, Clone)]
pub struct Argument {
    /// The position in the line
    pub pos: usize,
    /// The length in the line
    pub len: usize,
}

/// One parsed command line
pub struct ParsedCommand<'a> {
    /// The line itself
    data: &'a [u8],
    /// The arguments location and length
    pub argv: Vec<Argument>,
}

/// Error parsing
#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// The line contains no tokens
    EmptyLine,
    /// Expected one type of argument and received another
    InvalidArgument,
}

impl ParseError {
    pub fn is_empty_line(&self) -> bool {
        match *self {
            ParseError::EmptyLine => true,
            _ => false,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::EmptyLine => "Empty line".fmt(f),
            ParseError::InvalidArgument => "Invalid argument".fmt(f),
        }
    }
}

impl Error for ParseError {
    fn description(&self) -> &str {
        match *self {
            ParseError::EmptyLine => "Empty line",
            ParseError::InvalidArgument => "Invalid argument",
        }
    }
}

impl From<Utf8Error> for ParseError {
    fn from(_: Utf8Error) -> ParseError {
        ParseError::InvalidArgument
    }
}

impl From<ParseIntError> for ParseError {
    fn from(_: ParseIntError) -> ParseError {
        ParseError::InvalidArgument
    }
}

impl<'a> ParsedCommand<'a> {
    /// Creates a new parser with the data and arguments provided
    pub fn new(data: &[u8], argv: Vec<Argument>) -> ParsedCommand {
        ParsedCommand {
            data: data,
            argv: argv,
        }
    }

    /// Gets an i64 from a parameter
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::{Argument, ParsedCommand};
    /// let parser = ParsedCommand::new(b"-123", vec![Argument { pos: 0, len: 4 }]);
    /// assert_eq!(parser.get_i64(0).unwrap(), -123);
    /// ```
    pub fn get_i64(&self, pos: usize) -> Result<i64, ParseError> {
        let s = self.get_str(pos)?;

        Ok(s.parse::<i64>()?)
    }

    /// Gets an str from a parameter
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::{Argument, ParsedCommand};
    /// let parser = ParsedCommand::new(b"foo", vec![Argument { pos: 0, len: 3 }]);
    /// assert_eq!(parser.get_str(0).unwrap(), "foo");
    /// ```
    pub fn get_str(&self, pos: usize) -> Result<&str, ParseError> {
        let data = self.get_slice(pos)?;
        Ok(from_utf8(data)?)
    }

    /// Gets a &[u8] from a parameter
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::{Argument, ParsedCommand};
    /// let parser = ParsedCommand::new(b"foo", vec![Argument { pos: 0, len: 3 }]);
    /// assert_eq!(parser.get_slice(0).unwrap(), b"foo");
    /// ```
    pub fn get_slice(&self, pos: usize) -> Result<&[u8], ParseError> {
        if pos >= self.argv.len() {
            return Err(ParseError::InvalidArgument);
        }
        let arg = &self.argv[pos];
        Ok(&self.data[arg.pos..arg.pos + arg.len])
    }
}

impl<'a> fmt::Debug for ParsedCommand<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        format_repr(f, self.data)
    }
}

/// Splits one command line into space-separated tokens. Every single space
/// is a separator, so consecutive spaces produce empty tokens; lines with
/// nothing but spaces are reported as `EmptyLine`.
///
/// # Examples
///
/// ```
/// # use parser::parse;
/// let line = b"i 24";
/// let command = parse(line).unwrap();
/// assert_eq!(command.argv.len(), 2);
/// assert_eq!(command.get_str(0).unwrap(), "i");
/// assert_eq!(command.get_i64(1).unwrap(), 24);
/// ```
pub fn parse(input: &[u8]) -> Result<ParsedCommand, ParseError> {
    if input.iter().all(|c| *c == b' ') {
        return Err(ParseError::EmptyLine);
    }
    let mut argv = Vec::new();
    let mut pos = 0;
    for token in input.split(|c| *c == b' ') {
        argv.push(Argument {
            pos: pos,
            len: token.len(),
        });
        pos += token.len() + 1;
    }
    Ok(ParsedCommand::new(input, argv))
}

#[cfg(test)]
mod test_parser {
    use super::{parse, ParseError};

    #[test]
    fn parse_valid() {
        let command = parse(b"i 24").unwrap();
        assert_eq!(command.argv.len(), 2);
        assert_eq!(command.get_str(0).unwrap(), "i");
        assert_eq!(command.get_str(1).unwrap(), "24");
        assert_eq!(command.get_i64(1).unwrap(), 24);
    }

    #[test]
    fn parse_single_token() {
        let command = parse(b"p").unwrap();
        assert_eq!(command.argv.len(), 1);
        assert_eq!(command.get_str(0).unwrap(), "p");
    }

    #[test]
    fn parse_negative_argument() {
        let command = parse(b"s -7").unwrap();
        assert_eq!(command.get_i64(1).unwrap(), -7);
    }

    #[test]
    fn parse_empty_line() {
        assert_eq!(parse(b"").unwrap_err(), ParseError::EmptyLine);
        assert_eq!(parse(b"   ").unwrap_err(), ParseError::EmptyLine);
        assert!(parse(b"").unwrap_err().is_empty_line());
    }

    #[test]
    fn parse_double_space_keeps_empty_token() {
        let command = parse(b"i  24").unwrap();
        assert_eq!(command.argv.len(), 3);
        assert_eq!(command.get_str(1).unwrap(), "");
        assert_eq!(command.get_i64(1).unwrap_err(), ParseError::InvalidArgument);
        assert_eq!(command.get_str(2).unwrap(), "24");
    }

    #[test]
    fn get_i64_rejects_noninteger() {
        let command = parse(b"i five").unwrap();
        assert_eq!(command.get_i64(1).unwrap_err(), ParseError::InvalidArgument);
    }

    #[test]
    fn get_missing_argument() {
        let command = parse(b"i").unwrap();
        assert_eq!(command.get_str(1).unwrap_err(), ParseError::InvalidArgument);
        assert_eq!(command.get_i64(1).unwrap_err(), ParseError::InvalidArgument);
    }

    #[test]
    fn get_str_rejects_invalid_utf8() {
        let command = parse(&[b's', b' ', 0xffu8]).unwrap();
        assert_eq!(command.get_str(1).unwrap_err(), ParseError::InvalidArgument);
    }

    #[test]
    fn debug_repr() {
        let command = parse(b"i 24").unwrap();
        assert_eq!(format!("{:?}", command), "\"i 24\"");
    }
}
