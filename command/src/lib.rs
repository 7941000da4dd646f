extern crate parser;
extern crate rand;
extern crate response;
extern crate skiplist;

use rand::Rng;

use parser::ParsedCommand;
use response::{Response, ResponseError};
use skiplist::SkipList;

macro_rules! validate_arguments_exact {
    ($parser: expr, $expected: expr) => {
        if $parser.argv.len() != $expected {
            return Response::Error(format!(
                "wrong number of arguments for '{}' command",
                $parser.get_str(0).unwrap()
            ));
        }
    };
}

macro_rules! try_validate {
    ($expr: expr, $err: expr) => {{
        match $expr {
            Ok(r) => r,
            Err(_) => return Response::Error($err.to_string()),
        }
    }};
}

macro_rules! try_opt_validate {
    ($expr: expr, $err: expr) => {{
        match $expr {
            Ok(r) => r,
            Err(_) => return Ok(Response::Error($err.to_string())),
        }
    }};
}

fn insert<R: Rng>(parser: &ParsedCommand, index: &mut SkipList, rng: &mut R) -> Response {
    validate_arguments_exact!(parser, 2);
    let key = try_validate!(parser.get_i64(1), "Invalid key");
    match index.insert(key, rng) {
        // an already present key is a silent no-op, same as a fresh insert
        Ok(_) => Response::Nil,
        Err(err) => Response::Error(err.to_string()),
    }
}

fn search(parser: &ParsedCommand, index: &SkipList) -> Response {
    validate_arguments_exact!(parser, 2);
    let key = try_validate!(parser.get_i64(1), "Invalid key");
    if index.contains(key) {
        Response::Found(key)
    } else {
        Response::NotFound(key)
    }
}

fn delete(parser: &ParsedCommand, index: &mut SkipList) -> Response {
    validate_arguments_exact!(parser, 2);
    let key = try_validate!(parser.get_i64(1), "Invalid key");
    if index.remove(key) {
        Response::Deleted(key)
    } else {
        Response::NotDeleted(key)
    }
}

fn print(parser: &ParsedCommand, index: &SkipList) -> Response {
    validate_arguments_exact!(parser, 1);
    Response::Dump(index.snapshot())
}

/// Executes one parsed command line against the index. The generator is
/// only drawn from by inserts, one draw per promotion attempt, so a fixed
/// seed makes a whole command sequence reproducible.
pub fn command<R: Rng>(
    parser: ParsedCommand,
    index: &mut SkipList,
    rng: &mut R,
) -> Result<Response, ResponseError> {
    if parser.argv.is_empty() {
        return Err(ResponseError::NoReply);
    }
    let command_name = try_opt_validate!(parser.get_str(0), "Invalid command");
    Ok(match command_name {
        "i" => insert(&parser, index, rng),
        "s" => search(&parser, index),
        "d" => delete(&parser, index),
        "p" => print(&parser, index),
        cmd => Response::Error(format!("unknown command \"{}\"", cmd)),
    })
}

#[cfg(test)]
mod test_command {
    use rand::Rng;

    use parser::{Argument, ParsedCommand};
    use response::{Response, ResponseError};
    use skiplist::{SkipList, Tower, POS_INF};

    use super::command;

    macro_rules! parser {
        ($str: expr) => {{
            let mut _args = Vec::new();
            let mut pos = 0;
            for segment in $str.split(|x| *x == b' ') {
                _args.push(Argument {
                    pos: pos,
                    len: segment.len(),
                });
                pos += segment.len() + 1;
            }
            ParsedCommand::new($str, _args)
        }};
    }

    /// Plays back a fixed promotion script, then keeps answering "even".
    struct Coins(Vec<u32>);

    impl Rng for Coins {
        fn next_u32(&mut self) -> u32 {
            if self.0.is_empty() {
                0
            } else {
                self.0.remove(0)
            }
        }
    }

    fn flat() -> Coins {
        Coins(Vec::new())
    }

    #[test]
    fn nocommand() {
        let mut index = SkipList::new();
        let parser = ParsedCommand::new(b"", Vec::new());
        let err = command(parser, &mut index, &mut flat()).unwrap_err();
        match err {
            ResponseError::NoReply => {}
        };
    }

    #[test]
    fn insert_command() {
        let mut index = SkipList::new();
        assert_eq!(
            command(parser!(b"i 5"), &mut index, &mut flat()).unwrap(),
            Response::Nil
        );
        assert!(index.contains(5));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn insert_duplicate_is_silent() {
        let mut index = SkipList::new();
        command(parser!(b"i 5"), &mut index, &mut flat()).unwrap();
        assert_eq!(
            command(parser!(b"i 5"), &mut index, &mut flat()).unwrap(),
            Response::Nil
        );
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn insert_negative_key() {
        let mut index = SkipList::new();
        assert_eq!(
            command(parser!(b"i -42"), &mut index, &mut flat()).unwrap(),
            Response::Nil
        );
        assert!(index.contains(-42));
    }

    #[test]
    fn insert_sentinel_value_flagged() {
        let mut index = SkipList::new();
        let response = command(parser!(b"i 100000000"), &mut index, &mut flat()).unwrap();
        assert!(response.is_error());
        assert!(index.is_empty());
        assert!(!index.contains(POS_INF));
    }

    #[test]
    fn search_command() {
        let mut index = SkipList::new();
        assert_eq!(
            command(parser!(b"s 2"), &mut index, &mut flat()).unwrap(),
            Response::NotFound(2)
        );
        command(parser!(b"i 2"), &mut index, &mut flat()).unwrap();
        assert_eq!(
            command(parser!(b"s 2"), &mut index, &mut flat()).unwrap(),
            Response::Found(2)
        );
    }

    #[test]
    fn delete_command() {
        let mut index = SkipList::new();
        assert_eq!(
            command(parser!(b"d 9"), &mut index, &mut flat()).unwrap(),
            Response::NotDeleted(9)
        );
        command(parser!(b"i 9"), &mut index, &mut Coins(vec![1, 1])).unwrap();
        assert_eq!(
            command(parser!(b"d 9"), &mut index, &mut flat()).unwrap(),
            Response::Deleted(9)
        );
        assert!(!index.contains(9));
        assert_eq!(
            command(parser!(b"s 9"), &mut index, &mut flat()).unwrap(),
            Response::NotFound(9)
        );
    }

    #[test]
    fn print_command() {
        let mut index = SkipList::new();
        assert_eq!(
            command(parser!(b"p"), &mut index, &mut flat()).unwrap(),
            Response::Dump(vec![])
        );
        command(parser!(b"i 8"), &mut index, &mut flat()).unwrap();
        command(parser!(b"i 2"), &mut index, &mut Coins(vec![1])).unwrap();
        assert_eq!(
            command(parser!(b"p"), &mut index, &mut flat()).unwrap(),
            Response::Dump(vec![
                Tower { key: 2, height: 2 },
                Tower { key: 8, height: 1 },
            ])
        );
    }

    #[test]
    fn unknown_command() {
        let mut index = SkipList::new();
        let response = command(parser!(b"x 5"), &mut index, &mut flat()).unwrap();
        assert_eq!(
            response,
            Response::Error("unknown command \"x\"".to_owned())
        );
        assert!(index.is_empty());
    }

    #[test]
    fn wrong_number_of_arguments() {
        let mut index = SkipList::new();
        assert!(command(parser!(b"i"), &mut index, &mut flat())
            .unwrap()
            .is_error());
        assert!(command(parser!(b"i 1 2"), &mut index, &mut flat())
            .unwrap()
            .is_error());
        assert!(command(parser!(b"s"), &mut index, &mut flat())
            .unwrap()
            .is_error());
        assert!(command(parser!(b"p 1"), &mut index, &mut flat())
            .unwrap()
            .is_error());
        assert!(index.is_empty());
    }

    #[test]
    fn noninteger_key() {
        let mut index = SkipList::new();
        assert_eq!(
            command(parser!(b"i five"), &mut index, &mut flat()).unwrap(),
            Response::Error("Invalid key".to_owned())
        );
        assert!(index.is_empty());
    }
}
