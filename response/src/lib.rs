extern crate skiplist;

use std::error::Error;
use std::fmt;

use skiplist::Tower;

/// A command response to write to the output stream
#[derive(PartialEq, Debug)]
pub enum Response {
    /// No output
    Nil,
    /// The searched key is present
    Found(i64),
    /// The searched key is absent
    NotFound(i64),
    /// The key and its whole tower were removed
    Deleted(i64),
    /// The key to remove was absent
    NotDeleted(i64),
    /// Ordered dump of every tower, ascending by key
    Dump(Vec<Tower>),
    /// A line that could not be executed
    Error(String),
}

/// No response was issued
pub enum ResponseError {
    /// The command generated no response
    NoReply,
}

impl fmt::Debug for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ResponseError::NoReply => write!(f, "NoReply"),
        }
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ResponseError::NoReply => "No reply".fmt(f),
        }
    }
}

impl Error for ResponseError {
    fn description(&self) -> &str {
        match *self {
            ResponseError::NoReply => "No reply",
        }
    }
}

impl Response {
    /// Serializes the response into the report text. `Nil` renders nothing.
    /// `Error` also renders nothing here; its message goes to the
    /// diagnostic stream, not the report.
    pub fn as_bytes(&self) -> Vec<u8> {
        match *self {
            Response::Nil => Vec::new(),
            Response::Error(_) => Vec::new(),
            Response::Found(key) => format!("{} found\n", key).into_bytes(),
            Response::NotFound(key) => format!("{} NOT FOUND\n", key).into_bytes(),
            Response::Deleted(key) => format!("{} deleted\n", key).into_bytes(),
            Response::NotDeleted(key) => {
                format!("{} integer not found - delete not successful\n", key).into_bytes()
            }
            Response::Dump(ref towers) => {
                let mut out = String::new();
                out.push_str("the current Skip List is shown below:\n");
                out.push_str("---infinity\n");
                for tower in towers {
                    for _ in 0..tower.height {
                        out.push_str(&format!(" {}; ", tower.key));
                    }
                    out.push('\n');
                }
                out.push_str("+++infinity\n");
                out.push_str("---End of Skip List---\n");
                out.into_bytes()
            }
        }
    }

    /// Returns true if and only if the response is an error.
    pub fn is_error(&self) -> bool {
        match *self {
            Response::Error(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test_response {
    use super::{Response, ResponseError};
    use skiplist::Tower;

    fn text(response: Response) -> String {
        String::from_utf8(response.as_bytes()).unwrap()
    }

    #[test]
    fn no_reply_error_text() {
        assert_eq!(format!("{}", ResponseError::NoReply), "No reply");
        assert_eq!(format!("{:?}", ResponseError::NoReply), "NoReply");
    }

    #[test]
    fn nothing_to_say() {
        assert_eq!(Response::Nil.as_bytes(), b"");
        assert_eq!(Response::Error("oops".to_owned()).as_bytes(), b"");
        assert!(Response::Error("oops".to_owned()).is_error());
        assert!(!Response::Nil.is_error());
    }

    #[test]
    fn search_results() {
        assert_eq!(text(Response::Found(7)), "7 found\n");
        assert_eq!(text(Response::NotFound(7)), "7 NOT FOUND\n");
    }

    #[test]
    fn delete_results() {
        assert_eq!(text(Response::Deleted(-3)), "-3 deleted\n");
        assert_eq!(
            text(Response::NotDeleted(9)),
            "9 integer not found - delete not successful\n"
        );
    }

    #[test]
    fn dump_empty() {
        assert_eq!(
            text(Response::Dump(vec![])),
            concat!(
                "the current Skip List is shown below:\n",
                "---infinity\n",
                "+++infinity\n",
                "---End of Skip List---\n"
            )
        );
    }

    #[test]
    fn dump_towers() {
        let towers = vec![
            Tower { key: 2, height: 1 },
            Tower { key: 5, height: 3 },
        ];
        assert_eq!(
            text(Response::Dump(towers)),
            concat!(
                "the current Skip List is shown below:\n",
                "---infinity\n",
                " 2; \n",
                " 5;  5;  5; \n",
                "+++infinity\n",
                "---End of Skip List---\n"
            )
        );
    }
}
