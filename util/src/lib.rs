extern crate time;

use std::fmt;

use time::get_time;

/// Current timestamp in microseconds
pub fn ustime() -> i64 {
    let tv = get_time();
    tv.sec * 1000000 + (tv.nsec / 1000) as i64
}

/// Current timestamp in milliseconds
pub fn mstime() -> i64 {
    ustime() / 1000
}

fn is_print(c: u8) -> bool {
    c >= 0x20 && c < 0x7f
}

/// Writes `s` as a double-quoted string, escaping anything unprintable.
pub fn format_repr(f: &mut fmt::Formatter, s: &[u8]) -> Result<(), fmt::Error> {
    f.write_str("\"")?;
    for c in s {
        match *c as char {
            '\\' => f.write_str("\\\\"),
            '\"' => f.write_str("\\\""),
            '\n' => f.write_str("\\n"),
            '\r' => f.write_str("\\r"),
            '\t' => f.write_str("\\t"),
            x => {
                if is_print(*c) {
                    write!(f, "{}", x)
                } else {
                    write!(f, "\\x{:02x}", *c)
                }
            }
        }?
    }
    f.write_str("\"")
}
