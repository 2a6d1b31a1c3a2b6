//! Text command parser using nom
//!
//! One command per line:
//! ```text
//! PUT user:1 "Ada Lovelace"
//! GET user:1
//! # comments and blank lines are skipped
//! ```
//!
//! Tokens are separated by whitespace. A token wrapped in double quotes may
//! contain spaces; `\"` and `\\` escape inside quotes. Any other backslash
//! is kept as is, so `"C:\dir"` reads as `C:\dir`.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map, value},
    multi::{fold_many0, separated_list0},
    sequence::delimited,
    IResult,
};

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// PUT key value
    Put {
        /// Key to write
        key: String,
        /// Value to store
        value: String,
    },
    /// GET key
    Get(String),
    /// PEEK key (no recency update)
    Peek(String),
    /// DEL key
    Del(String),
    /// EXISTS key
    Exists(String),
    /// LEN
    Len,
    /// KEYS
    Keys,
    /// CLEAR
    Clear,
    /// STATS
    Stats,
    /// PING
    Ping,
    /// HELP
    Help,
    /// QUIT / EXIT
    Quit,
}

/// Usage lines shown by HELP
pub const HELP: &[&str] = &[
    "PUT key value   store a value (evicts the LRU entry when full)",
    "GET key         read a value and mark it most recently used",
    "PEEK key        read a value without changing recency",
    "DEL key         remove a key",
    "EXISTS key      check for a key without changing recency",
    "LEN             number of cached entries",
    "KEYS            keys, most recently used first",
    "CLEAR           drop all entries and reset stats",
    "STATS           hit/miss/eviction counters",
    "PING            liveness check",
    "QUIT            leave the shell",
];

/// Parse one input line
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (_, tokens) =
        tokenize(trimmed).map_err(|_| "ERR malformed input (check quoting)".to_string())?;

    let (verb, args) = match tokens.split_first() {
        Some((verb, args)) => (verb.to_uppercase(), args),
        None => return Ok(None),
    };

    let cmd = match (verb.as_str(), args) {
        ("PUT" | "SET", [key, value]) => Command::Put {
            key: key.clone(),
            value: value.clone(),
        },
        ("GET", [key]) => Command::Get(key.clone()),
        ("PEEK", [key]) => Command::Peek(key.clone()),
        ("DEL", [key]) => Command::Del(key.clone()),
        ("EXISTS", [key]) => Command::Exists(key.clone()),
        ("LEN", []) => Command::Len,
        ("KEYS", []) => Command::Keys,
        ("CLEAR", []) => Command::Clear,
        ("STATS", []) => Command::Stats,
        ("PING", []) => Command::Ping,
        ("HELP", []) => Command::Help,
        ("QUIT" | "EXIT", []) => Command::Quit,
        (
            "PUT" | "SET" | "GET" | "PEEK" | "DEL" | "EXISTS" | "LEN" | "KEYS" | "CLEAR"
            | "STATS" | "PING" | "HELP" | "QUIT" | "EXIT",
            _,
        ) => {
            return Err(format!(
                "ERR wrong number of arguments for '{}' command",
                verb.to_lowercase()
            ))
        }
        _ => return Err(format!("ERR unknown command '{}'", verb)),
    };

    Ok(Some(cmd))
}

fn tokenize(input: &str) -> IResult<&str, Vec<String>> {
    all_consuming(delimited(
        multispace0,
        separated_list0(multispace1, token),
        multispace0,
    ))(input)
}

fn token(input: &str) -> IResult<&str, String> {
    alt((quoted, map(is_not(" \t\r\n\""), String::from)))(input)
}

fn quoted(input: &str) -> IResult<&str, String> {
    let piece = alt((
        is_not("\\\""),
        value("\"", tag("\\\"")),
        value("\\", tag("\\\\")),
        tag("\\"),
    ));
    let inner = fold_many0(piece, String::new, |mut acc, s: &str| {
        acc.push_str(s);
        acc
    });
    delimited(char('"'), inner, char('"'))(input)
}
