//! Command stream parser
//!
//! The data file is a flat sequence of whitespace-separated tokens: a
//! command code followed by that command's fields. Line breaks carry no
//! meaning.
//!
//! - Codes outside 1..=10, and code tokens that are not integers, parse as
//!   `Command::Unknown`
//! - All field tokens of a command are consumed before any is parsed, so a
//!   bad field never shifts the following commands
//! - Input that ends inside a command yields `ParseError::UnexpectedEnd`

use std::collections::BTreeMap;
use std::str::{FromStr, SplitWhitespace};

use serde::Serialize;
use thiserror::Error;

use crate::ordering::OrderKind;
use crate::query::StatusFilter;

/// The five listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Code 2: all, insertion order
    General,
    /// Code 3: all, id order
    ById,
    /// Code 4: all, name order
    ByName,
    /// Code 5: available only, insertion order
    Available,
    /// Code 6: rented only, insertion order
    Rented,
}

impl Listing {
    pub fn order(&self) -> OrderKind {
        match self {
            Listing::ById => OrderKind::Id,
            Listing::ByName => OrderKind::Name,
            Listing::General | Listing::Available | Listing::Rented => OrderKind::Insertion,
        }
    }

    pub fn filter(&self) -> StatusFilter {
        match self {
            Listing::Available => StatusFilter::AvailableOnly,
            Listing::Rented => StatusFilter::RentedOnly,
            Listing::General | Listing::ById | Listing::ByName => StatusFilter::Any,
        }
    }

    /// Section banner printed after the records
    pub fn banner(&self) -> &'static str {
        match self {
            Listing::General => "^^^ GENERAL ^^^",
            Listing::ById => "^^^ SORTED BY ID ^^^",
            Listing::ByName => "^^^ SORTED ALPHABETICALLY ^^^",
            Listing::Available => "^^^ NOT RENTED ^^^",
            Listing::Rented => "^^^ RENTED ^^^",
        }
    }
}

/// One parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add {
        id: i64,
        size: i64,
        daily_rate: f64,
        manufacturer: String,
    },
    List(Listing),
    Rent {
        id: i64,
        days: f64,
        renter: String,
    },
    Return {
        id: i64,
        days: f64,
    },
    DeleteById(i64),
    DeleteByManufacturer(String),
    /// Unrecognised code token, kept verbatim
    Unknown(String),
}

impl Command {
    /// Numeric code, `None` for unknown commands
    pub fn code(&self) -> Option<u8> {
        match self {
            Command::Add { .. } => Some(1),
            Command::List(Listing::General) => Some(2),
            Command::List(Listing::ById) => Some(3),
            Command::List(Listing::ByName) => Some(4),
            Command::List(Listing::Available) => Some(5),
            Command::List(Listing::Rented) => Some(6),
            Command::Rent { .. } => Some(7),
            Command::Return { .. } => Some(8),
            Command::DeleteById(_) => Some(9),
            Command::DeleteByManufacturer(_) => Some(10),
            Command::Unknown(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Add { .. } => "add",
            Command::List(_) => "list",
            Command::Rent { .. } => "rent",
            Command::Return { .. } => "return",
            Command::DeleteById(_) => "delete_id",
            Command::DeleteByManufacturer(_) => "delete_manufacturer",
            Command::Unknown(_) => "unknown",
        }
    }
}

/// Parse failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{command} is missing its {field}")]
    UnexpectedEnd {
        command: &'static str,
        field: &'static str,
    },

    #[error("{command} has invalid {field} '{token}'")]
    InvalidField {
        command: &'static str,
        field: &'static str,
        token: String,
    },
}

impl ParseError {
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedEnd { .. } => "BIKE_INPUT_TRUNCATED",
            ParseError::InvalidField { .. } => "BIKE_MALFORMED_COMMAND",
        }
    }

    /// True if the input ended; nothing more can be parsed
    pub fn is_truncation(&self) -> bool {
        matches!(self, ParseError::UnexpectedEnd { .. })
    }
}

/// Tokenizer and command parser over a borrowed source
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: SplitWhitespace<'a>,
    consumed: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            tokens: source.split_whitespace(),
            consumed: 0,
        }
    }

    /// Tokens handed out so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    fn next_token(&mut self) -> Option<&'a str> {
        let token = self.tokens.next()?;
        self.consumed += 1;
        Some(token)
    }

    fn take<const N: usize>(
        &mut self,
        command: &'static str,
        fields: [&'static str; N],
    ) -> Result<[&'a str; N], ParseError> {
        let mut out = [""; N];
        for (slot, field) in out.iter_mut().zip(fields) {
            *slot = self
                .next_token()
                .ok_or(ParseError::UnexpectedEnd { command, field })?;
        }
        Ok(out)
    }

    /// Parses the next command; `None` once the source is exhausted.
    pub fn parse_next(&mut self) -> Option<Result<Command, ParseError>> {
        let code = self.next_token()?;
        Some(self.parse_command(code))
    }

    fn parse_command(&mut self, code: &'a str) -> Result<Command, ParseError> {
        let Ok(number) = code.parse::<i64>() else {
            return Ok(Command::Unknown(code.to_string()));
        };

        let command = match number {
            1 => {
                let [id, size, rate, manufacturer] =
                    self.take("add", ["id", "size", "daily rate", "manufacturer"])?;
                Command::Add {
                    id: parse_field("add", "id", id)?,
                    size: parse_field("add", "size", size)?,
                    daily_rate: parse_field("add", "daily rate", rate)?,
                    manufacturer: manufacturer.to_string(),
                }
            }
            2 => Command::List(Listing::General),
            3 => Command::List(Listing::ById),
            4 => Command::List(Listing::ByName),
            5 => Command::List(Listing::Available),
            6 => Command::List(Listing::Rented),
            7 => {
                let [id, days, first, last] =
                    self.take("rent", ["id", "duration", "first name", "last name"])?;
                Command::Rent {
                    id: parse_field("rent", "id", id)?,
                    days: parse_field("rent", "duration", days)?,
                    renter: format!("{} {}", first, last),
                }
            }
            8 => {
                let [id, days] = self.take("return", ["id", "duration"])?;
                Command::Return {
                    id: parse_field("return", "id", id)?,
                    days: parse_field("return", "duration", days)?,
                }
            }
            9 => {
                let [id] = self.take("delete_id", ["id"])?;
                Command::DeleteById(parse_field("delete_id", "id", id)?)
            }
            10 => {
                let [manufacturer] = self.take("delete_manufacturer", ["manufacturer"])?;
                Command::DeleteByManufacturer(manufacturer.to_string())
            }
            _ => Command::Unknown(code.to_string()),
        };
        Ok(command)
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Result<Command, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_next()
    }
}

fn parse_field<T: FromStr>(
    command: &'static str,
    field: &'static str,
    token: &str,
) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidField {
        command,
        field,
        token: token.to_string(),
    })
}

/// Command counts for a source, without applying anything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Parsed commands by name
    pub commands: BTreeMap<String, usize>,
    pub unknown: usize,
    pub malformed: usize,
    pub truncated: bool,
    pub tokens: usize,
}

/// Parses the whole source and counts what it contains.
pub fn scan(source: &str) -> ScanSummary {
    let mut stream = TokenStream::new(source);
    let mut summary = ScanSummary::default();

    while let Some(parsed) = stream.parse_next() {
        match parsed {
            Ok(Command::Unknown(_)) => summary.unknown += 1,
            Ok(command) => *summary.commands.entry(command.name().to_string()).or_default() += 1,
            Err(e) if e.is_truncation() => {
                summary.truncated = true;
                break;
            }
            Err(_) => summary.malformed += 1,
        }
    }

    summary.tokens = stream.consumed();
    summary
}
