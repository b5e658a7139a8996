//! The `:` command line.
//!
//! A line is split on single spaces; the first token, lower-cased, names the
//! command and the rest are its arguments. The set of commands is fixed.

mod dispatcher;

pub use dispatcher::{CommandDispatcher, CommandOutcome};

use crate::error::{Error, Result};
use crate::state::OptionKind;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `follow <symbol>`
    Follow { symbol: String },
    /// `unfollow <identifier>`
    Unfollow { identifier: String },
    /// `followcall|followput <symbol> <expiry> <strike>`
    FollowOption {
        underlying: String,
        expiry: NaiveDate,
        strike: Decimal,
        kind: OptionKind,
    },
    /// `refresh`
    Refresh,
    /// `exit`
    Exit,
    /// Anything else, including the empty line.
    Unknown(String),
}

impl Command {
    /// Parse a typed line.
    ///
    /// Unrecognised names parse to [`Command::Unknown`]; a recognised name
    /// with bad arguments is an [`Error::Parse`].
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split(' ');
        let name = tokens.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = tokens.collect();

        match name.as_str() {
            "follow" => {
                let [symbol] = expect_args::<1>(&name, &args, "<symbol>")?;
                Ok(Self::Follow {
                    symbol: symbol.to_string(),
                })
            }
            "unfollow" => {
                let [identifier] = expect_args::<1>(&name, &args, "<identifier>")?;
                Ok(Self::Unfollow {
                    identifier: identifier.to_string(),
                })
            }
            "followcall" => parse_option(&name, &args, OptionKind::Call),
            "followput" => parse_option(&name, &args, OptionKind::Put),
            "refresh" => {
                expect_args::<0>(&name, &args, "")?;
                Ok(Self::Refresh)
            }
            "exit" => Ok(Self::Exit),
            _ => Ok(Self::Unknown(name)),
        }
    }

    /// The command's name as typed (lower-cased).
    pub fn name(&self) -> &str {
        match self {
            Self::Follow { .. } => "follow",
            Self::Unfollow { .. } => "unfollow",
            Self::FollowOption {
                kind: OptionKind::Call,
                ..
            } => "followcall",
            Self::FollowOption {
                kind: OptionKind::Put,
                ..
            } => "followput",
            Self::Refresh => "refresh",
            Self::Exit => "exit",
            Self::Unknown(name) => name,
        }
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_option(name: &str, args: &[&str], kind: OptionKind) -> Result<Command> {
    let [underlying, expiry, strike] =
        expect_args::<3>(name, args, "<symbol> <YYYY-MM-DD> <strike>")?;

    let expiry = NaiveDate::parse_from_str(expiry, "%Y-%m-%d")
        .map_err(|_| Error::parse(format!("{}: invalid expiry date '{}'", name, expiry)))?;
    let strike = Decimal::from_str(strike)
        .map_err(|_| Error::parse(format!("{}: invalid strike '{}'", name, strike)))?;

    Ok(Command::FollowOption {
        underlying: underlying.to_string(),
        expiry,
        strike,
        kind,
    })
}

fn expect_args<'a, const N: usize>(
    name: &str,
    args: &[&'a str],
    usage: &str,
) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| {
        Error::parse(format!("usage: {} {}", name, usage).trim_end().to_string())
    })
}
