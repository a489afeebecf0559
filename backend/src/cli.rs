//! Minimal CLI parsing.
//!
//! ```text
//! recipebook [serve]
//! recipebook create-user <username> <password>
//! ```

use std::env;

use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    /// Run the HTTP server
    #[default]
    Serve,
    /// Create a user, or reset the password of an existing one, then exit
    CreateUser { username: String, password: String },
}

#[derive(Debug, Default)]
pub struct CliOptions {
    pub command: Command,
}

impl CliOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse(env::args().skip(1))
    }

    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = args.into_iter();
        let command = match args.next().as_deref() {
            None | Some("serve") => Command::Serve,
            Some("create-user") => match (args.next(), args.next()) {
                (Some(username), Some(password)) => Command::CreateUser { username, password },
                _ => bail!("usage: recipebook create-user <username> <password>"),
            },
            Some(other) => bail!("unknown command '{}'; expected 'serve' or 'create-user'", other),
        };

        if let Some(extra) = args.next() {
            bail!("unexpected argument '{}'", extra);
        }

        Ok(Self { command })
    }
}
