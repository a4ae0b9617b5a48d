//! The email record flowing through the pipeline, plus its line-oriented
//! stream format.
//!
//! An email is serialized as three consecutive lines: sender, recipient,
//! body. Three lines read from a stream form one record; a stream that
//! ends partway through a group yields no record for that group.

use std::io::{self, BufRead, Write};

/// A sender/recipient/body triple, the unit of work in a pipeline.
///
/// Ownership transfers strictly forward through the chain; stages that
/// need a variant of an email derive a copy rather than sharing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub sender: String,
    pub recipient: String,
    pub body: String,
}

impl Email {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            body: body.into(),
        }
    }

    /// A copy of this email addressed to a different recipient.
    pub fn with_recipient(&self, recipient: impl Into<String>) -> Self {
        Self {
            sender: self.sender.clone(),
            recipient: recipient.into(),
            body: self.body.clone(),
        }
    }

    /// Read the next three-line group from `input`.
    ///
    /// Returns `Ok(None)` at end of input. A group cut short by end of
    /// input (fewer than three lines) is discarded, not surfaced: only a
    /// complete group produces an email.
    pub fn read_from<R: BufRead>(input: &mut R) -> io::Result<Option<Self>> {
        let Some(sender) = read_field(input)? else {
            return Ok(None);
        };
        let Some(recipient) = read_field(input)? else {
            return Ok(None);
        };
        let Some(body) = read_field(input)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            sender,
            recipient,
            body,
        }))
    }

    /// Serialize as three lines: sender, recipient, body.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.sender)?;
        writeln!(out, "{}", self.recipient)?;
        writeln!(out, "{}", self.body)
    }
}

/// Read one line, stripping the trailing newline (and `\r` before it).
/// Returns `Ok(None)` at end of input.
fn read_field<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}
