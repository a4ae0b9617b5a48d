//! Stage trait and implementations.
//!
//! A pipeline is a singly-linked chain of stages. Each stage exclusively
//! owns its successor, so the chain is linear and acyclic by construction.
//! Processing is synchronous and depth-first: a stage consumes one owned
//! [`Email`] and forwards zero, one, or two emails to its successor before
//! returning.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::email::Email;
use crate::error::PipelineError;

/// A pipeline stage that processes emails one at a time.
///
/// Only [`process`](Stage::process) is dispatched per record. The chain
/// linkage (`attach_next`, `forward`) is shared behavior over the
/// implementor-supplied `next` link, and [`run`](Stage::run) is meaningful
/// only on the origin stage.
pub trait Stage {
    /// Consume one owned email, forwarding zero or more emails downstream.
    fn process(&mut self, email: Email) -> Result<(), PipelineError>;

    /// Drive the pipeline from this stage.
    ///
    /// Only the origin stage pulls records from an external source; on any
    /// other stage this fails with [`PipelineError::NotRunnable`].
    fn run(&mut self) -> Result<(), PipelineError> {
        Err(PipelineError::NotRunnable { stage: self.name() })
    }

    /// The display name of this stage.
    fn name(&self) -> &'static str;

    /// The exclusively owned link to the next stage, if any.
    fn next_mut(&mut self) -> &mut Option<Box<dyn Stage>>;

    /// Append `stage` at the tail of the chain.
    ///
    /// Walks the `next` links until the tail and takes ownership there, so
    /// append order is processing order.
    fn attach_next(&mut self, stage: Box<dyn Stage>) {
        let slot = self.next_mut();
        match slot {
            Some(next) => next.attach_next(stage),
            None => *slot = Some(stage),
        }
    }

    /// Hand `email` to the next stage, or drop it at the tail.
    ///
    /// Dropping at the tail is the normal end of a record's journey, not
    /// an error.
    fn forward(&mut self, email: Email) -> Result<(), PipelineError> {
        match self.next_mut() {
            Some(next) => next.process(email),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Stage implementations
// ---------------------------------------------------------------------------

/// Origin stage: reads three-line groups from an external input and pushes
/// each complete group into the chain.
pub struct Reader<R: BufRead> {
    input: R,
    next: Option<Box<dyn Stage>>,
}

impl<R: BufRead> Reader<R> {
    pub fn new(input: R) -> Self {
        Self { input, next: None }
    }
}

impl<R: BufRead> Stage for Reader<R> {
    /// A reader has no predecessor, so a fed email is simply dropped.
    fn process(&mut self, _email: Email) -> Result<(), PipelineError> {
        Ok(())
    }

    fn run(&mut self) -> Result<(), PipelineError> {
        // One record traverses the whole chain before the next is read.
        // A partial trailing group yields None and is discarded silently.
        while let Some(email) = Email::read_from(&mut self.input)? {
            self.forward(email)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Reader"
    }

    fn next_mut(&mut self) -> &mut Option<Box<dyn Stage>> {
        &mut self.next
    }
}

/// Keeps emails matching a predicate, drops the rest.
pub struct Filter {
    predicate: Box<dyn Fn(&Email) -> bool>,
    next: Option<Box<dyn Stage>>,
}

impl Filter {
    pub fn new(predicate: impl Fn(&Email) -> bool + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
            next: None,
        }
    }
}

impl Stage for Filter {
    fn process(&mut self, email: Email) -> Result<(), PipelineError> {
        if (self.predicate)(&email) {
            self.forward(email)
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "Filter"
    }

    fn next_mut(&mut self) -> &mut Option<Box<dyn Stage>> {
        &mut self.next
    }
}

/// Delivers an extra copy of each email to a fixed recipient.
///
/// The original is forwarded first, then the copy; both travel the same
/// remaining chain sequentially. An email already addressed to the target
/// is forwarded once, unchanged.
pub struct Copier {
    recipient: String,
    next: Option<Box<dyn Stage>>,
}

impl Copier {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            next: None,
        }
    }
}

impl Stage for Copier {
    fn process(&mut self, email: Email) -> Result<(), PipelineError> {
        if email.recipient != self.recipient {
            let copy = email.with_recipient(self.recipient.as_str());
            self.forward(email)?;
            self.forward(copy)
        } else {
            self.forward(email)
        }
    }

    fn name(&self) -> &'static str {
        "Copier"
    }

    fn next_mut(&mut self) -> &mut Option<Box<dyn Stage>> {
        &mut self.next
    }
}

/// Serializes each email to an external sink as three lines, then forwards
/// it unchanged so further stages may follow a sender.
pub struct Sender<W: Write> {
    out: W,
    next: Option<Box<dyn Stage>>,
}

impl<W: Write> Sender<W> {
    pub fn new(out: W) -> Self {
        Self { out, next: None }
    }
}

impl<W: Write> Stage for Sender<W> {
    fn process(&mut self, email: Email) -> Result<(), PipelineError> {
        email.write_to(&mut self.out)?;
        self.forward(email)
    }

    fn name(&self) -> &'static str {
        "Sender"
    }

    fn next_mut(&mut self) -> &mut Option<Box<dyn Stage>> {
        &mut self.next
    }
}

// ---------------------------------------------------------------------------
// In-memory sink
// ---------------------------------------------------------------------------

/// A clonable in-memory sink.
///
/// [`Sender`] takes its sink by value; cloning a `MemorySink` into the
/// pipeline keeps a handle for inspecting what was written after the run.
/// Pipelines are single-threaded, so a shared `Rc` cell suffices.
#[derive(Clone, Default)]
pub struct MemorySink {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as text.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
