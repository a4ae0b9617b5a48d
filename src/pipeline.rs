//! Fluent assembly of a stage chain.

use std::io::{BufRead, Write};

use crate::email::Email;
use crate::stage::{Copier, Filter, Reader, Sender, Stage};

/// Builds a pipeline by appending stages in processing order.
///
/// The chain always starts with a [`Reader`] over the given input; each
/// append attaches a stage at the tail. The builder enforces no ordering
/// rules beyond that (nothing stops a `send_to` before a `filter_by`);
/// stage order is the caller's responsibility.
///
/// [`build`](PipelineBuilder::build) hands the chain head to the caller
/// and spends the builder.
pub struct PipelineBuilder {
    head: Box<dyn Stage>,
}

impl PipelineBuilder {
    /// Start a pipeline reading three-line email groups from `input`.
    pub fn new(input: impl BufRead + 'static) -> Self {
        Self {
            head: Box::new(Reader::new(input)),
        }
    }

    /// Append a filter keeping only emails matching `predicate`.
    pub fn filter_by(mut self, predicate: impl Fn(&Email) -> bool + 'static) -> Self {
        self.head.attach_next(Box::new(Filter::new(predicate)));
        self
    }

    /// Append a copier delivering an extra copy to `recipient`.
    pub fn copy_to(mut self, recipient: impl Into<String>) -> Self {
        self.head.attach_next(Box::new(Copier::new(recipient)));
        self
    }

    /// Append a sender writing each email to `out` as three lines.
    pub fn send_to(mut self, out: impl Write + 'static) -> Self {
        self.head.attach_next(Box::new(Sender::new(out)));
        self
    }

    /// Finish assembly, yielding exclusive ownership of the chain head.
    ///
    /// Call [`run`](Stage::run) on the result to drive the pipeline.
    pub fn build(self) -> Box<dyn Stage> {
        self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::MemorySink;

    const SAMPLE: &[u8] = b"erich@example.com\n\
        richard@example.com\n\
        Hello there\n\
        erich@example.com\n\
        ralph@example.com\n\
        Are you sure you pressed the right button?\n\
        ralph@example.com\n\
        erich@example.com\n\
        I do not make mistakes of that kind\n";

    #[test]
    fn test_filter_then_send() {
        let sink = MemorySink::new();
        let mut pipeline = PipelineBuilder::new(SAMPLE)
            .filter_by(|email| email.sender == "erich@example.com")
            .send_to(sink.clone())
            .build();
        pipeline.run().unwrap();

        assert_eq!(
            sink.contents(),
            "erich@example.com\n\
             richard@example.com\n\
             Hello there\n\
             erich@example.com\n\
             ralph@example.com\n\
             Are you sure you pressed the right button?\n"
        );
    }

    #[test]
    fn test_filter_copy_send() {
        let sink = MemorySink::new();
        let mut pipeline = PipelineBuilder::new(SAMPLE)
            .filter_by(|email| email.sender == "erich@example.com")
            .copy_to("richard@example.com")
            .send_to(sink.clone())
            .build();
        pipeline.run().unwrap();

        // First email already goes to richard: no copy. Second gains a
        // copy to richard right after the original. Third is filtered out.
        assert_eq!(
            sink.contents(),
            "erich@example.com\n\
             richard@example.com\n\
             Hello there\n\
             erich@example.com\n\
             ralph@example.com\n\
             Are you sure you pressed the right button?\n\
             erich@example.com\n\
             richard@example.com\n\
             Are you sure you pressed the right button?\n"
        );
    }

    #[test]
    fn test_reader_straight_to_sender() {
        let sink = MemorySink::new();
        let mut pipeline = PipelineBuilder::new(&b"\n\n\n\n"[..])
            .send_to(sink.clone())
            .build();
        pipeline.run().unwrap();

        // One complete empty-field group; the trailing partial group is
        // discarded.
        assert_eq!(sink.contents(), "\n\n\n");
    }

    #[test]
    fn test_reader_alone_runs_to_completion() {
        let mut pipeline = PipelineBuilder::new(SAMPLE).build();
        pipeline.run().unwrap();
    }

    #[test]
    fn test_append_order_is_processing_order() {
        // Copier before filter: copies are subject to the filter.
        let sink = MemorySink::new();
        let mut pipeline = PipelineBuilder::new(
            &b"a@example.com\nb@example.com\nbody\n"[..],
        )
        .copy_to("cc@example.com")
        .filter_by(|email| email.recipient == "cc@example.com")
        .send_to(sink.clone())
        .build();
        pipeline.run().unwrap();

        assert_eq!(sink.contents(), "a@example.com\ncc@example.com\nbody\n");
    }

    #[test]
    fn test_two_senders_write_everything_twice() {
        let first = MemorySink::new();
        let second = MemorySink::new();
        let mut pipeline = PipelineBuilder::new(&b"a\nb\nbody\n"[..])
            .send_to(first.clone())
            .send_to(second.clone())
            .build();
        pipeline.run().unwrap();

        assert_eq!(first.contents(), "a\nb\nbody\n");
        assert_eq!(first.contents(), second.contents());
    }
}
