//! # mailpipe
//!
//! A chain-of-responsibility pipeline for streams of three-line email
//! records (sender, recipient, body).
//!
//! A pipeline is a singly-linked chain of stages assembled with
//! [`PipelineBuilder`]. The origin [`Reader`] pulls one record at a time
//! from a line-oriented input and pushes it through the chain; each stage
//! consumes an owned [`Email`] and forwards zero, one, or two records to
//! its successor. Execution is synchronous and depth-first: a record fully
//! traverses the chain before the next one is read.
//!
//! ## Example
//!
//! ```
//! use mailpipe::{MemorySink, PipelineBuilder, Stage};
//!
//! let input: &[u8] = b"erich@example.com\n\
//!     richard@example.com\n\
//!     Hello there\n";
//! let sink = MemorySink::new();
//!
//! let mut pipeline = PipelineBuilder::new(input)
//!     .filter_by(|email| email.sender == "erich@example.com")
//!     .send_to(sink.clone())
//!     .build();
//! pipeline.run().unwrap();
//!
//! assert_eq!(
//!     sink.contents(),
//!     "erich@example.com\nrichard@example.com\nHello there\n"
//! );
//! ```

pub mod email;
pub mod error;
pub mod pipeline;
pub mod stage;

pub use email::Email;
pub use error::PipelineError;
pub use pipeline::PipelineBuilder;
pub use stage::{Copier, Filter, MemorySink, Reader, Sender, Stage};
