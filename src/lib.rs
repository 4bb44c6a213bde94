//! # heartbeat-context
//!
//! Extracts a small, denoised, semantically coherent tail of a growing
//! session transcript for use as read-only grounding by the periodic
//! heartbeat loop. Transcripts are append-only JSON-Lines files that can
//! grow without bound, so only the last few hundred kilobytes are read.
//!
//! The pipeline: bounded tail read → line-oriented parse with corruption
//! tolerance → content-type-aware text extraction → boilerplate filtering
//! and progress-only classification → trailing trim and length-bounded
//! rendering with diagnostics.
//!
//! Every call is self-contained: the transcript is re-read and the model
//! re-derived from disk, nothing is cached across calls, and the file is
//! never mutated.

mod extract;
mod filter;
mod parse;
mod record;
mod tail;

pub mod build;
pub mod error;
pub mod options;

pub use build::{build, build_block, ContextBuild, Diagnostics, CONTEXT_HEADER};
pub use error::ContextError;
pub use options::BuildOptions;
