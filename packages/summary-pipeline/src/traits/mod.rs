//! Core trait abstractions for the summary pipeline.
//!
//! These traits define the seams to external collaborators: file storage,
//! the generative-AI backend, and document text extraction.

pub mod ai;
pub mod drive;
pub mod text;
