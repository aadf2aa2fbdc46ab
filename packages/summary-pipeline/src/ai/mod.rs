//! AI implementations for the summary pipeline.
//!
//! Users can use these directly or implement [`AI`](crate::traits::ai::AI)
//! for another provider.

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiAI;
