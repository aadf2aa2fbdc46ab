//! Drive implementations for the summary pipeline.

#[cfg(feature = "google-drive")]
mod google;

#[cfg(feature = "google-drive")]
pub use google::GoogleDrive;
