//! # Folder-to-zip archival.
//!
//! One archive run is described by an [`ArchiveJob`] (timestamped destination
//! derived from the configured template) and executed by [`archive_folder`],
//! a blocking function the orchestrator drives through
//! `tokio::task::spawn_blocking` so the tick cadence never stalls.

mod job;
mod writer;

pub use job::ArchiveJob;
pub use writer::{archive_folder, ArchiveSummary};
