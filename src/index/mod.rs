//! Vector index similarity search

pub mod client;

pub use client::Match;
pub use client::MatchMetadata;
pub use client::VectorIndexClient;
