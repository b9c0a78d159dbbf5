//! Question answering pipeline: embed -> retrieve -> generate

pub mod extract;
pub mod links;
pub mod pipeline;
pub mod prompts;

pub use extract::NoopTextExtractor;
pub use extract::TextExtractor;
pub use links::Link;
pub use pipeline::RagAnswer;
pub use pipeline::RagService;
