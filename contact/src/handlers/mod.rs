pub mod indexer;
pub mod submission;
