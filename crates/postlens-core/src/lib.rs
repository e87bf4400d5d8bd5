pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod features;
pub mod ingest;
pub mod keywords;
pub mod pipeline;
pub mod refresh;
pub mod sentiment;
pub mod store;
pub mod types;
pub mod views;

pub use postlens_nlp as nlp;
