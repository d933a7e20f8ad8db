//! Storage collaborator contract and the fetch stage of the chart pipeline.

mod fetcher;
mod store;

pub use fetcher::DataFetcher;
pub use store::{InMemoryStore, SourceFrame, TimeSeriesStore};
