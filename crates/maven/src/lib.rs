//! Maven Central coordinate search over the Solr select API.

pub mod client;
pub mod error;
pub mod solr;

pub use client::MavenCentralSearch;
pub use error::SearchError;
