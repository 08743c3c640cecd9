// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod album_fetcher;
pub mod authors;
pub mod graph_client;
pub mod params;
pub mod parser;
pub mod photo_fetcher;
#[cfg(test)]
pub mod testing;

pub use album_fetcher::*;
pub use graph_client::*;
pub use params::FetchParams;
pub use photo_fetcher::*;
