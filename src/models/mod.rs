// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod album;
pub mod author;
pub mod fetch;
pub mod fields;
pub mod photo;

pub use album::*;
pub use author::*;
pub use fetch::*;
pub use photo::*;
