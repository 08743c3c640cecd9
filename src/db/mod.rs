// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export repositories and the MirrorStore seam

pub mod album_repository;
pub mod author_repository;
#[cfg(test)]
pub mod memory;
pub mod photo_repository;
pub mod store;

pub use album_repository::*;
pub use author_repository::*;
pub use photo_repository::*;
pub use store::*;
