//! Data models for the libraries server

pub mod library;

pub use library::{Image, ImageCandidate, Library, LibraryCandidate, NewImage, NewLibrary};
