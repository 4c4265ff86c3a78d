//! Response shapes exposed by the HTTP API

pub mod libraries;

pub use libraries::{render, render_many, ImageView, LibraryView};
