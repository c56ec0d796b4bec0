//! Shared building blocks for the feature slices.

pub mod text;
pub mod text_field;

pub use text_field::TextField;
