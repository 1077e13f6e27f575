//! Unreleased change set calculation

pub mod unreleased;

pub use unreleased::{compute, duplicate_subjects, released_subjects};
