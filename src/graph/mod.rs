//! Word co-occurrence graph used by RAKE keyword scoring.

pub mod builder;

pub use builder::{CooccurrenceGraph, WordNode};
