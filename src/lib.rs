use std::error::Error;

pub mod cache;
pub mod clippings;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod search;

pub use clippings::{Clippings, parse_clippings};
pub use model::{ClippingEntry, ClippingKind};

pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
