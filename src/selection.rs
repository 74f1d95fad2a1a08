//! Clip range selection.
//!
//! A [`ClipRange`] is only ever built through validation; [`ClipSelector`]
//! applies the clamping policy to raw user input (seconds) before that.

mod range;
mod selector;

pub use range::ClipRange;
pub use selector::ClipSelector;
