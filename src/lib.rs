//! labdiff computes the CIEDE2000 (ΔE00) perceptual color difference
//! between colors specified in the CIE-Lab color space.

#![deny(missing_docs)]

mod color;
mod deltae;

#[cfg(test)]
mod test;

pub use color::{Component, Lab};
pub use deltae::ciede_2000;
