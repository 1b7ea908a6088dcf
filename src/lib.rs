//! Extract the camera track of a GoldSrc demo and write it as a .bvh motion file.
//!
//! Pipeline: [`goldsrc::GoldSrcDecoder`] (or any [`replay::ReplayDecoder`]) →
//! [`extract::extract_track`] → [`resample::resample`] → [`bvh::write_bvh`].
//! [`convert::convert_file`] runs all of it for one file.

pub mod bvh;
pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod goldsrc;
pub mod logger;
pub mod parse;
pub mod replay;
pub mod resample;
pub mod types;
mod utils;

pub use error::{Error, Result};
