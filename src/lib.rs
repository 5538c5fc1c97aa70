//! # huf
//!
//! Static Huffman compression of whole files into self-describing `.huf`
//! artifacts.
//!
//! ```no_run
//! use huf::compressor::Compressor;
//!
//! let report = Compressor::new("report.txt").compress()?;
//! println!("{} -> {}", report.properties.source, report.properties.artifact);
//! # Ok::<(), huf::HufError>(())
//! ```

pub mod artifact;
pub mod bitstreams;
pub mod codes;
pub mod compressor;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod huffman_table;
pub mod properties;

pub use error::{HufError, Result};

/// A literal byte value (0-255) or the end-of-stream marker.
pub type Symbol = u16;

/// End-of-stream sentinel, never produced by real input.
pub const EOS: Symbol = 256;
