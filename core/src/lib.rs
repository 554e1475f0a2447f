//! Deterministic fixed-point lookup-table generation.
//!
//! Tables sample closed-form functions over a uniform angular range and
//! quantize each column to raw fixed-point integers under an explicit
//! rounding policy. Output is bit-exact for identical inputs.

mod error;
mod fixed;
mod generator;

pub mod constants;

pub use error::{Result, TableError};
pub use fixed::{dequantize, quantize, Rounding, FIXED_SCALE, FRAC_BITS, I};
pub use generator::{generate, ColumnSpec, Domain, SampleTable, Source, TableSpec};

use sha2::{Digest, Sha256};

/// Compute SHA-256 digest of a generated table
/// Format: "LUTGENv1" || samples (u32 LE) || arity (u32 LE) || raw values (i32 LE each)
pub fn compute_table_hash(table: &SampleTable) -> [u8; 32] {
    let mut h = Sha256::new();

    let mut buf = Vec::with_capacity(16 + table.values().len() * 4);
    buf.extend_from_slice(b"LUTGENv1");
    buf.extend_from_slice(&(table.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(table.arity() as u32).to_le_bytes());
    for v in table.values() {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    h.update(&buf);

    let out = h.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}
