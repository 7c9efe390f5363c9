//======================================================================
// src/error.rs
// Construction-time errors. Operational calls are total and never fail.
//======================================================================

use thiserror::Error;

/// Errors that can abort [`GraphCrypto`](crate::GraphCrypto) construction.
///
/// Every variant carries the hex-encoded seed so the failing input can be
/// reproduced verbatim.
#[derive(Debug, Error)]
pub enum Error {
    /// The QL eigensolver hit its iteration cap on the Laplacian.
    #[error("laplacian eigensolver failed to converge after {iterations} QL iterations (seed: {seed_hex})")]
    EigenConvergence { iterations: usize, seed_hex: String },

    /// The seed produced a graph with no edges, so every topology
    /// feature is degenerate.
    #[error("seed produced an edgeless graph (seed: {seed_hex})")]
    EmptyGraph { seed_hex: String },
}
