//======================================================================
// src/sbox.rs
// S-box derivation. The affine mode composes a fixed invertible
// GF(2) transform on top of the AES S-box, so bijectivity and the
// AES differential/linear profile carry over to every seed.
//======================================================================

use sha2::{Digest, Sha256};

use crate::consts::{AES_AFFINE_ROWS, AES_SBOX, NODES};
use crate::permutation::BytePermutation;

/// S-box derivation mode.
///
/// `Affine` is the default and the only mode that preserves the AES
/// differential uniformity (4) and nonlinearity (112). `Conjugate`
/// stays bijective but gives up both bounds; `Pure` ignores the
/// topology entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SboxMode {
    /// `S[x] = A * AES_SBOX[x] ^ b`, with `b` derived from the
    /// topology vector and the low Laplacian eigenvalues.
    #[default]
    Affine,
    /// The unmodified AES S-box.
    Pure,
    /// `S[x] = rho[AES_SBOX[rho_inv[x]]]` for the topology-derived
    /// byte permutation rho.
    Conjugate,
}

/// Builds the S-box for `mode`.
pub fn build(mode: SboxMode, topo_bytes: &[u8; NODES], spectrum: &[f64]) -> [u8; 256] {
    match mode {
        SboxMode::Affine => build_affine(topo_bytes, spectrum),
        SboxMode::Pure => AES_SBOX,
        SboxMode::Conjugate => build_conjugate(topo_bytes),
    }
}

fn build_affine(topo_bytes: &[u8; NODES], spectrum: &[f64]) -> [u8; 256] {
    let b = affine_constant(topo_bytes, spectrum);
    let mut sbox = [0u8; 256];
    for (x, out) in sbox.iter_mut().enumerate() {
        *out = apply_affine(AES_SBOX[x], b);
    }
    sbox
}

fn build_conjugate(topo_bytes: &[u8; NODES]) -> [u8; 256] {
    let rho = BytePermutation::derive(topo_bytes);
    let mut sbox = [0u8; 256];
    for (x, out) in sbox.iter_mut().enumerate() {
        let pre = rho.inverse()[x] as usize;
        *out = rho.forward()[AES_SBOX[pre] as usize];
    }
    sbox
}

/// The affine constant b: first byte of SHA-256(topo_bytes), XOR-folded
/// with the first eight Laplacian magnitudes scaled to bytes.
fn affine_constant(topo_bytes: &[u8; NODES], spectrum: &[f64]) -> u8 {
    let digest = Sha256::digest(topo_bytes);
    let b0 = digest[0];

    let magnitudes: Vec<f64> = spectrum.iter().take(8).map(|v| v.abs()).collect();
    let max = magnitudes.iter().copied().fold(0.0f64, f64::max);
    let fold = if max > 0.0 {
        magnitudes
            .iter()
            .map(|&v| (255.0 * v / max).round() as u8)
            .fold(0u8, |acc, byte| acc ^ byte)
    } else {
        0
    };
    b0 ^ fold
}

/// `A * a ^ b` over GF(2): output bit i is the parity of row mask i
/// AND the input, with the input's LSB at row 0.
fn apply_affine(a: u8, b: u8) -> u8 {
    let mut y = 0u8;
    for (i, &row) in AES_AFFINE_ROWS.iter().enumerate() {
        y |= (((row & a).count_ones() as u8) & 1) << i;
    }
    y ^ b
}
