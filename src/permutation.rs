//======================================================================
// src/permutation.rs
// Topology-derived permutations: the 128-position bit permutation pi
// used by the P-layer, and the 256-position byte permutation rho used
// by the conjugate S-box mode.
//======================================================================

use crate::consts::{NODES, STATE_BITS, STATE_BYTES};

/// Bit permutation over the 128 bit positions of a block.
///
/// Bit indexing is fixed: bit i of a state lives in byte i/8 at bit
/// i%8, i.e. LSB-first within bytes, byte 0 first.
pub struct BitPermutation {
    forward: [u8; STATE_BITS],
    inverse: [u8; STATE_BITS],
}

impl BitPermutation {
    /// Derives pi from the first 128 topology bytes: stable argsort by
    /// (value, original index); `pi[k]` is the original index of the
    /// k-th smallest byte.
    pub fn derive(topo_bytes: &[u8; NODES]) -> Self {
        let mut indexed: Vec<(u8, u8)> = topo_bytes[..STATE_BITS]
            .iter()
            .enumerate()
            .map(|(i, &value)| (value, i as u8))
            .collect();
        indexed.sort_unstable();

        let mut forward = [0u8; STATE_BITS];
        let mut inverse = [0u8; STATE_BITS];
        for (k, &(_, index)) in indexed.iter().enumerate() {
            forward[k] = index;
            inverse[index as usize] = k as u8;
        }
        Self { forward, inverse }
    }

    /// Applies pi to a block: output bit k = input bit `pi[k]`.
    pub fn apply(&self, state: &[u8; STATE_BYTES]) -> [u8; STATE_BYTES] {
        let mut out = [0u8; STATE_BYTES];
        for (k, &src) in self.forward.iter().enumerate() {
            let src = src as usize;
            let bit = state[src >> 3] >> (src & 7) & 1;
            out[k >> 3] |= bit << (k & 7);
        }
        out
    }

    /// The forward table.
    pub fn forward(&self) -> &[u8; STATE_BITS] {
        &self.forward
    }

    /// The inverse table: `inverse[pi[k]] == k`.
    pub fn inverse(&self) -> &[u8; STATE_BITS] {
        &self.inverse
    }
}

/// Byte permutation over 0..=255, derived by the same argsort over the
/// full topology vector. Feeds the conjugate S-box mode.
pub struct BytePermutation {
    forward: [u8; NODES],
    inverse: [u8; NODES],
}

impl BytePermutation {
    pub fn derive(topo_bytes: &[u8; NODES]) -> Self {
        let mut indexed: Vec<(u8, u8)> = topo_bytes
            .iter()
            .enumerate()
            .map(|(i, &value)| (value, i as u8))
            .collect();
        indexed.sort_unstable();

        let mut forward = [0u8; NODES];
        let mut inverse = [0u8; NODES];
        for (k, &(_, index)) in indexed.iter().enumerate() {
            forward[k] = index;
            inverse[index as usize] = k as u8;
        }
        Self { forward, inverse }
    }

    pub fn forward(&self) -> &[u8; NODES] {
        &self.forward
    }

    pub fn inverse(&self) -> &[u8; NODES] {
        &self.inverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(table: &[u8], len: usize) -> bool {
        let mut seen = vec![false; len];
        for &v in table {
            if (v as usize) < len && !seen[v as usize] {
                seen[v as usize] = true;
            } else {
                return false;
            }
        }
        true
    }

    #[test]
    fn tied_bytes_give_identity() {
        let pi = BitPermutation::derive(&[0x42; NODES]);
        for (k, &v) in pi.forward().iter().enumerate() {
            assert_eq!(k as u8, v);
        }
        let state: [u8; STATE_BYTES] = core::array::from_fn(|i| i as u8);
        assert_eq!(pi.apply(&state), state);
    }

    #[test]
    fn derived_tables_are_permutations() {
        let mut topo = [0u8; NODES];
        for (i, byte) in topo.iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(167).wrapping_add(13);
        }
        let pi = BitPermutation::derive(&topo);
        assert!(is_permutation(pi.forward(), STATE_BITS));
        assert!(is_permutation(pi.inverse(), STATE_BITS));
        for k in 0..STATE_BITS {
            assert_eq!(pi.inverse()[pi.forward()[k] as usize] as usize, k);
        }

        let rho = BytePermutation::derive(&topo);
        assert!(is_permutation(rho.forward(), NODES));
        for k in 0..NODES {
            assert_eq!(rho.inverse()[rho.forward()[k] as usize] as usize, k);
        }
    }

    #[test]
    fn apply_moves_single_bit() {
        let mut topo = [0u8; NODES];
        for (i, byte) in topo.iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(59).wrapping_add(101);
        }
        let pi = BitPermutation::derive(&topo);

        // Set exactly input bit pi[k]; exactly output bit k must be set.
        let k = 77;
        let src = pi.forward()[k] as usize;
        let mut state = [0u8; STATE_BYTES];
        state[src >> 3] |= 1 << (src & 7);

        let out = pi.apply(&state);
        let total: u32 = out.iter().map(|b| b.count_ones()).sum();
        assert_eq!(total, 1);
        assert_eq!(out[k >> 3] >> (k & 7) & 1, 1);
    }
}
