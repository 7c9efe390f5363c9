//======================================================================
// src/keys.rs
// Round-key schedule: a SHA-256 anchor over the seed and the head of
// the topology vector, expanded into 13 independent 16-byte keys.
//======================================================================

use sha2::{Digest, Sha256};

use crate::consts::{NODES, RK_DOMAIN, ROUND_KEY_COUNT, STATE_BYTES};

/// Derives `RK[0..=12]`.
///
/// `anchor = SHA-256(seed || topo_bytes[0..32])`, then
/// `RK[r] = SHA-256(anchor || "RK" || r)[0..16]`. Each key depends only
/// on the anchor and its index, never on the previous key.
pub fn derive_round_keys(seed: &[u8], topo_bytes: &[u8; NODES]) -> [[u8; STATE_BYTES]; ROUND_KEY_COUNT] {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update(&topo_bytes[..32]);
    let anchor = hasher.finalize();

    let mut keys = [[0u8; STATE_BYTES]; ROUND_KEY_COUNT];
    for (r, key) in keys.iter_mut().enumerate() {
        let mut hasher = Sha256::new();
        hasher.update(anchor);
        hasher.update(RK_DOMAIN);
        hasher.update([r as u8]);
        key.copy_from_slice(&hasher.finalize()[..STATE_BYTES]);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_is_deterministic_and_distinct() {
        let topo = [0x5au8; NODES];
        let a = derive_round_keys(b"key schedule", &topo);
        let b = derive_round_keys(b"key schedule", &topo);
        assert_eq!(a, b);

        for i in 0..ROUND_KEY_COUNT {
            for j in (i + 1)..ROUND_KEY_COUNT {
                assert_ne!(a[i], a[j], "keys {i} and {j} collide");
            }
        }
    }

    #[test]
    fn schedule_depends_on_seed_and_topology() {
        let topo = [0x5au8; NODES];
        let mut other_topo = topo;
        other_topo[0] ^= 1;

        let base = derive_round_keys(b"seed", &topo);
        assert_ne!(base, derive_round_keys(b"other", &topo));
        assert_ne!(base, derive_round_keys(b"seed", &other_topo));

        // Only the first 32 topology bytes feed the anchor.
        let mut tail_topo = topo;
        tail_topo[NODES - 1] ^= 1;
        assert_eq!(base, derive_round_keys(b"seed", &tail_topo));
    }
}
