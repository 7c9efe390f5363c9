//======================================================================
// src/core.rs
// The GraphCrypto facade: pipeline orchestration and the public
// byte-generation operations.
//======================================================================

use cipher::{Block, StreamCipherCore, StreamCipherSeekCore};
use tracing::{debug, info};

use crate::consts::{AES_SBOX, NODES, ROUND_KEY_COUNT, STATE_BITS, STATE_BYTES};
use crate::error::Error;
use crate::graph::SeedGraph;
use crate::keys;
use crate::permutation::BitPermutation;
use crate::sbox::{self, SboxMode};
use crate::spn::CipherMaterial;
use crate::stream::TopoCtrCore;
use crate::topology::TopologyFeatures;

/// Diagnostic summary of a constructed instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    /// Always 256.
    pub nodes: usize,
    /// Distinct undirected edges of the seed graph.
    pub edges: usize,
    /// Edge density 2|E| / (n(n-1)).
    pub density: f64,
    /// Mean local clustering coefficient.
    pub avg_clustering: f64,
    /// Positions where the derived S-box differs from the AES S-box.
    pub sbox_diff_from_aes: usize,
    /// Current counter value; equals blocks produced unless sought.
    pub blocks_generated: u128,
}

/// Deterministic byte generator and block cipher whose material is
/// derived from the topology of a seed-generated 256-vertex graph.
///
/// Construction runs the full pipeline (graph, topology features,
/// bit permutation, S-box, round keys) and is the only fallible
/// operation. Afterwards the derived material is immutable and only
/// the block counter advances.
pub struct GraphCrypto {
    core: TopoCtrCore,
    edges: usize,
    density: f64,
    avg_clustering: f64,
    sbox_diff_from_aes: usize,
}

impl GraphCrypto {
    /// Builds an instance with the default (affine) S-box mode.
    /// The seed may be any byte string, including empty.
    pub fn new(seed: &[u8]) -> Result<Self, Error> {
        Self::with_mode(seed, SboxMode::default())
    }

    /// Builds an instance with an explicit S-box mode.
    pub fn with_mode(seed: &[u8], mode: SboxMode) -> Result<Self, Error> {
        let graph = SeedGraph::build(seed);
        debug!(nodes = NODES, edges = graph.edge_count(), "seed graph built");
        if graph.edge_count() == 0 {
            return Err(Error::EmptyGraph { seed_hex: hex::encode(seed) });
        }

        let features = TopologyFeatures::extract(&graph).map_err(|err| Error::EigenConvergence {
            iterations: err.iterations,
            seed_hex: hex::encode(seed),
        })?;
        let topo_bytes = features.fuse();
        debug!("topology features extracted and fused");

        let pi = BitPermutation::derive(&topo_bytes);
        debug!("bit permutation derived");

        let sbox = sbox::build(mode, &topo_bytes, &features.spectrum);
        let sbox_diff_from_aes = sbox
            .iter()
            .zip(AES_SBOX.iter())
            .filter(|(derived, aes)| derived != aes)
            .count();
        debug!(?mode, diff_from_aes = sbox_diff_from_aes, "s-box derived");

        let round_keys = keys::derive_round_keys(seed, &topo_bytes);
        debug!(count = ROUND_KEY_COUNT, "round keys expanded");

        let edges = graph.edge_count();
        let n = NODES as f64;
        let density = 2.0 * edges as f64 / (n * (n - 1.0));
        let avg_clustering =
            features.clustering.iter().sum::<f64>() / features.clustering.len() as f64;

        info!(edges, sbox_diff_from_aes, "cipher material ready");
        Ok(Self {
            core: TopoCtrCore::new(CipherMaterial { sbox, pi, round_keys }),
            edges,
            density,
            avg_clustering,
            sbox_diff_from_aes,
        })
    }

    /// Produces the next 16-byte keystream block: the block transform
    /// applied to the big-endian counter, which then advances by one.
    pub fn generate_block(&mut self) -> [u8; STATE_BYTES] {
        let mut block = Block::<TopoCtrCore>::default();
        self.core.write_keystream_block(&mut block);
        let mut out = [0u8; STATE_BYTES];
        out.copy_from_slice(&block);
        out
    }

    /// Produces exactly `n` keystream bytes, consuming ceil(n / 16)
    /// blocks. `n = 0` returns empty without advancing the counter.
    pub fn generate_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(n + STATE_BYTES);
        while out.len() < n {
            out.extend_from_slice(&self.generate_block());
        }
        out.truncate(n);
        out
    }

    /// Encrypts `plaintext` by XOR with the keystream.
    ///
    /// The final chunk is zero-padded to 16 bytes and no length tag is
    /// stored, so the output length is ceil(|plaintext| / 16) * 16 and
    /// callers must track the original length themselves. Rewinding the
    /// counter with [`seek_block`](Self::seek_block) and encrypting
    /// again inverts the operation.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Vec<u8> {
        let mut out = plaintext.to_vec();
        let rem = out.len() % STATE_BYTES;
        if rem != 0 {
            out.resize(out.len() + STATE_BYTES - rem, 0);
        }
        for chunk in out.chunks_exact_mut(STATE_BYTES) {
            let ks = self.generate_block();
            for (byte, k) in chunk.iter_mut().zip(ks.iter()) {
                *byte ^= k;
            }
        }
        out
    }

    /// Diagnostic accessors over the derived material.
    pub fn stats(&self) -> Stats {
        Stats {
            nodes: NODES,
            edges: self.edges,
            density: self.density,
            avg_clustering: self.avg_clustering,
            sbox_diff_from_aes: self.sbox_diff_from_aes,
            blocks_generated: self.core.get_block_pos(),
        }
    }

    /// Current block position (counter value).
    pub fn block_pos(&self) -> u128 {
        self.core.get_block_pos()
    }

    /// Repositions the counter. Block N is always derived from counter
    /// value N, so seeking re-derives any part of the stream.
    pub fn seek_block(&mut self, pos: u128) {
        self.core.set_block_pos(pos);
    }

    /// The derived S-box table.
    pub fn sbox(&self) -> &[u8; 256] {
        &self.core.material.sbox
    }

    /// The derived 128-entry bit permutation.
    pub fn bit_permutation(&self) -> &[u8; STATE_BITS] {
        self.core.material.pi.forward()
    }
}
