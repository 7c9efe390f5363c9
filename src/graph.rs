//======================================================================
// src/graph.rs
// Deterministic seed -> 256-vertex undirected graph via a SHA-512
// hash chain.
//======================================================================

use sha2::{Digest, Sha512};

use crate::consts::{GRAPH_ROUNDS, NODES};

/// Undirected simple graph on the fixed vertex set {0, ..., 255}.
///
/// Adjacency is kept twice: as per-vertex 256-bit sets (for triangle
/// counting by intersection) and as ascending neighbour lists (for BFS
/// with a pinned traversal order).
pub struct SeedGraph {
    bits: Vec<[u64; 4]>,
    neighbors: Vec<Vec<u8>>,
    edges: usize,
}

impl SeedGraph {
    /// Builds the graph for `seed`.
    ///
    /// `h_0 = seed`, `h_{r+1} = SHA-512(h_r || r)` for r = 0..48. Each
    /// 64-byte digest contributes up to 32 edges `{h[2i], h[2i+1]}`;
    /// self-loops are skipped and duplicates collapse.
    pub fn build(seed: &[u8]) -> Self {
        let mut bits = vec![[0u64; 4]; NODES];
        let mut edges = 0usize;

        let mut chain = seed.to_vec();
        for round in 0..GRAPH_ROUNDS {
            let mut hasher = Sha512::new();
            hasher.update(&chain);
            hasher.update([round as u8]);
            let digest = hasher.finalize();

            for pair in digest.chunks_exact(2) {
                let (u, v) = (pair[0] as usize, pair[1] as usize);
                if u == v {
                    continue;
                }
                if bits[u][v >> 6] & (1 << (v & 63)) == 0 {
                    bits[u][v >> 6] |= 1 << (v & 63);
                    bits[v][u >> 6] |= 1 << (u & 63);
                    edges += 1;
                }
            }
            chain = digest.to_vec();
        }

        let neighbors = Self::collect_neighbors(&bits);
        Self { bits, neighbors, edges }
    }

    /// Test-only constructor from an explicit edge list.
    #[cfg(test)]
    pub(crate) fn from_edges(edge_list: &[(u8, u8)]) -> Self {
        let mut bits = vec![[0u64; 4]; NODES];
        let mut edges = 0usize;
        for &(u, v) in edge_list {
            let (u, v) = (u as usize, v as usize);
            if u == v {
                continue;
            }
            if bits[u][v >> 6] & (1 << (v & 63)) == 0 {
                bits[u][v >> 6] |= 1 << (v & 63);
                bits[v][u >> 6] |= 1 << (u & 63);
                edges += 1;
            }
        }
        let neighbors = Self::collect_neighbors(&bits);
        Self { bits, neighbors, edges }
    }

    fn collect_neighbors(bits: &[[u64; 4]]) -> Vec<Vec<u8>> {
        bits.iter()
            .map(|set| {
                let mut list = Vec::new();
                for v in 0..NODES {
                    if set[v >> 6] >> (v & 63) & 1 == 1 {
                        list.push(v as u8);
                    }
                }
                list
            })
            .collect()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Degree of vertex `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.neighbors[v].len()
    }

    /// Neighbours of `v`, ascending.
    pub fn neighbors(&self, v: usize) -> &[u8] {
        &self.neighbors[v]
    }

    /// Whether `{u, v}` is an edge.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.bits[u][v >> 6] >> (v & 63) & 1 == 1
    }

    /// |N(u) ∩ N(v)| by bitset intersection.
    pub fn common_neighbors(&self, u: usize, v: usize) -> u32 {
        let (a, b) = (&self.bits[u], &self.bits[v]);
        (a[0] & b[0]).count_ones()
            + (a[1] & b[1]).count_ones()
            + (a[2] & b[2]).count_ones()
            + (a[3] & b[3]).count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_is_deterministic() {
        let a = SeedGraph::build(b"determinism");
        let b = SeedGraph::build(b"determinism");
        assert_eq!(a.edge_count(), b.edge_count());
        for v in 0..NODES {
            assert_eq!(a.neighbors(v), b.neighbors(v));
        }
    }

    #[test]
    fn no_self_loops_and_symmetric() {
        let g = SeedGraph::build(b"");
        assert!(g.edge_count() > 0);
        let mut half_degrees = 0;
        for v in 0..NODES {
            assert!(!g.has_edge(v, v));
            for &w in g.neighbors(v) {
                assert!(g.has_edge(w as usize, v));
            }
            half_degrees += g.degree(v);
        }
        // Handshake lemma.
        assert_eq!(half_degrees, 2 * g.edge_count());
    }

    #[test]
    fn common_neighbors_matches_lists() {
        let g = SeedGraph::from_edges(&[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]);
        // N(0) = {1,2}, N(3) = {1,2}.
        assert_eq!(g.common_neighbors(0, 3), 2);
        assert_eq!(g.common_neighbors(0, 1), 1); // only vertex 2
    }
}
