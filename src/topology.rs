//======================================================================
// src/topology.rs
// Topological feature extraction and fusion into the 256-byte
// topology vector.
//======================================================================

use std::collections::VecDeque;

use crate::consts::{NODES, NORM_EPSILON};
use crate::eigen::{self, NonConvergence};
use crate::graph::SeedGraph;

/// The four real-valued feature vectors of a [`SeedGraph`].
pub struct TopologyFeatures {
    pub degree: Vec<f64>,
    pub clustering: Vec<f64>,
    pub betweenness: Vec<f64>,
    /// Laplacian eigenvalues, ascending.
    pub spectrum: Vec<f64>,
}

impl TopologyFeatures {
    /// Extracts all four vectors. Fails only if the Laplacian
    /// eigensolve does not converge.
    pub fn extract(graph: &SeedGraph) -> Result<Self, NonConvergence> {
        let degree = (0..NODES).map(|v| graph.degree(v) as f64).collect();
        let clustering = local_clustering(graph);
        let betweenness = betweenness_centrality(graph);
        let spectrum = eigen::symmetric_eigenvalues(laplacian(graph))?;
        Ok(Self { degree, clustering, betweenness, spectrum })
    }

    /// XOR-fuses the normalized feature bytes into the topology vector.
    pub fn fuse(&self) -> [u8; NODES] {
        let d = normalize_to_bytes(&self.degree);
        let c = normalize_to_bytes(&self.clustering);
        let b = normalize_to_bytes(&self.betweenness);
        let l = normalize_to_bytes(&self.spectrum);
        let mut out = [0u8; NODES];
        for i in 0..NODES {
            out[i] = d[i] ^ c[i] ^ b[i] ^ l[i];
        }
        out
    }
}

/// Local clustering coefficient: triangles through v over C(deg, 2),
/// zero for degree < 2.
fn local_clustering(graph: &SeedGraph) -> Vec<f64> {
    (0..NODES)
        .map(|v| {
            let deg = graph.degree(v);
            if deg < 2 {
                return 0.0;
            }
            // Each triangle {v, u, w} is seen from both u and w.
            let mut links = 0u32;
            for &u in graph.neighbors(v) {
                links += graph.common_neighbors(v, u as usize);
            }
            let triangles = f64::from(links / 2);
            let possible = (deg * (deg - 1) / 2) as f64;
            triangles / possible
        })
        .collect()
}

/// Betweenness centrality via Brandes' algorithm.
///
/// Sources and neighbours are visited in ascending vertex order so the
/// accumulation order is pinned. The undirected double count divided by
/// (n-1)(n-2) yields the standard 2/((n-1)(n-2)) pair normalization.
fn betweenness_centrality(graph: &SeedGraph) -> Vec<f64> {
    let n = NODES;
    let mut centrality = vec![0.0f64; n];

    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut preds: Vec<Vec<u8>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![-1i32; n];
    let mut delta = vec![0.0f64; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for s in 0..n {
        stack.clear();
        for list in preds.iter_mut() {
            list.clear();
        }
        sigma.fill(0.0);
        sigma[s] = 1.0;
        dist.fill(-1);
        dist[s] = 0;
        queue.clear();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in graph.neighbors(v) {
                let w = w as usize;
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push(v as u8);
                }
            }
        }

        delta.fill(0.0);
        while let Some(w) = stack.pop() {
            let coeff = (1.0 + delta[w]) / sigma[w];
            for &v in &preds[w] {
                let v = v as usize;
                delta[v] += sigma[v] * coeff;
            }
            if w != s {
                centrality[w] += delta[w];
            }
        }
    }

    let scale = 1.0 / ((n as f64 - 1.0) * (n as f64 - 2.0));
    for value in centrality.iter_mut() {
        *value *= scale;
    }
    centrality
}

/// Dense Laplacian L = D - A.
fn laplacian(graph: &SeedGraph) -> Vec<Vec<f64>> {
    let mut l = vec![vec![0.0f64; NODES]; NODES];
    for v in 0..NODES {
        l[v][v] = graph.degree(v) as f64;
        for &u in graph.neighbors(v) {
            l[v][u as usize] = -1.0;
        }
    }
    l
}

/// Min-max normalization to bytes: round(255 * (v - min) / span) with
/// the span floored at epsilon. A constant vector maps to all zeros.
pub fn normalize_to_bytes(values: &[f64]) -> Vec<u8> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(NORM_EPSILON);
    values
        .iter()
        .map(|&v| (255.0 * (v - min) / span).round() as u8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn clustering_of_triangle_is_one() {
        let g = SeedGraph::from_edges(&[(0, 1), (1, 2), (0, 2)]);
        let c = local_clustering(&g);
        assert!((c[0] - 1.0).abs() < TOL);
        assert!((c[1] - 1.0).abs() < TOL);
        assert!((c[2] - 1.0).abs() < TOL);
        assert_eq!(c[3], 0.0);
    }

    #[test]
    fn clustering_of_open_wedge_is_zero() {
        let g = SeedGraph::from_edges(&[(0, 1), (1, 2)]);
        let c = local_clustering(&g);
        assert_eq!(c[1], 0.0);
    }

    #[test]
    fn betweenness_of_path_matches_closed_form() {
        // Path 0-1-2-3. With n = 256 the normalization factor is
        // 1/((n-1)(n-2)) over the doubled accumulation; inner vertices
        // of the path carry 2 unordered pairs each.
        let g = SeedGraph::from_edges(&[(0, 1), (1, 2), (2, 3)]);
        let b = betweenness_centrality(&g);
        let n = NODES as f64;
        let expected = 2.0 * 2.0 / ((n - 1.0) * (n - 2.0));
        assert!((b[1] - expected).abs() < TOL, "got {}", b[1]);
        assert!((b[2] - expected).abs() < TOL);
        assert!(b[0].abs() < TOL);
        assert!(b[3].abs() < TOL);
    }

    #[test]
    fn normalization_spans_full_range() {
        let bytes = normalize_to_bytes(&[0.0, 0.5, 1.0]);
        assert_eq!(bytes, vec![0, 128, 255]);
    }

    #[test]
    fn normalization_of_constant_vector_is_zero() {
        let bytes = normalize_to_bytes(&[3.25; 16]);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn spectrum_is_sorted_and_starts_at_zero() {
        let g = SeedGraph::build(b"spectrum");
        let features = TopologyFeatures::extract(&g).expect("convergence");
        assert_eq!(features.spectrum.len(), NODES);
        assert!(features.spectrum.windows(2).all(|w| w[0] <= w[1]));
        // Every graph has at least one zero Laplacian eigenvalue.
        assert!(features.spectrum[0].abs() < 1e-6);
    }
}
