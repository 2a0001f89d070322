//! k-clique enumeration in k-partite graphs.
//!
//! Every k-clique with exactly one vertex per partition corresponds to a
//! complete parameter binding that survives all pairwise consistency
//! checks. The graphs are very sparse in practice (few atoms hold relative
//! to the number of possible atoms), so the number of such cliques stays
//! small. Partitions are processed smallest-first, and candidates are
//! narrowed by intersecting adjacency rows.

use roaring::RoaringBitmap;

/// Enumerate all cliques with one vertex per partition.
///
/// `adjacency[v]` holds the neighbors of vertex `v`; `partitions` lists the
/// vertex indices of each partition. Cliques are emitted as one vertex index
/// per partition, ordered by the original partition order, and the emission
/// order is deterministic for a given input.
pub fn find_k_cliques_in_k_partite_graph(
    adjacency: &[RoaringBitmap],
    partitions: &[Vec<usize>],
    out_cliques: &mut Vec<Vec<usize>>,
) {
    let k = partitions.len();
    if k == 0 {
        return;
    }
    if partitions.iter().any(|partition| partition.is_empty()) {
        return;
    }

    // Visit small partitions first; fewer branches near the root.
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by_key(|&p| (partitions[p].len(), p));

    let mut chosen: Vec<usize> = Vec::with_capacity(k);
    let mut allowed = RoaringBitmap::new();
    for partition in partitions {
        for &vertex in partition {
            allowed.insert(vertex as u32);
        }
    }

    extend(adjacency, partitions, &order, &allowed, &mut chosen, out_cliques);
}

fn extend(
    adjacency: &[RoaringBitmap],
    partitions: &[Vec<usize>],
    order: &[usize],
    allowed: &RoaringBitmap,
    chosen: &mut Vec<usize>,
    out_cliques: &mut Vec<Vec<usize>>,
) {
    let depth = chosen.len();
    if depth == order.len() {
        // Restore the original partition order for the caller.
        let mut clique = vec![0usize; order.len()];
        for (position, &vertex) in chosen.iter().enumerate() {
            clique[order[position]] = vertex;
        }
        out_cliques.push(clique);
        return;
    }

    let partition = &partitions[order[depth]];
    for &vertex in partition {
        if !allowed.contains(vertex as u32) {
            continue;
        }
        let narrowed = allowed & &adjacency[vertex];

        // Every remaining partition must keep at least one candidate.
        let viable = order[depth + 1..].iter().all(|&p| {
            partitions[p]
                .iter()
                .any(|&candidate| narrowed.contains(candidate as u32))
        });
        if !viable {
            continue;
        }

        chosen.push(vertex);
        extend(adjacency, partitions, order, &narrowed, chosen, out_cliques);
        chosen.pop();
    }
}
