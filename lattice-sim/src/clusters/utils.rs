use crate::geometry::{Lattice, N_NEIGHBORS};

/// Marker value for a site not (yet) in the cluster.
pub const UNVISITED: i8 = 1;
/// Marker value for a site included in the cluster.
pub const VISITED: i8 = -1;

// --- Pre-order cluster growth ---
//
// Equivalent to the recursive flood fill
//
//     visit(site):
//         mark site
//         for nb in neighbors(site):          // canonical order
//             if should_add(site, nb) and nb unmarked:
//                 visit(nb)
//
// with an explicit stack of (site, next neighbour slot) frames so deep
// clusters on large lattices cannot overflow the call stack. `should_add` is
// called before the marker test, exactly as often and in the same order as
// in the recursive form; this matters when the closure consumes random
// numbers.

/// Grow a cluster from `seed`, depth-first and pre-order. Returns the number
/// of sites marked.
///
/// Caller owns buffers: `marker` must be all [`UNVISITED`], `stack` must be
/// empty. Included sites are set to [`VISITED`].
#[inline]
pub(super) fn preorder_cluster(
    lattice: &Lattice,
    seed: usize,
    marker: &mut [i8],
    stack: &mut Vec<(usize, usize)>,
    mut should_add: impl FnMut(usize, usize) -> bool,
) -> usize {
    marker[seed] = VISITED;
    stack.push((seed, 0));
    let mut size = 1;

    while let Some(frame) = stack.last_mut() {
        let (site, slot) = *frame;
        if slot == N_NEIGHBORS {
            stack.pop();
            continue;
        }
        frame.1 += 1;

        let nb = lattice.neighbor(site, slot);
        if should_add(site, nb) && marker[nb] == UNVISITED {
            marker[nb] = VISITED;
            size += 1;
            stack.push((nb, 0));
        }
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // 4×4 periodic lattice:
    //
    //    0  1  2  3
    //    4  5  6  7
    //    8  9 10 11
    //   12 13 14 15
    //
    // Canonical neighbour order: down, up, right, left (all wrapping).

    fn lattice_4x4() -> Lattice {
        Lattice::new(4).unwrap()
    }

    fn cluster_of(marker: &[i8]) -> HashSet<usize> {
        (0..marker.len()).filter(|&i| marker[i] == VISITED).collect()
    }

    /// Recursive reference used to pin down visiting order.
    fn recursive(
        lattice: &Lattice,
        site: usize,
        marker: &mut [i8],
        should_add: &mut impl FnMut(usize, usize) -> bool,
    ) {
        marker[site] = VISITED;
        for nb in lattice.neighbors(site) {
            if should_add(site, nb) && marker[nb] == UNVISITED {
                recursive(lattice, nb, marker, should_add);
            }
        }
    }

    // Undirected bonds:
    //
    //    0 ── 1    2    3 ── (0, periodic)
    //    │
    //    4    5    6    7
    //
    //    8    9   10 ── 11
    //              │
    //   12   13   14   15
    //
    // Clusters: {0,1,3,4}, {10,11,14}, 9 singletons

    fn bond_set() -> HashSet<(usize, usize)> {
        let bonds = [(0, 1), (0, 4), (3, 0), (10, 11), (10, 14)];
        bonds
            .iter()
            .flat_map(|&(a, b)| [(a, b), (b, a)])
            .collect()
    }

    #[test]
    fn test_bond_clusters() {
        let lattice = lattice_4x4();
        let bonds = bond_set();
        let mut stack = Vec::new();

        for (seed, expected) in [
            (0, vec![0, 1, 3, 4]),
            (10, vec![10, 11, 14]),
            (7, vec![7]),
        ] {
            let mut marker = vec![UNVISITED; lattice.n_spins];
            let size = preorder_cluster(&lattice, seed, &mut marker, &mut stack, |s, nb| {
                bonds.contains(&(s, nb))
            });
            assert!(stack.is_empty());
            assert_eq!(size, expected.len());
            assert_eq!(cluster_of(&marker), expected.into_iter().collect());
        }
    }

    #[test]
    fn test_matches_recursive_call_sequence() {
        // The closure answers from a fixed script; both traversals must ask
        // the same questions in the same order and mark the same sites.
        let lattice = lattice_4x4();
        let script: Vec<bool> = (0..200).map(|k| (k * 7 + 3) % 5 < 3).collect();

        let mut calls_iter = Vec::new();
        let mut marker_iter = vec![UNVISITED; lattice.n_spins];
        let mut k = 0;
        preorder_cluster(&lattice, 5, &mut marker_iter, &mut Vec::new(), |s, nb| {
            calls_iter.push((s, nb));
            k += 1;
            script[k - 1]
        });

        let mut calls_rec = Vec::new();
        let mut marker_rec = vec![UNVISITED; lattice.n_spins];
        let mut k = 0;
        recursive(&lattice, 5, &mut marker_rec, &mut |s, nb| {
            calls_rec.push((s, nb));
            k += 1;
            script[k - 1]
        });

        assert_eq!(calls_iter, calls_rec);
        assert_eq!(marker_iter, marker_rec);
    }

    #[test]
    fn test_always_add_covers_lattice_without_revisits() {
        let lattice = Lattice::new(64).unwrap();
        let mut marker = vec![UNVISITED; lattice.n_spins];
        let size = preorder_cluster(&lattice, 0, &mut marker, &mut Vec::new(), |_, _| true);
        assert_eq!(size, lattice.n_spins);
        assert!(marker.iter().all(|&m| m == VISITED));
    }
}
