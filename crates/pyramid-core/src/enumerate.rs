//! Enumeration of tile triples drawn without repetition from a tile set.
//!
//! Two policies exist because they serve different callers: target selection
//! needs every ordered triple (order changes the outcome, and every order is
//! a legitimate attempt), while the player-facing solution list wants one
//! canonical ascending-index ordering per tile combination.
//!
//! Both enumerations are lazy, finite, and restartable: each call builds a
//! fresh iterator from the slice with no hidden cursor.

use crate::Tile;

/// Number of ordered triples of distinct tiles: `N·(N−1)·(N−2)`.
pub fn ordered_triple_count(n: usize) -> usize {
    if n < 3 {
        0
    } else {
        n * (n - 1) * (n - 2)
    }
}

/// Number of unordered combinations: `C(N,3)`.
pub fn combination_count(n: usize) -> usize {
    if n < 3 {
        0
    } else {
        n * (n - 1) * (n - 2) / 6
    }
}

/// All ordered triples of three distinct tiles.
///
/// Distinct-index iteration guarantees no tile is reused within one triple.
pub fn ordered_triples(tiles: &[Tile]) -> impl Iterator<Item = (&Tile, &Tile, &Tile)> + '_ {
    let n = tiles.len();
    (0..n).flat_map(move |i| {
        (0..n).filter(move |&j| j != i).flat_map(move |j| {
            (0..n)
                .filter(move |&k| k != i && k != j)
                .map(move |k| (&tiles[i], &tiles[j], &tiles[k]))
        })
    })
}

/// All index triples `i < j < k`, each yielded once in ascending-index order.
pub fn combination_triples(tiles: &[Tile]) -> impl Iterator<Item = (&Tile, &Tile, &Tile)> + '_ {
    let n = tiles.len();
    (0..n).flat_map(move |i| {
        (i + 1..n)
            .flat_map(move |j| (j + 1..n).map(move |k| (&tiles[i], &tiles[j], &tiles[k])))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Operator;

    fn tiles(n: u32) -> Vec<Tile> {
        (1..=n).map(|id| Tile::new(id, Operator::Add, 1)).collect()
    }

    #[test]
    fn test_counts_match_closed_forms() {
        for n in [3usize, 4, 10] {
            let set = tiles(n as u32);
            assert_eq!(ordered_triples(&set).count(), ordered_triple_count(n));
            assert_eq!(combination_triples(&set).count(), combination_count(n));
        }
        assert_eq!(ordered_triple_count(10), 720);
        assert_eq!(combination_count(10), 120);
    }

    #[test]
    fn test_degenerate_sets_enumerate_nothing() {
        for n in 0..3u32 {
            let set = tiles(n);
            assert_eq!(ordered_triples(&set).count(), 0);
            assert_eq!(combination_triples(&set).count(), 0);
            assert_eq!(ordered_triple_count(n as usize), 0);
            assert_eq!(combination_count(n as usize), 0);
        }
    }

    #[test]
    fn test_no_tile_repeated_within_a_triple() {
        let set = tiles(5);
        for (a, b, c) in ordered_triples(&set) {
            assert!(a.id != b.id && a.id != c.id && b.id != c.id);
        }
    }

    #[test]
    fn test_ordered_triples_are_unique_attempts() {
        let set = tiles(4);
        let mut seen = std::collections::HashSet::new();
        for (a, b, c) in ordered_triples(&set) {
            assert!(seen.insert([a.id, b.id, c.id]), "duplicate ordered triple");
        }
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_combinations_are_ascending() {
        let set = tiles(5);
        for (a, b, c) in combination_triples(&set) {
            assert!(a.id < b.id && b.id < c.id);
        }
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let set = tiles(4);
        let first: Vec<_> = ordered_triples(&set).map(|(a, b, c)| [a.id, b.id, c.id]).collect();
        let second: Vec<_> = ordered_triples(&set).map(|(a, b, c)| [a.id, b.id, c.id]).collect();
        assert_eq!(first, second);
    }
}
