//! Tests for seeded random choices and lowest-entropy cell selection

#[cfg(test)]
mod tests {
    use edgetile::algorithm::bitset::TileBitset;
    use edgetile::algorithm::selection::{RandomSelector, lowest_entropy_cells};
    use edgetile::spatial::grid::{Grid, Position};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    // Tests identical seeds give identical choice sequences
    // Verified by seeding from entropy
    #[test]
    fn test_seeded_reproducibility() {
        let items: Vec<usize> = (0..50).collect();
        let mut a = RandomSelector::new(7);
        let mut b = RandomSelector::new(7);

        let first: Vec<Option<usize>> = (0..20).map(|_| a.choose(&items)).collect();
        let second: Vec<Option<usize>> = (0..20).map(|_| b.choose(&items)).collect();
        assert_eq!(first, second);
    }

    // Tests a choice consumes exactly one bounded draw from the generator
    // Verified by drawing twice per choice
    #[test]
    fn test_choice_matches_single_draw() {
        let mut selector = RandomSelector::new(99);
        let mut reference = StdRng::seed_from_u64(99);

        for len in [3usize, 8, 1, 5] {
            let expected = reference.random_range(0..len);
            assert_eq!(selector.uniform_index(len), Some(expected));
        }
    }

    // Tests nothing is drawn from an empty slice
    // Verified by drawing from 0..1 for empty input
    #[test]
    fn test_empty_choice() {
        let mut selector = RandomSelector::new(1);
        assert_eq!(selector.choose::<usize>(&[]), None);
        assert_eq!(selector.uniform_index(0), None);
    }

    // Tests only the smallest undecided domains are candidates, in row-major order
    // Verified by selecting the largest domains
    #[test]
    fn test_lowest_entropy_cells() {
        let mut grid = Grid::new(3, 2, 4);
        for (x, y, tiles) in [(2, 0, &[0, 1][..]), (0, 1, &[1, 3][..]), (1, 1, &[2][..])] {
            if let Some(domain) = grid.domain_mut(Position::new(x, y)) {
                *domain = TileBitset::from_indices(tiles, 4);
            }
        }

        assert_eq!(
            lowest_entropy_cells(&grid),
            vec![Position::new(2, 0), Position::new(0, 1)]
        );
    }

    // Tests a decided grid has no candidates
    // Verified by including single-tile cells
    #[test]
    fn test_no_candidates_when_decided() {
        let grid = Grid::new(2, 2, 1);
        assert!(lowest_entropy_cells(&grid).is_empty());
    }
}
