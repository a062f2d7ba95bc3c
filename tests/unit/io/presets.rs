//! Tests for preset plan parsing, expansion and application

#[cfg(test)]
mod tests {
    use edgetile::algorithm::solver::GridSolver;
    use edgetile::analysis::rules::AdjacencyRules;
    use edgetile::io::error::ErrorKind;
    use edgetile::io::presets::{PresetEntry, PresetPlan, border_positions};
    use edgetile::spatial::grid::Position;
    use tempfile::TempDir;

    // Tests all three entry kinds parse in file order
    // Verified by sorting entries by kind
    #[test]
    fn test_parse_plan() {
        let plan = PresetPlan::from_yaml_str(
            "- border: {tile: 1}\n- cell: {x: 2, y: 3, tile: 0}\n- mask: {x: 0, y: 0, tile: 2, rows: ['#.']}\n",
        )
        .unwrap();

        assert_eq!(plan.entries().len(), 3);
        assert_eq!(plan.entries()[0], PresetEntry::Border { tile: 1 });
        assert_eq!(plan.entries()[1], PresetEntry::Cell { x: 2, y: 3, tile: 0 });
    }

    // Tests unknown entry kinds are rejected
    // Verified by ignoring unrecognised keys
    #[test]
    fn test_unknown_entry_rejected() {
        let error = PresetPlan::from_yaml_str("- circle: {tile: 1}\n").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::RuleLoad);
    }

    // Tests border cells run clockwise from the origin without repeats
    // Verified by walking the left column top-to-bottom
    #[test]
    fn test_border_clockwise() {
        assert_eq!(
            border_positions(3, 3),
            vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)]
        );
        assert_eq!(border_positions(3, 1), vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(border_positions(1, 3), vec![(0, 0), (0, 1), (0, 2)]);
        assert!(border_positions(0, 4).is_empty());
    }

    // Tests mask rows map marks to offsets from the anchor
    // Verified by swapping row and column offsets
    #[test]
    fn test_mask_expansion() {
        let mask = PresetEntry::Mask {
            x: 1,
            y: 2,
            tile: 4,
            rows: vec![".#".to_string(), "#.#".to_string()],
        };

        assert_eq!(mask.placements(10, 10), vec![(2, 2, 4), (1, 3, 4), (3, 3, 4)]);
    }

    // Tests applying a plan fixes the listed cells
    // Verified by skipping the last entry
    #[test]
    fn test_apply_to_solver() {
        let plan = PresetPlan::new(vec![
            PresetEntry::Border { tile: 1 },
            PresetEntry::Cell { x: 1, y: 1, tile: 0 },
        ]);
        let rules = AdjacencyRules::fully_connected(2);
        let mut solver = GridSolver::seeded(3, 3, &rules, 0).unwrap();

        assert_eq!(plan.apply_to(&mut solver).unwrap(), 9);
        let snapshot = solver.snapshot();
        assert_eq!(snapshot.get(Position::new(1, 1)), Some(0));
        assert_eq!(snapshot.get(Position::new(2, 2)), Some(1));
        assert_eq!(snapshot.decided_count(), 9);
    }

    // Tests placements outside the grid surface the solver's bounds error
    // Verified by clipping the mask to the grid
    #[test]
    fn test_apply_out_of_bounds() {
        let plan = PresetPlan::new(vec![PresetEntry::Mask {
            x: 1,
            y: 0,
            tile: 0,
            rows: vec!["##".to_string()],
        }]);
        let rules = AdjacencyRules::fully_connected(2);
        let mut solver = GridSolver::seeded(2, 2, &rules, 0).unwrap();

        let error = plan.apply_to(&mut solver).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Bounds);
        assert_eq!(solver.snapshot().get(Position::new(1, 0)), Some(0));
    }

    // Tests plans load from disk
    // Verified by reading the file as a single entry
    #[test]
    fn test_load_plan() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.yaml");
        std::fs::write(&path, "- cell: {x: 0, y: 0, tile: 1}\n- cell: {x: 1, y: 0, tile: 1}\n").unwrap();

        let plan = PresetPlan::load(&path).unwrap();
        assert_eq!(plan.expand(4, 4), vec![(0, 0, 1), (1, 0, 1)]);
        assert!(!plan.is_empty());
    }
}
