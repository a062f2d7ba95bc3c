//! Tests for YAML rule file reading, writing and the create-if-missing fallback

#[cfg(test)]
mod tests {
    use edgetile::AlgorithmError;
    use edgetile::analysis::rules::AdjacencyRules;
    use edgetile::io::error::ErrorKind;
    use edgetile::io::rule_store::{from_yaml_str, load, load_for_tiles, load_or_create, save};
    use edgetile::spatial::direction::{Direction, DirectionTable};
    use std::fs;
    use tempfile::TempDir;

    const TWO_TILES: &str = "
0:
  top: [0, 1]
  bottom: [1]
  left: []
  right: [0]
1:
  top: [0]
  bottom: [0, 1]
  left: [1]
  right: []
";

    // Tests every list is read into the matching direction
    // Verified by swapping the left and right fields
    #[test]
    fn test_parse_rules() {
        let rules = from_yaml_str(TWO_TILES).unwrap();

        assert_eq!(rules.tile_count(), 2);
        assert_eq!(rules.allowed(0, Direction::Top), &[0, 1]);
        assert_eq!(rules.allowed(0, Direction::Right), &[0]);
        assert!(rules.allowed(0, Direction::Left).is_empty());
        assert_eq!(rules.allowed(1, Direction::Left), &[1]);
    }

    // Tests a saved table loads back unchanged, asymmetry included
    // Verified by symmetrising lists on save
    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("rules.yaml");
        let rules = from_yaml_str(TWO_TILES).unwrap();

        save(&rules, &path).unwrap();
        assert_eq!(load(&path).unwrap(), rules);
    }

    // Tests missing directions are rejected rather than defaulted
    // Verified by adding serde defaults to the entry fields
    #[test]
    fn test_missing_direction_rejected() {
        let error = from_yaml_str("0:\n  top: [0]\n  bottom: [0]\n  left: [0]\n").unwrap_err();
        assert!(matches!(error, AlgorithmError::RuleFormat { .. }));
    }

    // Tests gaps in the tile keys are rejected
    // Verified by renumbering entries in order
    #[test]
    fn test_key_gap_rejected() {
        let text = "0: {top: [], bottom: [], left: [], right: []}\n2: {top: [], bottom: [], left: [], right: []}\n";
        assert_eq!(from_yaml_str(text).map_err(|e| e.kind()), Err(ErrorKind::RuleLoad));
    }

    // Tests a document without tile entries is an error, not an empty table
    // Verified by letting an empty map through as a zero-tile table
    #[test]
    fn test_empty_document_rejected() {
        let dir = TempDir::new().unwrap();

        for (name, text) in [("blank.yaml", ""), ("braces.yaml", "{}")] {
            assert_eq!(from_yaml_str(text).map_err(|e| e.kind()), Err(ErrorKind::RuleLoad));

            let path = dir.path().join(name);
            fs::write(&path, text).unwrap();
            assert_eq!(load(&path).map_err(|e| e.kind()), Err(ErrorKind::RuleLoad));
        }
    }

    // Tests references to unknown tiles are rejected
    // Verified by dropping the index range check
    #[test]
    fn test_dangling_reference_rejected() {
        let text = "0: {top: [3], bottom: [], left: [], right: []}\n";
        assert!(from_yaml_str(text).is_err());
    }

    // Tests a missing file is a rule load error naming the path
    // Verified by returning an empty table instead
    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");

        match load(&path) {
            Err(AlgorithmError::RuleLoad { path: Some(reported), .. }) => assert_eq!(reported, path),
            other => unreachable!("Expected RuleLoad error, got {other:?}"),
        }
        assert!(!path.exists());
    }

    // Tests the fallback writes empty lists for every tile
    // Verified by writing a fully connected table instead
    #[test]
    fn test_load_or_create() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.yaml");

        let rules = load_or_create(&path, 3).unwrap();
        assert_eq!(rules, AdjacencyRules::empty(3));
        assert_eq!(rules.isolated_tiles(), vec![0, 1, 2]);
        assert!(fs::read_to_string(&path).unwrap().contains("top: []"));

        // an existing file is left alone
        let custom = AdjacencyRules::new(vec![DirectionTable::from_fn(|_| vec![0])]);
        save(&custom, &path).unwrap();
        assert_eq!(load_or_create(&path, 1).unwrap(), custom);
    }

    // Tests the table must describe exactly the loaded tile set
    // Verified by skipping the tile count check
    #[test]
    fn test_load_for_tiles_count_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.yaml");
        save(&AdjacencyRules::fully_connected(2), &path).unwrap();

        assert!(load_for_tiles(&path, 2, false).is_ok());
        match load_for_tiles(&path, 3, false) {
            Err(AlgorithmError::RuleLoad { path: Some(reported), .. }) => assert_eq!(reported, path),
            other => unreachable!("Expected RuleLoad error, got {other:?}"),
        }
    }
}
