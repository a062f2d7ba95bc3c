//! Tests for edge signature extraction and tolerance matching

#[cfg(test)]
mod tests {
    use edgetile::analysis::edges::{
        ChannelMode, EdgeExtractor, EdgePolicy, EdgeSignature, is_similar,
    };
    use edgetile::spatial::direction::Direction;
    use edgetile::spatial::tiles::Tile;
    use ndarray::Array3;

    // Row 0 red, row 1 blue
    fn striped() -> Tile {
        let raster = Array3::from_shape_fn((2, 2, 3), |(row, _, channel)| match (row, channel) {
            (0, 0) | (1, 2) => 255,
            _ => 0,
        });
        Tile::new("striped".to_string(), raster)
    }

    // Tests averaged signatures hold one mean per channel
    // Verified by averaging over channels instead of border pixels
    #[test]
    fn test_averaged_signature() {
        let extractor = EdgeExtractor::default();
        let tile = striped();

        assert_eq!(extractor.signature(&tile, Direction::Top).values(), &[255.0, 0.0, 0.0]);
        assert_eq!(extractor.signature(&tile, Direction::Bottom).values(), &[0.0, 0.0, 255.0]);
        assert_eq!(extractor.signature(&tile, Direction::Left).values(), &[127.5, 0.0, 127.5]);
    }

    // Tests exact signatures keep every border pixel with channels interleaved
    // Verified by reading the right border bottom-to-top
    #[test]
    fn test_exact_signature() {
        let extractor = EdgeExtractor::new(EdgePolicy::Exact, ChannelMode::PerChannel);
        let tile = striped();

        assert_eq!(
            extractor.signature(&tile, Direction::Right).values(),
            &[255.0, 0.0, 0.0, 0.0, 0.0, 255.0]
        );
        assert_eq!(extractor.signature(&tile, Direction::Top).len(), 6);
    }

    // Tests grayscale mode reduces to one luma value per border pixel
    // Verified by keeping the colour channels
    #[test]
    fn test_grayscale_signature() {
        let extractor = EdgeExtractor::new(EdgePolicy::Averaged, ChannelMode::Grayscale);
        let signature = extractor.signature(&striped(), Direction::Top);

        assert_eq!(signature.len(), 1);
        assert!((signature.values()[0] - 76.245).abs() < 1e-9);
    }

    // Tests the tolerance bound is inclusive
    // Verified by using a strict comparison
    #[test]
    fn test_similarity_tolerance() {
        let a = EdgeSignature::new(vec![10.0, 20.0]);
        let b = EdgeSignature::new(vec![25.0, 20.0]);

        assert!(is_similar(&a, &b, 15.0));
        assert!(!is_similar(&a, &b, 14.9));
        assert!(is_similar(&a, &a, 0.0));
    }

    // Tests signatures of different lengths never match
    // Verified by comparing the common prefix only
    #[test]
    fn test_length_mismatch() {
        let short = EdgeSignature::new(vec![1.0]);
        let long = EdgeSignature::new(vec![1.0, 1.0]);
        assert!(!is_similar(&short, &long, 255.0));
    }
}
