//! Tests for generation defaults and parameter validation

#[cfg(test)]
mod tests {
    use edgetile::AlgorithmError;
    use edgetile::analysis::edges::{ChannelMode, EdgePolicy};
    use edgetile::io::configuration::{
        DEFAULT_GRID_SIZE, DEFAULT_SEED, DEFAULT_TILE_SIZE, DEFAULT_TOLERANCE, GenerationConfig,
        MAX_CANVAS_DIMENSION, MAX_GRID_DIMENSION,
    };

    // Tests defaults follow the documented constants
    // Verified by changing the default tolerance
    #[test]
    fn test_defaults() {
        let config = GenerationConfig::default();

        assert_eq!(config.tile_size, DEFAULT_TILE_SIZE);
        assert_eq!(config.grid_width, DEFAULT_GRID_SIZE);
        assert_eq!(config.grid_height, DEFAULT_GRID_SIZE);
        assert!((config.tolerance - DEFAULT_TOLERANCE).abs() < f64::EPSILON);
        assert_eq!(config.edge_policy, EdgePolicy::Averaged);
        assert_eq!(config.channel_mode, ChannelMode::PerChannel);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert!(config.validate().is_ok());
    }

    // Tests each out-of-range parameter is named in the error
    // Verified by skipping the grid height check
    #[test]
    fn test_validation_names_parameter() {
        let cases = [
            (GenerationConfig { tile_size: 0, ..GenerationConfig::default() }, "tile_size"),
            (GenerationConfig { grid_width: 0, ..GenerationConfig::default() }, "grid_width"),
            (
                GenerationConfig {
                    grid_height: MAX_GRID_DIMENSION + 1,
                    ..GenerationConfig::default()
                },
                "grid_height",
            ),
            (GenerationConfig { tolerance: -1.0, ..GenerationConfig::default() }, "tolerance"),
            (GenerationConfig { tolerance: f64::NAN, ..GenerationConfig::default() }, "tolerance"),
            (GenerationConfig { tolerance: 300.0, ..GenerationConfig::default() }, "tolerance"),
            (GenerationConfig { min_tiles: 0, ..GenerationConfig::default() }, "min_tiles"),
        ];

        for (config, expected) in cases {
            match config.validate() {
                Err(AlgorithmError::InvalidParameter { parameter, .. }) => {
                    assert_eq!(parameter, expected);
                }
                other => unreachable!("Expected InvalidParameter for {expected}, got {other:?}"),
            }
        }
    }

    // Tests a grid whose image would exceed the canvas limit is rejected up front
    // Verified by only checking the grid dimension limit
    #[test]
    fn test_canvas_limit() {
        let fits = GenerationConfig {
            tile_size: 64,
            grid_width: MAX_CANVAS_DIMENSION / 64,
            ..GenerationConfig::default()
        };
        assert!(fits.validate().is_ok());
        assert!(fits.validate_canvas().is_ok());

        let largest = GenerationConfig {
            tile_size: 4096,
            grid_height: MAX_GRID_DIMENSION,
            ..GenerationConfig::default()
        };
        assert!(largest.validate().is_ok());
        match largest.validate_canvas() {
            Err(AlgorithmError::InvalidParameter { parameter, .. }) => assert_eq!(parameter, "grid_width"),
            other => unreachable!("Expected InvalidParameter, got {other:?}"),
        }
    }

    // Tests the rule builder carries the configured tolerance
    // Verified by building with the default tolerance
    #[test]
    fn test_rule_builder_tolerance() {
        let config = GenerationConfig {
            tolerance: 3.5,
            ..GenerationConfig::default()
        };
        assert!((config.rule_builder().tolerance() - 3.5).abs() < f64::EPSILON);
    }
}
