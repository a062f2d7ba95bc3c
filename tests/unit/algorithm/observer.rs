//! Tests for presenter adapters and their combination

#[cfg(test)]
mod tests {
    use edgetile::algorithm::observer::{Callback, CancelWhen, SolveObserver};
    use edgetile::algorithm::solver::CollapseRecord;
    use edgetile::spatial::grid::{Grid, GridSnapshot, Position};

    fn record() -> CollapseRecord {
        CollapseRecord {
            position: Position::new(0, 0),
            tile: 0,
        }
    }

    // Tests the closure adapter fires on every step and at the end
    // Verified by leaving on_finish as the default no-op
    #[test]
    fn test_callback_counts_frames() {
        let snapshot = Grid::new(2, 2, 2).snapshot();
        let mut frames = 0;
        {
            let mut callback = Callback(|_: &GridSnapshot| frames += 1);
            callback.on_step(&snapshot, &record());
            callback.on_step(&snapshot, &record());
            callback.on_finish(&snapshot);
            assert!(!callback.should_cancel());
        }
        assert_eq!(frames, 3);
    }

    // Tests a pair cancels when either side asks to
    // Verified by requiring both sides to cancel
    #[test]
    fn test_pair_cancellation() {
        let mut pair = (CancelWhen(|| false), CancelWhen(|| true));
        assert!(pair.should_cancel());

        let mut neither = (CancelWhen(|| false), ());
        assert!(!neither.should_cancel());
    }

    // Tests an absent optional presenter does nothing
    // Verified by treating None as cancelled
    #[test]
    fn test_optional_presenter() {
        let mut absent: Option<CancelWhen<fn() -> bool>> = None;
        assert!(!absent.should_cancel());

        let mut present = Some(CancelWhen(|| true));
        assert!(present.should_cancel());
    }
}
