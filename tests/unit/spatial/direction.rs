//! Tests for directions and per-direction tables

#[cfg(test)]
mod tests {
    use edgetile::spatial::direction::{Direction, DirectionTable};

    // Tests every direction is its opposite's opposite
    // Verified by mapping Left to Left
    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::ALL {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::Top.opposite(), Direction::Bottom);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }

    // Tests offsets point up, down, left and right with y growing downwards
    // Verified by swapping the Top and Bottom offsets
    #[test]
    fn test_offsets() {
        assert_eq!(Direction::Top.offset(), (0, -1));
        assert_eq!(Direction::Bottom.offset(), (0, 1));
        assert_eq!(Direction::Left.offset(), (-1, 0));
        assert_eq!(Direction::Right.offset(), (1, 0));
    }

    // Tests table order is Top, Bottom, Left, Right
    // Verified by reordering Direction::ALL
    #[test]
    fn test_table_order() {
        let table = DirectionTable::from_fn(Direction::name);
        let names: Vec<&str> = table.iter().map(|(_, name)| *name).collect();
        assert_eq!(names, vec!["top", "bottom", "left", "right"]);
    }

    // Tests get_mut writes only the requested slot
    // Verified by returning the Top slot for every direction
    #[test]
    fn test_get_mut_targets_one_slot() {
        let mut table: DirectionTable<usize> = DirectionTable::default();
        *table.get_mut(Direction::Left) = 7;

        assert_eq!(*table.get(Direction::Left), 7);
        assert_eq!(*table.get(Direction::Top), 0);
        assert_eq!(*table.get(Direction::Right), 0);
    }

    // Tests map passes each direction with its own value
    // Verified by ignoring the value argument
    #[test]
    fn test_map() {
        let table = DirectionTable::from_fn(|direction| direction.offset().0);
        let mapped = table.map(|direction, dx| format!("{direction}:{dx}"));
        assert_eq!(mapped.get(Direction::Right), "right:1");
        assert_eq!(mapped.get(Direction::Left), "left:-1");
    }
}
