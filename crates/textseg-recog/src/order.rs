//! Reading order
//!
//! Regions are read top to bottom, then left to right, by the top-left
//! corner of their boxes. Multi-column pages are therefore not read column
//! by column.

use crate::region::Region;
use textseg_core::Boxa;

/// Sort boxes into reading order and number them from 1.
///
/// The sort is by `(y, x)` and stable: boxes with the same top-left corner
/// keep their input order.
pub fn order_regions(mut boxes: Boxa) -> Vec<Region> {
    boxes.sort_by_position();
    boxes
        .into_iter()
        .zip(1u32..)
        .map(|(b, id)| Region::new(id, b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use textseg_core::Box;

    #[test]
    fn test_order_top_to_bottom_then_left_to_right() {
        let boxes: Boxa = [
            Box::new_unchecked(100, 500, 200, 50),
            Box::new_unchecked(400, 100, 200, 50),
            Box::new_unchecked(10, 100, 200, 50),
        ]
        .into_iter()
        .collect();
        let regions = order_regions(boxes);
        let ids: Vec<u32> = regions.iter().map(|r| r.region_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(regions[0].bounds.x, 10);
        assert_eq!(regions[1].bounds.x, 400);
        assert_eq!(regions[2].bounds.y, 500);
    }

    #[test]
    fn test_order_ties_are_stable() {
        let boxes: Boxa = [
            Box::new_unchecked(5, 5, 100, 20),
            Box::new_unchecked(5, 5, 60, 40),
        ]
        .into_iter()
        .collect();
        let regions = order_regions(boxes);
        assert_eq!(regions[0].bounds.w, 100);
        assert_eq!(regions[1].bounds.w, 60);
    }

    #[test]
    fn test_order_empty() {
        assert!(order_regions(Boxa::new()).is_empty());
    }
}
