//! Part ordering strategies applied before packing.

use crate::config::SortOrder;
use crate::model::Part;
use std::cmp::Ordering;

impl SortOrder {
    /// Compare two parts; `Less` means `a` is packed first.
    pub fn compare(&self, a: &Part, b: &Part) -> Ordering {
        match self {
            SortOrder::WidthDepth => b
                .width
                .total_cmp(&a.width)
                .then(b.depth.total_cmp(&a.depth)),
            SortOrder::DepthWidth => b
                .depth
                .total_cmp(&a.depth)
                .then(b.width.total_cmp(&a.width)),
            SortOrder::Input => Ordering::Equal,
        }
    }
}

/// Return the parts in packing order. The sort is stable, so equal keys keep input order.
pub fn order_parts(parts: &[Part], order: SortOrder) -> Vec<&Part> {
    let mut ordered: Vec<&Part> = parts.iter().collect();
    ordered.sort_by(|a, b| order.compare(a, b));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> Vec<Part> {
        vec![
            Part::new("narrow-deep", 300.0, 800.0).unwrap(),
            Part::new("wide-1", 900.0, 300.0).unwrap(),
            Part::new("wide-deeper", 900.0, 450.0).unwrap(),
            Part::new("wide-2", 900.0, 300.0).unwrap(),
        ]
    }

    fn names(ordered: &[&Part]) -> Vec<String> {
        ordered.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_width_depth_descending() {
        let parts = parts();
        let ordered = order_parts(&parts, SortOrder::WidthDepth);
        assert_eq!(
            names(&ordered),
            ["wide-deeper", "wide-1", "wide-2", "narrow-deep"]
        );
    }

    #[test]
    fn test_depth_width_descending() {
        let parts = parts();
        let ordered = order_parts(&parts, SortOrder::DepthWidth);
        assert_eq!(
            names(&ordered),
            ["narrow-deep", "wide-deeper", "wide-1", "wide-2"]
        );
    }

    #[test]
    fn test_input_order_preserved() {
        let parts = parts();
        let ordered = order_parts(&parts, SortOrder::Input);
        assert_eq!(
            names(&ordered),
            ["narrow-deep", "wide-1", "wide-deeper", "wide-2"]
        );
    }
}
