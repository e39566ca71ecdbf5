//! Rectangular congestion cells and point lookup

use geo::{Coord, Intersects, Rect};

use crate::Error;

/// Axis-aligned cell with a congestion level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CongestionCell {
    pub bounds: Rect<f64>,
    /// Traffic load multiplier, `1.0` meaning unloaded
    pub level: f64,
}

impl CongestionCell {
    /// Boundaries are inclusive on all four sides.
    pub fn contains(&self, point: Coord<f64>) -> bool {
        self.bounds.intersects(&point)
    }

    pub fn top_left(&self) -> Coord<f64> {
        self.bounds.min()
    }

    pub fn bottom_right(&self) -> Coord<f64> {
        self.bounds.max()
    }
}

/// Ordered collection of congestion cells.
///
/// Cells are expected to be disjoint. Where they overlap, lookups
/// resolve to the first matching cell in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CongestionMap {
    cells: Vec<CongestionCell>,
}

impl CongestionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a cell or, if a cell with the same corners exists, replaces
    /// its level in place, keeping its position in the lookup order.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is negative or not finite, or if
    /// `top_left` is not above and left of `bottom_right`.
    pub fn insert(
        &mut self,
        top_left: impl Into<Coord<f64>>,
        bottom_right: impl Into<Coord<f64>>,
        level: f64,
    ) -> Result<(), Error> {
        if !level.is_finite() || level < 0.0 {
            return Err(Error::InvalidData(format!(
                "Congestion level must be a finite non-negative number, got {level}"
            )));
        }

        let top_left: Coord<f64> = top_left.into();
        let bottom_right: Coord<f64> = bottom_right.into();
        if !(top_left.x <= bottom_right.x && top_left.y <= bottom_right.y) {
            return Err(Error::InvalidData(format!(
                "Congestion cell corners are inverted: {top_left:?} to {bottom_right:?}"
            )));
        }

        let bounds = Rect::new(top_left, bottom_right);
        match self.cells.iter_mut().find(|cell| cell.bounds == bounds) {
            Some(cell) => cell.level = level,
            None => self.cells.push(CongestionCell { bounds, level }),
        }
        Ok(())
    }

    /// First cell containing the point
    pub fn cell_at(&self, point: Coord<f64>) -> Option<&CongestionCell> {
        self.cells.iter().find(|cell| cell.contains(point))
    }

    /// Congestion level of the first cell containing the point
    pub fn level_at(&self, point: Coord<f64>) -> Option<f64> {
        self.cell_at(point).map(|cell| cell.level)
    }

    pub fn cells(&self) -> &[CongestionCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<CongestionCell> for CongestionMap {
    fn from_iter<I: IntoIterator<Item = CongestionCell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_inclusive() {
        let mut map = CongestionMap::new();
        map.insert((0.0, 0.0), (10.0, 10.0), 3.0).unwrap();

        assert_eq!(map.level_at(Coord { x: 0.0, y: 0.0 }), Some(3.0));
        assert_eq!(map.level_at(Coord { x: 10.0, y: 10.0 }), Some(3.0));
        assert_eq!(map.level_at(Coord { x: 5.0, y: 10.0 }), Some(3.0));
        assert_eq!(map.level_at(Coord { x: 10.1, y: 5.0 }), None);
    }

    #[test]
    fn overlapping_cells_resolve_to_first_inserted() {
        let mut map = CongestionMap::new();
        map.insert((0.0, 0.0), (10.0, 10.0), 2.0).unwrap();
        map.insert((5.0, 5.0), (20.0, 20.0), 7.0).unwrap();

        assert_eq!(map.level_at(Coord { x: 7.0, y: 7.0 }), Some(2.0));
        assert_eq!(map.level_at(Coord { x: 15.0, y: 15.0 }), Some(7.0));
    }

    #[test]
    fn reinserting_keeps_order() {
        let mut map = CongestionMap::new();
        map.insert((0.0, 0.0), (10.0, 10.0), 2.0).unwrap();
        map.insert((5.0, 5.0), (20.0, 20.0), 7.0).unwrap();
        map.insert((0.0, 0.0), (10.0, 10.0), 4.0).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.cells()[0].level, 4.0);
        assert_eq!(map.level_at(Coord { x: 7.0, y: 7.0 }), Some(4.0));
    }

    #[test]
    fn rejects_negative_levels() {
        let mut map = CongestionMap::new();
        assert!(map.insert((0.0, 0.0), (1.0, 1.0), -1.0).is_err());
        assert!(map.insert((0.0, 0.0), (1.0, 1.0), f64::NAN).is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn rejects_inverted_corners() {
        let mut map = CongestionMap::new();
        assert!(matches!(
            map.insert((10.0, 10.0), (0.0, 0.0), 3.0),
            Err(Error::InvalidData(_))
        ));
        assert!(map.insert((0.0, 10.0), (10.0, 0.0), 3.0).is_err());
        assert!(map.is_empty());
        assert_eq!(map.level_at(Coord { x: 5.0, y: 5.0 }), None);

        // degenerate cells are still accepted
        map.insert((2.0, 2.0), (2.0, 8.0), 1.0).unwrap();
        assert_eq!(map.level_at(Coord { x: 2.0, y: 5.0 }), Some(1.0));
    }
}
