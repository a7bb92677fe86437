//! Ordered storage of user-placed anchor points.

use glam::DVec3;

/// Anchor points in placement order.
///
/// Anchors are append-only: once placed they are never moved, reordered or
/// removed. Consecutive pairs define the curve segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorStore {
    points: Vec<DVec3>,
}

impl AnchorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an existing sequence of anchors.
    pub fn from_points(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    /// Append an anchor and return its index.
    pub fn push(&mut self, point: DVec3) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Get an anchor by index.
    pub fn get(&self, index: usize) -> Option<DVec3> {
        self.points.get(index).copied()
    }

    /// All anchors in placement order.
    pub fn as_slice(&self) -> &[DVec3] {
        &self.points
    }

    /// Iterate over anchors in placement order.
    pub fn iter(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.points.iter().copied()
    }

    /// Number of anchors.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if no anchor has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments, `max(0, len - 1)`.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Iterate over consecutive anchor pairs as `(segment index, start, end)`.
    pub fn segments(&self) -> impl Iterator<Item = (usize, DVec3, DVec3)> + '_ {
        self.points
            .windows(2)
            .enumerate()
            .map(|(i, pair)| (i, pair[0], pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_index() {
        let mut store = AnchorStore::new();
        assert_eq!(store.push(DVec3::ZERO), 0);
        assert_eq!(store.push(DVec3::X), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1), Some(DVec3::X));
        assert_eq!(store.get(2), None);
    }

    #[test]
    fn test_segment_count() {
        let mut store = AnchorStore::new();
        assert_eq!(store.segment_count(), 0);
        store.push(DVec3::ZERO);
        assert_eq!(store.segment_count(), 0);
        store.push(DVec3::X);
        store.push(DVec3::Y);
        assert_eq!(store.segment_count(), 2);
    }

    #[test]
    fn test_segments_are_consecutive_pairs() {
        let store = AnchorStore::from_points(vec![DVec3::ZERO, DVec3::X, DVec3::Y]);
        let segments: Vec<_> = store.segments().collect();
        assert_eq!(segments, vec![(0, DVec3::ZERO, DVec3::X), (1, DVec3::X, DVec3::Y)]);
    }
}
