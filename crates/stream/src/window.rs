use glam::Vec2;
use terradrive_common::TileCoord;

/// Square block of tiles that must be resident around a viewpoint.
///
/// Covers every tile within `radius` (Chebyshev distance) of `center`,
/// `(2 * radius + 1)^2` tiles in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamWindow {
    pub center: TileCoord,
    pub radius: i32,
}

impl StreamWindow {
    /// The center is pulled in from the ends of the `i32` range so that
    /// every covered coordinate is representable.
    pub fn new(center: TileCoord, radius: i32) -> Self {
        let r = radius.max(0);
        let center = TileCoord::new(
            center.x.clamp(i32::MIN + r, i32::MAX - r),
            center.z.clamp(i32::MIN + r, i32::MAX - r),
        );
        Self { center, radius }
    }

    /// Window around the tile containing `viewpoint`.
    pub fn around(viewpoint: Vec2, chunk_size: f32, radius: i32) -> Self {
        Self::new(TileCoord::containing(viewpoint, chunk_size), radius)
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        self.radius >= 0 && self.center.chebyshev(coord) <= self.radius as u32
    }

    pub fn len(&self) -> usize {
        let side = (2 * self.radius + 1).max(0) as usize;
        side * side
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All covered coordinates in `(x, z)` order.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        let r = self.radius;
        (-r..=r).flat_map(move |dx| (-r..=r).map(move |dz| self.center.offset(dx, dz)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_at_origin() {
        let w = StreamWindow::around(Vec2::new(0.0, 0.0), 40.0, 2);
        assert_eq!(w.center, TileCoord::new(0, 0));
        let coords: Vec<_> = w.coords().collect();
        assert_eq!(coords.len(), 25);
        assert_eq!(w.len(), 25);
        assert_eq!(coords.first(), Some(&TileCoord::new(-2, -2)));
        assert_eq!(coords.last(), Some(&TileCoord::new(2, 2)));
        assert!(coords.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn window_follows_viewpoint_tile() {
        let w = StreamWindow::around(Vec2::new(41.0, 0.0), 40.0, 2);
        assert_eq!(w.center, TileCoord::new(1, 0));
        assert!(w.contains(TileCoord::new(3, 2)));
        assert!(w.contains(TileCoord::new(-1, -2)));
        assert!(!w.contains(TileCoord::new(-2, 0)));
        assert!(!w.contains(TileCoord::new(1, 3)));
    }

    #[test]
    fn negative_viewpoint_floors() {
        let w = StreamWindow::around(Vec2::new(-0.5, -80.0), 40.0, 1);
        assert_eq!(w.center, TileCoord::new(-1, -2));
    }

    #[test]
    fn zero_radius_is_single_tile() {
        let w = StreamWindow::new(TileCoord::new(4, -4), 0);
        assert_eq!(w.coords().collect::<Vec<_>>(), vec![TileCoord::new(4, -4)]);
        assert!(!w.is_empty());
    }

    #[test]
    fn far_viewpoint_stays_inside_i32() {
        let w = StreamWindow::around(Vec2::new(1.0e12, -1.0e12), 40.0, 2);
        assert_eq!(w.center, TileCoord::new(i32::MAX - 2, i32::MIN + 2));
        let coords: Vec<_> = w.coords().collect();
        assert_eq!(coords.len(), 25);
        assert!(coords.windows(2).all(|p| p[0] < p[1]));
        assert_eq!(coords.last(), Some(&TileCoord::new(i32::MAX, i32::MIN + 4)));
        assert!(coords.iter().all(|c| w.contains(*c)));
    }

    #[test]
    fn every_coord_is_contained() {
        let w = StreamWindow::new(TileCoord::new(-7, 3), 3);
        assert!(w.coords().all(|c| w.contains(c)));
    }
}
