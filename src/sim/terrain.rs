//! Scrolling piecewise-linear height field
//!
//! Points are evenly spaced and stored in ascending X. New points are grown
//! at the right edge with a clamped random walk; points that scroll off the
//! left edge are dropped. Heights are screen Y (larger is lower).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Viewport;
use crate::tuning::Tuning;
use crate::{lerp, screen_x};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainPoint {
    /// World X
    pub x: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct Terrain {
    points: Vec<TerrainPoint>,
    segment_width: f32,
    /// Returned for queries left of every stored point
    fallback_height: f32,
}

impl Terrain {
    pub fn new(segment_width: f32, fallback_height: f32) -> Self {
        Self {
            points: Vec::new(),
            segment_width,
            fallback_height,
        }
    }

    pub fn points(&self) -> &[TerrainPoint] {
        &self.points
    }

    #[cfg(test)]
    pub(crate) fn points_mut(&mut self) -> &mut [TerrainPoint] {
        &mut self.points
    }

    pub fn last(&self) -> Option<&TerrainPoint> {
        self.points.last()
    }

    pub fn set_fallback_height(&mut self, height: f32) {
        self.fallback_height = height;
    }

    /// Multiply every stored height by `factor`, keeping X untouched
    pub fn scale_heights(&mut self, factor: f32) {
        for point in &mut self.points {
            point.height *= factor;
        }
    }

    /// Replace all points with a fresh stretch starting at world X 0
    pub fn generate_initial<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning, viewport: Viewport) {
        self.points.clear();
        let lo = tuning.min_height(viewport.height);
        let hi = tuning.max_height(viewport.height);

        let mut x = 0.0;
        let mut height = (tuning.initial_height_frac * viewport.height).max(lo).min(hi);
        while x < viewport.width + tuning.initial_lookahead {
            self.points.push(TerrainPoint { x, height });
            x += self.segment_width;
            height = random_walk(rng, height, tuning.initial_height_step, lo, hi);
        }
        log::debug!(
            "Generated {} terrain points up to x={}",
            self.points.len(),
            x - self.segment_width
        );
    }

    /// Grow the right edge until it reaches `lookahead` past the viewport.
    /// Returns the appended points in order.
    pub fn extend<R: Rng>(
        &mut self,
        rng: &mut R,
        tuning: &Tuning,
        distance: f32,
        viewport: Viewport,
    ) -> Vec<TerrainPoint> {
        let lo = tuning.min_height(viewport.height);
        let hi = tuning.max_height(viewport.height);

        let mut last = match self.points.last() {
            Some(point) => *point,
            None => {
                let seed = TerrainPoint {
                    x: distance,
                    height: self.fallback_height.max(lo).min(hi),
                };
                self.points.push(seed);
                seed
            }
        };

        let mut added = Vec::new();
        while screen_x(last.x, distance) < viewport.width + tuning.lookahead {
            let x = last.x + self.segment_width;
            // Far enough out, f32 can no longer step by one segment
            if x <= last.x {
                log::warn!("Terrain cannot grow past x={}", last.x);
                break;
            }
            let point = TerrainPoint {
                x,
                height: random_walk(rng, last.height, tuning.height_step, lo, hi),
            };
            self.points.push(point);
            added.push(point);
            last = point;
        }
        added
    }

    /// Drop points left of `eviction_x` in screen space, always keeping one
    pub fn retire(&mut self, distance: f32, eviction_x: f32) {
        let behind = self
            .points
            .iter()
            .take_while(|p| screen_x(p.x, distance) < eviction_x)
            .count();
        let n = behind.min(self.points.len().saturating_sub(1));
        if n > 0 {
            self.points.drain(..n);
        }
    }

    /// Index of the point at or left of `x`, if any
    fn segment_start(&self, x: f32) -> Option<usize> {
        let first = self.points.first()?;
        if x < first.x {
            return None;
        }
        // Spacing is fixed, so jump straight to the segment and fix up rounding
        let mut i = ((x - first.x) / self.segment_width).floor() as usize;
        i = i.min(self.points.len() - 1);
        while i > 0 && self.points[i].x > x {
            i -= 1;
        }
        while i + 1 < self.points.len() && self.points[i + 1].x <= x {
            i += 1;
        }
        Some(i)
    }

    /// Interpolated surface height at world `x`
    pub fn height_at(&self, x: f32) -> f32 {
        let Some(i) = self.segment_start(x) else {
            return self.fallback_height;
        };
        let p1 = self.points[i];
        match self.points.get(i + 1) {
            Some(p2) => lerp(p1.height, p2.height, (x - p1.x) / (p2.x - p1.x)),
            None => p1.height,
        }
    }

    /// Surface slope (dHeight/dX) at world `x`; positive means downhill
    pub fn slope_at(&self, x: f32) -> f32 {
        let Some(i) = self.segment_start(x) else {
            return 0.0;
        };
        match self.points.get(i + 1) {
            Some(p2) => {
                let p1 = self.points[i];
                (p2.height - p1.height) / (p2.x - p1.x)
            }
            None => 0.0,
        }
    }
}

/// Next height of the walk: uniform step of total width `step`, clamped to `[lo, hi]`
fn random_walk<R: Rng>(rng: &mut R, height: f32, step: f32, lo: f32, hi: f32) -> f32 {
    let delta = (rng.random::<f32>() - 0.5) * step;
    (height + delta).max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn viewport() -> Viewport {
        Viewport {
            width: 800.0,
            height: 600.0,
        }
    }

    fn manual(points: &[(f32, f32)]) -> Terrain {
        let mut terrain = Terrain::new(60.0, 300.0);
        terrain.points = points
            .iter()
            .map(|&(x, height)| TerrainPoint { x, height })
            .collect();
        terrain
    }

    #[test]
    fn test_height_interpolates_between_points() {
        let terrain = manual(&[(0.0, 400.0), (60.0, 460.0), (120.0, 430.0)]);
        assert_eq!(terrain.height_at(0.0), 400.0);
        assert!((terrain.height_at(30.0) - 430.0).abs() < 0.001);
        assert!((terrain.height_at(90.0) - 445.0).abs() < 0.001);
        assert_eq!(terrain.height_at(60.0), 460.0);
    }

    #[test]
    fn test_height_edges() {
        let terrain = manual(&[(120.0, 400.0), (180.0, 460.0)]);
        // Before all points: fallback
        assert_eq!(terrain.height_at(10.0), 300.0);
        // Past the last point: last height
        assert_eq!(terrain.height_at(500.0), 460.0);

        let empty = Terrain::new(60.0, 250.0);
        assert_eq!(empty.height_at(0.0), 250.0);
        assert_eq!(empty.slope_at(0.0), 0.0);
    }

    #[test]
    fn test_slope_sign() {
        let terrain = manual(&[(0.0, 400.0), (60.0, 460.0), (120.0, 430.0)]);
        assert!((terrain.slope_at(10.0) - 1.0).abs() < 0.001);
        assert!((terrain.slope_at(70.0) - (-0.5)).abs() < 0.001);
        assert_eq!(terrain.slope_at(1000.0), 0.0);
    }

    #[test]
    fn test_initial_generation_covers_lookahead() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut terrain = Terrain::new(tuning.segment_width, 300.0);
        terrain.generate_initial(&mut rng, &tuning, viewport());

        let points = terrain.points();
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[0].height, 450.0);
        let last = points.last().unwrap();
        assert!(last.x + tuning.segment_width >= 800.0 + tuning.initial_lookahead);
        for pair in points.windows(2) {
            assert!(pair[0].x < pair[1].x);
            assert!((pair[1].x - pair[0].x - tuning.segment_width).abs() < 0.001);
        }
        for p in points {
            assert!(p.height >= 300.0 && p.height <= 540.0);
        }
    }

    #[test]
    fn test_extend_appends_past_lookahead() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut terrain = Terrain::new(tuning.segment_width, 300.0);
        terrain.generate_initial(&mut rng, &tuning, viewport());
        let before = *terrain.last().unwrap();

        // Nothing needed yet
        assert!(terrain.extend(&mut rng, &tuning, 0.0, viewport()).is_empty());

        let distance = 2000.0;
        let added = terrain.extend(&mut rng, &tuning, distance, viewport());
        assert!(!added.is_empty());
        assert_eq!(added[0].x, before.x + tuning.segment_width);
        let last = terrain.last().unwrap();
        assert!(last.x - distance >= 800.0 + tuning.lookahead);
        assert_eq!(last, added.last().unwrap());
    }

    #[test]
    fn test_extend_on_empty_terrain_seeds_a_point() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut terrain = Terrain::new(tuning.segment_width, 300.0);
        let added = terrain.extend(&mut rng, &tuning, 100.0, viewport());
        assert_eq!(terrain.points()[0].x, 100.0);
        assert_eq!(added.len() + 1, terrain.points().len());
    }

    #[test]
    fn test_retire_drops_points_behind_camera() {
        let mut terrain = manual(&[(0.0, 400.0), (60.0, 400.0), (120.0, 400.0), (180.0, 400.0)]);
        terrain.retire(170.0, -100.0);
        // 0 and 60 are more than 100 behind the camera
        assert_eq!(terrain.points()[0].x, 120.0);
        assert_eq!(terrain.points().len(), 2);
    }

    #[test]
    fn test_retire_keeps_one_point() {
        let mut terrain = manual(&[(0.0, 400.0), (60.0, 410.0)]);
        terrain.retire(10_000.0, -100.0);
        assert_eq!(terrain.points().len(), 1);
        assert_eq!(terrain.height_at(20_000.0), 410.0);
    }

    #[test]
    fn test_scale_heights_keeps_x() {
        let mut terrain = manual(&[(0.0, 400.0), (60.0, 460.0)]);
        terrain.scale_heights(0.5);
        let points: Vec<(f32, f32)> = terrain.points().iter().map(|p| (p.x, p.height)).collect();
        assert_eq!(points, vec![(0.0, 200.0), (60.0, 230.0)]);
    }

    #[test]
    fn test_extend_stops_when_x_cannot_advance() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        // Adjacent f32 values are 256 apart here, wider than a segment
        let far = 3.0e9;
        let mut terrain = manual(&[(far, 400.0)]);
        let added = terrain.extend(&mut rng, &tuning, far, viewport());
        assert!(added.is_empty());
        assert_eq!(terrain.points().len(), 1);
    }

    #[test]
    fn test_flat_walk_never_moves() {
        let tuning = Tuning::flat_world();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut terrain = Terrain::new(tuning.segment_width, 300.0);
        terrain.generate_initial(&mut rng, &tuning, viewport());
        terrain.extend(&mut rng, &tuning, 3000.0, viewport());
        assert!(terrain.points().iter().all(|p| p.height == 450.0));
    }
}
