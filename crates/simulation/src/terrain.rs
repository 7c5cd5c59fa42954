//! Rolling-hills heightfield the farm sits on. Serves as the "ground"
//! surface for the player probe and the placement ray.

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::config::{
    TERRAIN_BASE_FREQUENCY, TERRAIN_HEIGHT_SCALE, TERRAIN_RESOLUTION, TERRAIN_SPACING, WORLD_SIZE,
};

/// Step length for the ground-ray march. The bisection refinement below
/// brings the reported hit well under this error.
const RAY_MARCH_STEP: f32 = 0.25;
const RAY_REFINE_ITERATIONS: u32 = 8;

#[derive(Resource)]
pub struct Terrain {
    resolution: usize,
    heights: Vec<f32>,
}

impl Terrain {
    pub fn generate(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(TERRAIN_BASE_FREQUENCY));

        let resolution = TERRAIN_RESOLUTION;
        let mut heights = Vec::with_capacity(resolution * resolution);
        for row in 0..resolution {
            for col in 0..resolution {
                let raw = noise.get_noise_2d(col as f32, row as f32);
                let elevation = (raw + 1.0) * 0.5; // normalize to 0..1
                heights.push(elevation * TERRAIN_HEIGHT_SCALE);
            }
        }
        Self {
            resolution,
            heights,
        }
    }

    /// A terrain with every sample at `height`. Test worlds use this so
    /// positions are easy to reason about.
    pub fn flat(height: f32) -> Self {
        let resolution = TERRAIN_RESOLUTION;
        Self {
            resolution,
            heights: vec![height; resolution * resolution],
        }
    }

    fn sample(&self, col: usize, row: usize) -> f32 {
        let col = col.min(self.resolution - 1);
        let row = row.min(self.resolution - 1);
        self.heights[row * self.resolution + col]
    }

    /// Bilinear height at a world-space (x, z), clamped at the borders.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let fx = (x / TERRAIN_SPACING).clamp(0.0, (self.resolution - 1) as f32);
        let fz = (z / TERRAIN_SPACING).clamp(0.0, (self.resolution - 1) as f32);
        let col = fx.floor() as usize;
        let row = fz.floor() as usize;
        let tx = fx - col as f32;
        let tz = fz - row as f32;

        let h00 = self.sample(col, row);
        let h10 = self.sample(col + 1, row);
        let h01 = self.sample(col, row + 1);
        let h11 = self.sample(col + 1, row + 1);

        let top = h00 * (1.0 - tx) + h10 * tx;
        let bottom = h01 * (1.0 - tx) + h11 * tx;
        top * (1.0 - tz) + bottom * tz
    }

    pub fn in_bounds(x: f32, z: f32) -> bool {
        (0.0..=WORLD_SIZE).contains(&x) && (0.0..=WORLD_SIZE).contains(&z)
    }

    /// March `origin + t * dir` until it crosses below the surface, then
    /// bisect the crossing step. Returns the surface hit point.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_dist: f32) -> Option<Vec3> {
        let dir = dir.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        let mut t_prev = 0.0;
        let mut t = 0.0;
        while t <= max_dist {
            let p = origin + dir * t;
            if Self::in_bounds(p.x, p.z) && p.y <= self.height_at(p.x, p.z) {
                // Bisect between the last above-surface sample and this one.
                let mut lo = t_prev;
                let mut hi = t;
                for _ in 0..RAY_REFINE_ITERATIONS {
                    let mid = (lo + hi) * 0.5;
                    let q = origin + dir * mid;
                    if q.y <= self.height_at(q.x, q.z) {
                        hi = mid;
                    } else {
                        lo = mid;
                    }
                }
                let hit = origin + dir * hi;
                return Some(Vec3::new(hit.x, self.height_at(hit.x, hit.z), hit.z));
            }
            t_prev = t;
            t += RAY_MARCH_STEP;
        }
        None
    }
}
