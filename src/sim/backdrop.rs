//! Drifting comic-book background: skyline, halftone panels, clouds
//!
//! No gameplay effect. Regenerated whenever the viewport is resized.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Width of one skyline building slot
pub const BUILDING_WIDTH: f32 = 80.0;
const CLOUD_COUNT: usize = 6;
const PANEL_COUNT: usize = 4;

/// Panel fill colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelTone {
    Paper,
    Blue,
    Red,
}

/// A tilted, slowly spinning comic panel with hatching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComicPanel {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub rot_speed: f32,
    pub tone: PanelTone,
    pub opacity: f32,
}

impl ComicPanel {
    fn generate(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        let w = 100.0 + rng.random::<f32>() * 150.0;
        let h = w * (0.6 + rng.random::<f32>() * 0.4);
        let tone = match rng.random_range(0..3) {
            0 => PanelTone::Paper,
            1 => PanelTone::Blue,
            _ => PanelTone::Red,
        };
        Self {
            pos: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
            size: Vec2::new(w, h),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 0.5,
                (rng.random::<f32>() - 0.5) * 0.5,
            ),
            rotation: rng.random::<f32>() * std::f32::consts::TAU,
            rot_speed: (rng.random::<f32>() - 0.5) * 0.005,
            tone,
            opacity: 0.1 + rng.random::<f32>() * 0.1,
        }
    }

    /// Drift and wrap around the viewport
    pub fn update(&mut self, width: f32, height: f32) {
        self.pos += self.vel;
        self.rotation += self.rot_speed;
        if self.pos.x < -self.size.x {
            self.pos.x = width;
        }
        if self.pos.x > width {
            self.pos.x = -self.size.x;
        }
        if self.pos.y < -self.size.y {
            self.pos.y = height;
        }
        if self.pos.y > height {
            self.pos.y = -self.size.y;
        }
    }
}

/// One puff of a cloud, relative to the cloud origin
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Puff {
    pub offset: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub base_y: f32,
    pub speed: f32,
    pub scale: f32,
    pub puffs: Vec<Puff>,
}

impl Cloud {
    fn generate(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        let base_y = rng.random::<f32>() * height * 0.4;
        let puff_count = rng.random_range(3..6);
        let puffs = (0..puff_count)
            .map(|_| Puff {
                offset: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 50.0,
                    (rng.random::<f32>() - 0.5) * 30.0,
                ),
                radius: 25.0 + rng.random::<f32>() * 20.0,
            })
            .collect();
        Self {
            pos: Vec2::new(rng.random::<f32>() * width, base_y),
            base_y,
            speed: rng.random::<f32>() * 0.2 + 0.1,
            scale: rng.random::<f32>() * 0.5 + 0.5,
            puffs,
        }
    }

    /// Drift right, bob on a sine, wrap past the right edge
    pub fn update(&mut self, width: f32, time_ms: f32) {
        self.pos.x += self.speed;
        if self.pos.x > width + 150.0 {
            self.pos.x = -150.0;
        }
        self.pos.y = self.base_y + (time_ms * 0.0005 + self.pos.x * 0.01).sin() * 15.0;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Backdrop {
    /// Skyline building heights, one per `BUILDING_WIDTH` slot
    pub buildings: Vec<f32>,
    pub clouds: Vec<Cloud>,
    pub panels: Vec<ComicPanel>,
}

impl Backdrop {
    pub fn generate(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        let building_count = (width / BUILDING_WIDTH).ceil().max(0.0) as usize + 5;
        let buildings = (0..building_count)
            .map(|_| 100.0 + rng.random::<f32>() * 200.0)
            .collect();
        let clouds = (0..CLOUD_COUNT)
            .map(|_| Cloud::generate(rng, width, height))
            .collect();
        let panels = (0..PANEL_COUNT)
            .map(|_| ComicPanel::generate(rng, width, height))
            .collect();
        Self {
            buildings,
            clouds,
            panels,
        }
    }

    pub fn update(&mut self, width: f32, height: f32, time_ms: f32) {
        for cloud in &mut self.clouds {
            cloud.update(width, time_ms);
        }
        for panel in &mut self.panels {
            panel.update(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_backdrop_counts_follow_width() {
        let mut rng = Pcg32::seed_from_u64(1);
        let backdrop = Backdrop::generate(&mut rng, 800.0, 600.0);
        assert_eq!(backdrop.buildings.len(), 15);
        assert_eq!(backdrop.clouds.len(), 6);
        assert_eq!(backdrop.panels.len(), 4);
        assert!(backdrop.buildings.iter().all(|h| (100.0..=300.0).contains(h)));
    }

    #[test]
    fn test_cloud_wraps() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut cloud = Cloud::generate(&mut rng, 400.0, 300.0);
        cloud.pos.x = 549.95;
        cloud.update(400.0, 0.0);
        assert_eq!(cloud.pos.x, -150.0);
    }
}
