//! Shape generation for 2D primitives
//!
//! Pure geometry in object-local space; the canvas backend only strokes and
//! fills what comes out of here.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::sim::ParticleShape;
use crate::sim::backdrop::BUILDING_WIDTH;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Spikes around a mine, rotating slowly with its wobble
pub fn mine_spikes(radius: f32, wobble: f32) -> Vec<(Vec2, Vec2)> {
    (0..8)
        .map(|i| {
            let angle = TAU / 8.0 * i as f32 + wobble * 0.05;
            let dir = crate::direction(angle);
            (dir * (radius - 10.0), dir * (radius + 10.0))
        })
        .collect()
}

/// Pulsing ring drawn around mission targets
pub fn highlight_radius(radius: f32, wobble: f32) -> f32 {
    radius * (1.0 + (wobble * 0.2).sin() * 0.1) + 5.0
}

/// Closed outline for a particle; `None` means draw a circle of `size / 2`
pub fn particle_outline(shape: ParticleShape, size: f32) -> Option<Vec<Vec2>> {
    let half = size / 2.0;
    match shape {
        ParticleShape::Circle => None,
        ParticleShape::Square => Some(vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ]),
        ParticleShape::Triangle => Some(vec![
            Vec2::new(0.0, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ]),
        ParticleShape::Star => Some(vec![
            Vec2::new(0.0, -size),
            Vec2::new(size / 4.0, -size / 4.0),
            Vec2::new(size, 0.0),
            Vec2::new(0.0, size),
        ]),
    }
}

/// Fast targets squint: two chevrons as polylines
pub fn fast_face() -> [[Vec2; 3]; 2] {
    [
        [Vec2::new(-15.0, -5.0), Vec2::new(-5.0, 0.0), Vec2::new(-15.0, 5.0)],
        [Vec2::new(15.0, -5.0), Vec2::new(5.0, 0.0), Vec2::new(15.0, 5.0)],
    ]
}

/// Slow targets look sleepy: two flat bars
pub fn slow_face() -> [Rect; 2] {
    [Rect::new(-14.0, -2.0, 10.0, 4.0), Rect::new(4.0, -2.0, 10.0, 4.0)]
}

/// Skyline building body for slot `index`
pub fn building(index: usize, height: f32, viewport_h: f32) -> Rect {
    Rect::new(
        index as f32 * BUILDING_WIDTH,
        viewport_h - height,
        BUILDING_WIDTH - 10.0,
        height,
    )
}

/// Lit windows in a building, two per floor
pub fn building_windows(index: usize, height: f32, viewport_h: f32) -> Vec<Rect> {
    let x = index as f32 * BUILDING_WIDTH;
    let top = viewport_h - height;
    let mut windows = Vec::new();
    let mut wy = 0.0;
    while wy < height - 20.0 {
        windows.push(Rect::new(x + 10.0, top + wy + 10.0, 15.0, 15.0));
        windows.push(Rect::new(x + 45.0, top + wy + 10.0, 15.0, 15.0));
        wy += 30.0;
    }
    windows
}

/// Skyline shifts opposite the pointer
pub fn parallax_offset(pointer_x: f32, width: f32) -> f32 {
    -(pointer_x - width / 2.0) * 0.02
}

/// Diagonal hatching across a panel, centered on the panel
pub fn panel_hatching(size: Vec2) -> Vec<(Vec2, Vec2)> {
    let mut lines = Vec::new();
    let mut i = -size.x;
    while i < size.x {
        lines.push((Vec2::new(i, -size.y), Vec2::new(i + 50.0, size.y)));
        i += 15.0;
    }
    lines
}

/// Shock ring opacity: fades as it grows to 1.5x the viewport width
pub fn shock_alpha(radius: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    (0.8 * (1.0 - radius / (width * 1.5))).clamp(0.0, 0.8)
}

/// Hammer handle outline (hammer-local, pointing +x); the butt end is a
/// half-circle of radius 5 at x = -40
pub const HANDLE_START: f32 = -40.0;
pub const HANDLE_END: f32 = 25.0;
pub const HANDLE_HALF_WIDTH: f32 = 5.0;

/// x positions of tape stripes along the handle
pub fn tape_stripes() -> Vec<f32> {
    (0..)
        .map(|i| HANDLE_START + i as f32 * 6.0)
        .take_while(|x| *x < HANDLE_END)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mine_spikes_span_radius() {
        let spikes = mine_spikes(40.0, 0.0);
        assert_eq!(spikes.len(), 8);
        for (inner, outer) in &spikes {
            assert!((inner.length() - 30.0).abs() < 1e-4);
            assert!((outer.length() - 50.0).abs() < 1e-4);
        }
        // First spike points right when wobble is zero
        assert!((spikes[0].1 - Vec2::new(50.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_particle_outlines() {
        assert!(particle_outline(ParticleShape::Circle, 10.0).is_none());
        assert_eq!(particle_outline(ParticleShape::Square, 10.0).map(|p| p.len()), Some(4));
        assert_eq!(particle_outline(ParticleShape::Triangle, 10.0).map(|p| p.len()), Some(3));
        let star = particle_outline(ParticleShape::Star, 8.0).unwrap_or_default();
        assert_eq!(star[0], Vec2::new(0.0, -8.0));
    }

    #[test]
    fn test_building_windows() {
        // 100 px tall: floors at 0, 30, 60 (< 80)
        let windows = building_windows(2, 100.0, 600.0);
        assert_eq!(windows.len(), 6);
        assert_eq!(windows[0], Rect::new(170.0, 510.0, 15.0, 15.0));
        assert_eq!(building(2, 100.0, 600.0), Rect::new(160.0, 500.0, 70.0, 100.0));
    }

    #[test]
    fn test_shock_alpha_fades() {
        assert!((shock_alpha(0.0, 800.0) - 0.8).abs() < 1e-6);
        assert!(shock_alpha(600.0, 800.0) < 0.8);
        assert_eq!(shock_alpha(1200.0, 800.0), 0.0);
    }

    #[test]
    fn test_parallax_and_stripes() {
        assert_eq!(parallax_offset(400.0, 800.0), 0.0);
        assert!(parallax_offset(800.0, 800.0) < 0.0);
        let stripes = tape_stripes();
        assert_eq!(stripes.first(), Some(&-40.0));
        assert!(stripes.iter().all(|x| *x < HANDLE_END));
        assert_eq!(stripes.len(), 11);
    }

    #[test]
    fn test_highlight_pulses_around_radius() {
        assert_eq!(highlight_radius(35.0, 0.0), 40.0);
        let r = highlight_radius(35.0, 7.85);
        assert!(r > 40.0 && r <= 35.0 * 1.1 + 5.0 + 1e-4);
    }
}
