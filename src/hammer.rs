//! Hammer cosmetics (workbench)
//!
//! Pure data: the renderer turns these into gradients and rectangles.

use serde::{Deserialize, Serialize};

/// Head silhouette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeadType {
    #[default]
    Sledge,
    Mallet,
}

/// Head material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alloy {
    #[default]
    Classic,
    Gold,
    Fire,
    Void,
}

/// Handle wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Grip {
    #[default]
    Wood,
    Tape,
    Metal,
}

/// Three-stop linear gradient (start, middle, end) as CSS hex colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStops {
    pub start: &'static str,
    pub mid: &'static str,
    pub end: &'static str,
}

/// Head rectangle in hammer-local space (x along the handle)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl HeadType {
    pub const ALL: [HeadType; 2] = [HeadType::Sledge, HeadType::Mallet];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeadType::Sledge => "Sledge",
            HeadType::Mallet => "Mallet",
        }
    }

    pub fn rect(&self) -> HeadRect {
        match self {
            HeadType::Sledge => HeadRect {
                x: 20.0,
                y: -30.0,
                w: 40.0,
                h: 60.0,
            },
            HeadType::Mallet => HeadRect {
                x: 20.0,
                y: -35.0,
                w: 40.0,
                h: 70.0,
            },
        }
    }
}

impl Alloy {
    pub const ALL: [Alloy; 4] = [Alloy::Classic, Alloy::Gold, Alloy::Fire, Alloy::Void];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alloy::Classic => "Classic",
            Alloy::Gold => "Gold",
            Alloy::Fire => "Fire",
            Alloy::Void => "Void",
        }
    }

    pub fn stops(&self) -> ColorStops {
        match self {
            Alloy::Classic => ColorStops {
                start: "#90A4AE",
                mid: "#546E7A",
                end: "#263238",
            },
            Alloy::Gold => ColorStops {
                start: "#FFF59D",
                mid: "#FBC02D",
                end: "#F57F17",
            },
            Alloy::Fire => ColorStops {
                start: "#FFAB91",
                mid: "#D84315",
                end: "#BF360C",
            },
            Alloy::Void => ColorStops {
                start: "#E1BEE7",
                mid: "#8E24AA",
                end: "#4A148C",
            },
        }
    }
}

impl Grip {
    pub const ALL: [Grip; 3] = [Grip::Wood, Grip::Tape, Grip::Metal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grip::Wood => "Wood",
            Grip::Tape => "Tape",
            Grip::Metal => "Metal",
        }
    }

    pub fn stops(&self) -> ColorStops {
        match self {
            Grip::Wood => ColorStops {
                start: "#5D4037",
                mid: "#A1887F",
                end: "#3E2723",
            },
            Grip::Tape => ColorStops {
                start: "#B71C1C",
                mid: "#EF5350",
                end: "#C62828",
            },
            Grip::Metal => ColorStops {
                start: "#90A4AE",
                mid: "#CFD8DC",
                end: "#607D8B",
            },
        }
    }

    /// Tape grips get diagonal wrap stripes
    pub fn striped(&self) -> bool {
        *self == Grip::Tape
    }
}

/// Step to the next value in a list, wrapping around
fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + 1) % all.len()]
}

/// Selected hammer look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HammerConfig {
    pub head: HeadType,
    pub alloy: Alloy,
    pub grip: Grip,
}

impl HammerConfig {
    pub fn cycle_head(&mut self) {
        self.head = cycle(&HeadType::ALL, self.head);
    }

    pub fn cycle_alloy(&mut self) {
        self.alloy = cycle(&Alloy::ALL, self.alloy);
    }

    pub fn cycle_grip(&mut self) {
        self.grip = cycle(&Grip::ALL, self.grip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HammerConfig::default();
        assert_eq!(config.head, HeadType::Sledge);
        assert_eq!(config.alloy, Alloy::Classic);
        assert_eq!(config.grip, Grip::Wood);
    }

    #[test]
    fn test_cycles_wrap() {
        let mut config = HammerConfig::default();
        for _ in 0..Alloy::ALL.len() {
            config.cycle_alloy();
        }
        assert_eq!(config.alloy, Alloy::Classic);

        config.cycle_head();
        assert_eq!(config.head, HeadType::Mallet);
        config.cycle_head();
        assert_eq!(config.head, HeadType::Sledge);

        config.cycle_grip();
        assert_eq!(config.grip, Grip::Tape);
        assert!(config.grip.striped());
    }

    #[test]
    fn test_mallet_is_taller() {
        assert!(HeadType::Mallet.rect().h > HeadType::Sledge.rect().h);
        assert_eq!(Alloy::Gold.stops().mid, "#FBC02D");
    }

    #[test]
    fn test_serde_lowercase() {
        let config = HammerConfig {
            head: HeadType::Mallet,
            alloy: Alloy::Void,
            grip: Grip::Metal,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"head":"mallet","alloy":"void","grip":"metal"}"#);

        let partial: HammerConfig = serde_json::from_str(r#"{"alloy":"fire"}"#).unwrap();
        assert_eq!(partial.alloy, Alloy::Fire);
        assert_eq!(partial.head, HeadType::Sledge);
    }
}
