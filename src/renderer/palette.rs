//! Comic palette: simulation tints to CSS colors

use crate::sim::{PanelTone, Tint};

/// Page background (comic yellow)
pub const BACKGROUND: &str = "#FFD700";
/// Glow around a charged hammer and the shock ring
pub const POWER_GLOW: &str = "#00BFFF";
pub const INK: &str = "black";
/// Mine core light
pub const MINE_CORE: &str = "red";

pub fn tint_css(tint: Tint) -> &'static str {
    match tint {
        Tint::Sky => "#00BFFF",
        Tint::Ember => "#FF4500",
        Tint::Charcoal => "#222222",
        Tint::Lime => "#32CD32",
        Tint::White => "#FFFFFF",
        Tint::Gold => "#FFD700",
        Tint::Orange => "#FFA500",
    }
}

pub fn panel_fill(tone: PanelTone) -> &'static str {
    match tone {
        PanelTone::Paper => "rgba(255, 255, 255, 0.1)",
        PanelTone::Blue => "rgba(0, 191, 255, 0.05)",
        PanelTone::Red => "rgba(255, 69, 0, 0.05)",
    }
}

/// CSS rgba() string
pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> String {
    format!("rgba({}, {}, {}, {:.3})", r, g, b, a.clamp(0.0, 1.0))
}
