//! Canvas 2D backend
//!
//! Immediate-mode drawing of one frame. Holds no game state, only the context
//! and a cosmetic RNG for screen shake jitter.

use std::f64::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::layer::{self, StateStack};
use super::palette::{self, rgba};
use super::shapes;
use crate::hammer::HammerConfig;
use crate::settings::Settings;
use crate::sim::backdrop::{Cloud, ComicPanel};
use crate::sim::{Entity, EntityKind, GameState, Particle, PopText};

impl StateStack for CanvasRenderingContext2d {
    fn save(&self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&self) {
        CanvasRenderingContext2d::restore(self);
    }
}

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    jitter: Pcg32,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self {
            canvas,
            ctx,
            jitter: Pcg32::seed_from_u64(0x0b0c),
        })
    }

    /// Match the backing store to the window
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn render(
        &mut self,
        state: &GameState,
        hammer: &HammerConfig,
        settings: &Settings,
    ) -> Result<(), JsValue> {
        let (w, h) = (state.width as f64, state.height as f64);
        let shake = if settings.effective_screen_shake() && state.shake > 0.0 {
            let rx = (self.jitter.random::<f32>() - 0.5) * state.shake;
            let ry = (self.jitter.random::<f32>() - 0.5) * state.shake;
            Some((rx as f64, ry as f64))
        } else {
            None
        };

        layer::isolated(&self.ctx, |ctx| {
            if let Some((rx, ry)) = shake {
                ctx.translate(rx, ry)?;
            }

            ctx.set_fill_style_str(palette::BACKGROUND);
            ctx.fill_rect(0.0, 0.0, w, h);

            self.draw_skyline(state)?;
            for panel in &state.backdrop.panels {
                self.draw_panel(panel)?;
            }
            for cloud in &state.backdrop.clouds {
                self.draw_cloud(cloud)?;
            }

            for entity in &state.entities {
                self.draw_entity(entity)?;
            }
            for particle in &state.particles {
                self.draw_particle(particle)?;
            }
            for text in &state.pop_texts {
                self.draw_pop_text(text)?;
            }

            self.draw_trail(state)?;
            self.draw_hammer(state.player.pos, state.player.angle, hammer, state.power_ready())?;

            if state.shock_radius > 0.0 {
                let alpha = shapes::shock_alpha(state.shock_radius, state.width);
                ctx.begin_path();
                ctx.arc(
                    state.player.pos.x as f64,
                    state.player.pos.y as f64,
                    state.shock_radius as f64,
                    0.0,
                    TAU,
                )?;
                ctx.set_stroke_style_str(&rgba(0, 191, 255, alpha));
                ctx.set_line_width(15.0);
                ctx.stroke();
            }

            if settings.effective_flash() && state.flash > 0.0 {
                ctx.set_fill_style_str(&rgba(255, 255, 255, state.flash));
                ctx.fill_rect(0.0, 0.0, w, h);
            }

            Ok(())
        })
    }

    fn draw_skyline(&self, state: &GameState) -> Result<(), JsValue> {
        layer::isolated(&self.ctx, |ctx| {
            ctx.translate(shapes::parallax_offset(state.pointer.x, state.width) as f64, 0.0)?;
            for (i, height) in state.backdrop.buildings.iter().enumerate() {
                let body = shapes::building(i, *height, state.height);
                ctx.set_fill_style_str("rgba(0, 0, 0, 0.05)");
                ctx.fill_rect(body.x as f64, body.y as f64, body.w as f64, body.h as f64);
                ctx.set_fill_style_str("rgba(255, 255, 255, 0.05)");
                for window in shapes::building_windows(i, *height, state.height) {
                    ctx.fill_rect(window.x as f64, window.y as f64, window.w as f64, window.h as f64);
                }
            }
            Ok(())
        })
    }

    fn draw_panel(&self, panel: &ComicPanel) -> Result<(), JsValue> {
        let half = panel.size / 2.0;
        layer::isolated(&self.ctx, |ctx| {
            ctx.translate((panel.pos.x + half.x) as f64, (panel.pos.y + half.y) as f64)?;
            ctx.rotate(panel.rotation as f64)?;
            ctx.set_fill_style_str(palette::panel_fill(panel.tone));
            ctx.set_stroke_style_str(&rgba(0, 0, 0, panel.opacity));
            ctx.set_line_width(2.0);
            ctx.begin_path();
            ctx.rect(-half.x as f64, -half.y as f64, panel.size.x as f64, panel.size.y as f64);
            ctx.fill();
            ctx.stroke();
            ctx.clip();

            ctx.set_stroke_style_str(&rgba(0, 0, 0, panel.opacity * 0.5));
            for (from, to) in shapes::panel_hatching(panel.size) {
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            Ok(())
        })
    }

    fn draw_cloud(&self, cloud: &Cloud) -> Result<(), JsValue> {
        layer::isolated(&self.ctx, |ctx| {
            ctx.translate(cloud.pos.x as f64, cloud.pos.y as f64)?;
            ctx.scale(cloud.scale as f64, cloud.scale as f64)?;
            ctx.set_fill_style_str("rgba(255, 255, 255, 0.4)");
            ctx.begin_path();
            for puff in &cloud.puffs {
                ctx.move_to((puff.offset.x + puff.radius) as f64, puff.offset.y as f64);
                ctx.arc(puff.offset.x as f64, puff.offset.y as f64, puff.radius as f64, 0.0, TAU)?;
            }
            ctx.fill();
            Ok(())
        })
    }

    fn draw_entity(&self, entity: &Entity) -> Result<(), JsValue> {
        let r = entity.radius as f64;
        layer::isolated(&self.ctx, |ctx| {
            ctx.translate(entity.pos.x as f64, entity.pos.y as f64)?;

            if entity.mission_target {
                ctx.begin_path();
                ctx.arc(0.0, 0.0, shapes::highlight_radius(entity.radius, entity.wobble) as f64, 0.0, TAU)?;
                ctx.set_stroke_style_str("rgba(255, 255, 255, 0.6)");
                ctx.set_line_width(3.0);
                ctx.stroke();
            }

            let color = palette::tint_css(entity.kind.tint());
            if entity.kind == EntityKind::Mine {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.arc(0.0, 0.0, r - 5.0, 0.0, TAU)?;
                ctx.fill();
                ctx.set_line_width(4.0);
                ctx.set_stroke_style_str(palette::INK);
                for (inner, outer) in shapes::mine_spikes(entity.radius, entity.wobble) {
                    ctx.begin_path();
                    ctx.move_to(inner.x as f64, inner.y as f64);
                    ctx.line_to(outer.x as f64, outer.y as f64);
                    ctx.stroke();
                }
                ctx.set_fill_style_str(palette::MINE_CORE);
                ctx.begin_path();
                ctx.arc(0.0, 0.0, 8.0, 0.0, TAU)?;
                ctx.fill();
            } else {
                ctx.begin_path();
                ctx.arc(0.0, 0.0, r, 0.0, TAU)?;
                ctx.set_fill_style_str(color);
                ctx.fill();
                ctx.set_line_width(4.0);
                ctx.set_stroke_style_str(palette::INK);
                ctx.stroke();

                // Highlight glint
                ctx.begin_path();
                ctx.arc(-8.0, -8.0, 6.0, 0.0, TAU)?;
                ctx.set_fill_style_str("white");
                ctx.fill();

                ctx.set_fill_style_str(palette::INK);
                match entity.kind {
                    EntityKind::Fast => {
                        ctx.begin_path();
                        for eye in shapes::fast_face() {
                            ctx.move_to(eye[0].x as f64, eye[0].y as f64);
                            ctx.line_to(eye[1].x as f64, eye[1].y as f64);
                            ctx.line_to(eye[2].x as f64, eye[2].y as f64);
                        }
                        ctx.fill();
                    }
                    EntityKind::Slow => {
                        for bar in shapes::slow_face() {
                            ctx.fill_rect(bar.x as f64, bar.y as f64, bar.w as f64, bar.h as f64);
                        }
                    }
                    _ => {}
                }
            }

            Ok(())
        })
    }

    fn draw_particle(&self, particle: &Particle) -> Result<(), JsValue> {
        layer::isolated(&self.ctx, |ctx| {
            ctx.translate(particle.pos.x as f64, particle.pos.y as f64)?;
            ctx.rotate(particle.rotation as f64)?;
            ctx.set_global_alpha(particle.life.clamp(0.0, 1.0) as f64);
            ctx.set_fill_style_str(palette::tint_css(particle.tint));
            ctx.set_stroke_style_str(palette::INK);
            ctx.set_line_width(1.0);
            ctx.begin_path();
            match shapes::particle_outline(particle.shape, particle.size) {
                Some(points) => trace_polygon(ctx, &points),
                None => ctx.arc(0.0, 0.0, (particle.size / 2.0) as f64, 0.0, TAU)?,
            }
            ctx.fill();
            ctx.stroke();
            Ok(())
        })
    }

    fn draw_pop_text(&self, text: &PopText) -> Result<(), JsValue> {
        let scale = text.scale() as f64;
        layer::isolated(&self.ctx, |ctx| {
            ctx.translate(text.pos.x as f64, text.pos.y as f64)?;
            ctx.scale(scale, scale)?;
            ctx.set_fill_style_str(palette::tint_css(text.tint));
            ctx.set_stroke_style_str(&rgba(0, 0, 0, text.life));
            ctx.set_font(&format!("{}px 'Bangers'", text.size));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.set_line_width(6.0);
            ctx.stroke_text(&text.text, 0.0, 0.0)?;
            ctx.fill_text(&text.text, 0.0, 0.0)?;
            Ok(())
        })
    }

    fn draw_trail(&self, state: &GameState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for point in &state.hammer_trail {
            ctx.begin_path();
            ctx.arc(point.pos.x as f64, point.pos.y as f64, 20.0 * point.life as f64, 0.0, TAU)?;
            ctx.set_fill_style_str(&rgba(255, 255, 255, point.life * 0.5));
            ctx.fill();
        }
        Ok(())
    }

    fn draw_hammer(
        &self,
        pos: Vec2,
        angle: f32,
        config: &HammerConfig,
        powered: bool,
    ) -> Result<(), JsValue> {
        layer::isolated(&self.ctx, |ctx| {
            ctx.translate(pos.x as f64, pos.y as f64)?;
            ctx.rotate(angle as f64)?;

            if powered {
                ctx.set_shadow_color(palette::POWER_GLOW);
                ctx.set_shadow_blur(30.0);
            } else {
                ctx.set_shadow_color("rgba(0, 0, 0, 0.3)");
                ctx.set_shadow_blur(8.0);
                ctx.set_shadow_offset_y(4.0);
            }

            // Handle
            let grip = config.grip.stops();
            let handle_grad = ctx.create_linear_gradient(0.0, -8.0, 0.0, 8.0);
            handle_grad.add_color_stop(0.0, grip.start)?;
            handle_grad.add_color_stop(0.5, grip.mid)?;
            handle_grad.add_color_stop(1.0, grip.end)?;
            ctx.set_fill_style_canvas_gradient(&handle_grad);
            ctx.set_stroke_style_str(palette::INK);
            ctx.set_line_width(3.0);
            ctx.set_line_join("round");

            let (start, end, half) = (
                shapes::HANDLE_START as f64,
                shapes::HANDLE_END as f64,
                shapes::HANDLE_HALF_WIDTH as f64,
            );
            ctx.begin_path();
            ctx.move_to(start, -half);
            ctx.line_to(end, -half);
            ctx.line_to(end, half);
            ctx.line_to(start, half);
            ctx.arc(start, 0.0, half, TAU * 0.25, TAU * 0.75)?;
            ctx.close_path();
            ctx.fill();

            if config.grip.striped() {
                layer::isolated(ctx, |ctx| {
                    ctx.clip();
                    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.2)");
                    ctx.set_line_width(2.0);
                    for x in shapes::tape_stripes() {
                        ctx.begin_path();
                        ctx.move_to(x as f64, -6.0);
                        ctx.line_to(x as f64 + 3.0, 6.0);
                        ctx.stroke();
                    }
                    Ok::<(), JsValue>(())
                })?;
            }
            ctx.stroke();

            // Head
            let alloy = config.alloy.stops();
            let head_grad = ctx.create_linear_gradient(20.0, -40.0, 60.0, 40.0);
            head_grad.add_color_stop(0.0, alloy.start)?;
            head_grad.add_color_stop(0.4, alloy.mid)?;
            head_grad.add_color_stop(1.0, alloy.end)?;
            ctx.set_fill_style_canvas_gradient(&head_grad);
            ctx.set_line_width(3.0);
            ctx.set_stroke_style_str(palette::INK);

            let head = config.head.rect();
            ctx.begin_path();
            ctx.rect(head.x as f64, head.y as f64, head.w as f64, head.h as f64);
            ctx.fill();
            ctx.stroke();

            // Shine
            ctx.set_shadow_color("transparent");
            ctx.set_fill_style_str(if powered {
                palette::POWER_GLOW
            } else {
                "rgba(255, 255, 255, 0.4)"
            });
            ctx.begin_path();
            ctx.ellipse(30.0, -15.0, 4.0, 10.0, std::f64::consts::PI / 6.0, 0.0, TAU)?;
            ctx.fill();

            Ok(())
        })
    }
}

fn trace_polygon(ctx: &CanvasRenderingContext2d, points: &[Vec2]) {
    if let Some((first, rest)) = points.split_first() {
        ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.close_path();
    }
}
