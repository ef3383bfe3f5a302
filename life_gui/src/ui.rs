// ui.rs - egui host for the simulation
//
// egui is immediate mode, so the surface buffers the controller's draw
// commands and paints the last presented frame during `update`. Input is
// collected from the frame's events and handed out on the next poll.

use std::time::{Duration, Instant};

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Vec2};
use tracing::debug;

use life::geometry::LABEL_FONT_SIZE;
use life::{DrawCommand, FrameBuffer, PixelRect, RawInput, Rgb, RunState, Simulation, Surface};

#[derive(Default)]
pub struct EguiSurface {
    pending: Vec<RawInput>,
    pointer: (i32, i32),
    origin: Pos2,
    frame: FrameBuffer,
    size: (u32, u32),
    delay: Duration,
    frame_budget: Duration,
}

impl EguiSurface {
    /// Queues this frame's egui events as raw input, in pixels relative to
    /// the top-left of the drawing area.
    fn ingest(&mut self, origin: Pos2, events: &[egui::Event]) {
        self.origin = origin;
        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => self.pointer = self.relative(*pos),
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    ..
                } => {
                    let (x, y) = self.relative(*pos);
                    self.pointer = (x, y);
                    self.pending.push(RawInput::MouseDown { x, y });
                }
                _ => self.pending.push(RawInput::Other),
            }
        }
    }

    fn push_quit(&mut self) {
        self.pending.push(RawInput::Quit);
    }

    fn relative(&self, pos: Pos2) -> (i32, i32) {
        ((pos.x - self.origin.x).floor() as i32, (pos.y - self.origin.y).floor() as i32)
    }

    fn paint(&self, painter: &egui::Painter) {
        for command in self.frame.front() {
            match command {
                DrawCommand::Fill(color) => {
                    let size = Vec2::new(self.size.0 as f32, self.size.1 as f32);
                    painter.rect_filled(Rect::from_min_size(self.origin, size), 0.0, to_color(*color));
                }
                DrawCommand::Rect { color, rect } => {
                    painter.rect_filled(self.to_rect(*rect), 0.0, to_color(*color));
                }
                DrawCommand::Text { text, position, color } => {
                    painter.text(
                        self.origin + Vec2::new(position.0 as f32, position.1 as f32),
                        Align2::LEFT_TOP,
                        text,
                        FontId::proportional(LABEL_FONT_SIZE),
                        to_color(*color),
                    );
                }
            }
        }
    }

    fn to_rect(&self, rect: PixelRect) -> Rect {
        Rect::from_min_size(
            self.origin + Vec2::new(rect.x as f32, rect.y as f32),
            Vec2::new(rect.width as f32, rect.height as f32),
        )
    }

    /// Time until the next frame: the requested delay, but never shorter
    /// than the frame-rate cap allows.
    fn take_repaint_delay(&mut self) -> Duration {
        std::mem::take(&mut self.delay).max(self.frame_budget)
    }
}

impl Surface for EguiSurface {
    fn open(&mut self, caption: &str, width: u32, height: u32) {
        debug!(caption, width, height, "egui surface opened");
        self.size = (width, height);
    }

    fn poll_input(&mut self) -> Vec<RawInput> {
        std::mem::take(&mut self.pending)
    }

    fn mouse_position(&self) -> (i32, i32) {
        self.pointer
    }

    fn fill(&mut self, color: Rgb) {
        self.frame.push(DrawCommand::Fill(color));
    }

    fn draw_rect(&mut self, color: Rgb, rect: PixelRect) {
        self.frame.push(DrawCommand::Rect { color, rect });
    }

    fn draw_text(&mut self, text: &str, position: (i32, i32), color: Rgb) {
        self.frame.push(DrawCommand::Text { text: text.to_string(), position, color });
    }

    fn present(&mut self) {
        self.frame.present();
    }

    // egui must not block inside `update`; waiting becomes the delay of the
    // next repaint instead.
    fn wait(&mut self, ms: u64) {
        self.delay += Duration::from_millis(ms);
    }

    fn tick(&mut self, fps_cap: u32) {
        self.frame_budget = Duration::from_secs(1) / fps_cap.max(1);
    }

    fn close(&mut self) {
        self.pending.clear();
        debug!("egui surface closed");
    }
}

fn to_color(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r(), color.g(), color.b())
}

/// Runs one loop iteration whenever `update_interval` has elapsed since the
/// last one. egui also repaints on pointer activity; those frames only queue
/// input and repaint the last presented frame.
pub struct LifeApp {
    simulation: Simulation<EguiSurface>,
    last_update: Option<Instant>,
    update_interval: Duration,
}

impl LifeApp {
    pub fn new(simulation: Simulation<EguiSurface>) -> Self {
        Self { simulation, last_update: None, update_interval: Duration::ZERO }
    }

    fn is_due(&self, now: Instant) -> bool {
        self.last_update
            .is_none_or(|last| now.saturating_duration_since(last) >= self.update_interval)
    }

    /// Time left until the next iteration is due.
    fn until_due(&self, now: Instant) -> Duration {
        match self.last_update {
            Some(last) => self.update_interval.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Steps the loop if it is due; returns whether it did.
    fn advance(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        if self.simulation.tick() != RunState::Terminated {
            self.simulation.render();
        }
        self.last_update = Some(now);
        self.update_interval = self.simulation.controller_mut().surface_mut().take_repaint_delay();
        true
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let events = ctx.input(|i| i.events.clone());
        let size = {
            let geometry = self.simulation.controller().geometry();
            Vec2::new(geometry.width as f32, geometry.height as f32)
        };

        egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(size, Sense::click());
            self.simulation
                .controller_mut()
                .surface_mut()
                .ingest(response.rect.min, &events);
            self.advance(Instant::now());
            self.simulation.controller().surface().paint(&painter);
        });

        if self.simulation.state() == RunState::Terminated {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        ctx.request_repaint_after(self.until_due(Instant::now()));
    }

    fn on_close_event(&mut self) -> bool {
        // Route the close through the controller so it tears the surface down.
        self.simulation.controller_mut().surface_mut().push_quit();
        self.simulation.tick();
        true
    }
}
