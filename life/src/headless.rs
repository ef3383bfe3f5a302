// headless.rs - In-memory surface driven by a script of input batches

use std::collections::VecDeque;

use crate::config::Rgb;
use crate::geometry::PixelRect;
use crate::surface::{DrawCommand, FrameBuffer, RawInput, Surface};

/// Scripted input for one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted {
    Click(i32, i32),
    Quit,
    Other,
}

/// A surface with no window. Each `poll_input` consumes one scripted batch;
/// once the script runs out every poll is empty.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    script: VecDeque<Vec<Scripted>>,
    mouse: (i32, i32),
    frame: FrameBuffer,
    caption: String,
    size: (u32, u32),
    waited_ms: u64,
    ticks: u64,
    open: bool,
    closed: bool,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one batch of input, delivered by a single poll.
    pub fn push_batch(&mut self, batch: Vec<Scripted>) -> &mut Self {
        self.script.push_back(batch);
        self
    }

    pub fn push_click(&mut self, x: i32, y: i32) -> &mut Self {
        self.push_batch(vec![Scripted::Click(x, y)])
    }

    /// Queues a poll that delivers nothing.
    pub fn push_idle(&mut self) -> &mut Self {
        self.push_batch(Vec::new())
    }

    pub fn push_quit(&mut self) -> &mut Self {
        self.push_batch(vec![Scripted::Quit])
    }

    pub fn last_frame(&self) -> &[DrawCommand] {
        self.frame.front()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frame.frames_presented()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn waited_ms(&self) -> u64 {
        self.waited_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn script_remaining(&self) -> usize {
        self.script.len()
    }
}

impl Surface for HeadlessSurface {
    fn open(&mut self, caption: &str, width: u32, height: u32) {
        self.caption = caption.to_string();
        self.size = (width, height);
        self.open = true;
    }

    fn poll_input(&mut self) -> Vec<RawInput> {
        let Some(batch) = self.script.pop_front() else {
            return Vec::new();
        };
        batch
            .into_iter()
            .map(|scripted| match scripted {
                Scripted::Click(x, y) => {
                    self.mouse = (x, y);
                    RawInput::MouseDown { x, y }
                }
                Scripted::Quit => RawInput::Quit,
                Scripted::Other => RawInput::Other,
            })
            .collect()
    }

    fn mouse_position(&self) -> (i32, i32) {
        self.mouse
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

    fn wait(&mut self, ms: u64) {
        self.waited_ms += ms;
    }

    fn tick(&mut self, _fps_cap: u32) {
        self.ticks += 1;
    }

    fn close(&mut self) {
        self.open = false;
        self.closed = true;
    }
}
