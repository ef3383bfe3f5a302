// surface.rs - Rendering/input collaborator used by the controller
//
// Anything that can show rectangles and text and report clicks can host the
// game: the egui window in `life_gui`, or `HeadlessSurface` in tests.

use crate::config::Rgb;
use crate::geometry::PixelRect;

/// Raw input as delivered by the windowing layer, before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// The user asked to close the window.
    Quit,
    /// Primary button pressed at `(x, y)`, in window pixels.
    MouseDown { x: i32, y: i32 },
    /// Anything the controller does not act on (moves, keys, ...).
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Fill(Rgb),
    Rect { color: Rgb, rect: PixelRect },
    Text { text: String, position: (i32, i32), color: Rgb },
}

pub trait Surface {
    /// Acquires the window with the given caption and pixel size.
    fn open(&mut self, caption: &str, width: u32, height: u32);
    /// Drains the input that arrived since the last poll.
    fn poll_input(&mut self) -> Vec<RawInput>;
    /// Last known pointer position, in window pixels.
    fn mouse_position(&self) -> (i32, i32);
    fn fill(&mut self, color: Rgb);
    fn draw_rect(&mut self, color: Rgb, rect: PixelRect);
    fn draw_text(&mut self, text: &str, position: (i32, i32), color: Rgb);
    /// Shows everything drawn since the previous `present`.
    fn present(&mut self);
    fn wait(&mut self, ms: u64);
    /// Caps the frame rate at `fps_cap` frames per second.
    fn tick(&mut self, fps_cap: u32);
    /// Releases the window. Called at most once.
    fn close(&mut self);
}

/// Double-buffered list of draw commands. Drawing goes to the back buffer;
/// `present` swaps it to the front and starts a fresh back buffer, so the
/// front is always a complete frame.
#[derive(Debug, Default, Clone)]
pub struct FrameBuffer {
    back: Vec<DrawCommand>,
    front: Vec<DrawCommand>,
    presented: u64,
}

impl FrameBuffer {
    pub fn push(&mut self, command: DrawCommand) {
        self.back.push(command);
    }

    pub fn present(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        self.back.clear();
        self.presented += 1;
    }

    /// The last presented frame.
    pub fn front(&self) -> &[DrawCommand] {
        &self.front
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_swaps_whole_frames() {
        let mut frame = FrameBuffer::default();
        frame.push(DrawCommand::Fill(Rgb::BLACK));
        assert!(frame.front().is_empty());
        frame.present();
        assert_eq!(frame.front(), &[DrawCommand::Fill(Rgb::BLACK)]);

        frame.push(DrawCommand::Fill(Rgb::WHITE));
        assert_eq!(frame.front(), &[DrawCommand::Fill(Rgb::BLACK)]);
        frame.present();
        assert_eq!(frame.front(), &[DrawCommand::Fill(Rgb::WHITE)]);
        assert_eq!(frame.frames_presented(), 2);
    }
}
