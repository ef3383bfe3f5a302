// geometry.rs - Pixel layout of the window and click classification
//
// The window is the cell area on the left plus a fixed control strip on the
// right holding the Start/Stop/Reset buttons.

use crate::config::{ConfigError, Settings};
use crate::event::Event;

/// Width of the control strip on the right of the cell area.
pub const PANEL_WIDTH: u32 = 100;
/// Smallest window height that still shows every button.
pub const PANEL_MIN_HEIGHT: u32 = 100;
pub const LABEL_FONT_SIZE: f32 = 15.0;

const BUTTON_INSET: i32 = 80;
const BUTTON_WIDTH: i32 = 60;
const BUTTON_HEIGHT: i32 = 20;
const LABEL_INSET: i32 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    Stop,
    Reset,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Start, Button::Stop, Button::Reset];

    pub fn label(self) -> &'static str {
        match self {
            Button::Start => "Start",
            Button::Stop => "Stop",
            Button::Reset => "Reset",
        }
    }

    pub fn event(self) -> Event {
        match self {
            Button::Start => Event::Start,
            Button::Stop => Event::Stop,
            Button::Reset => Event::Reset,
        }
    }

    fn top(self) -> i32 {
        match self {
            Button::Start => 10,
            Button::Stop => 40,
            Button::Reset => 70,
        }
    }

    fn label_top(self) -> i32 {
        match self {
            Button::Start => 14,
            Button::Stop => 38,
            Button::Reset => 68,
        }
    }
}

/// Pixel layout derived once from the settings and the grid dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub cell_width: u32,
    pub cell_height: u32,
    pub cell_margin: u32,
    pub rows: usize,
    pub cols: usize,
    pub width: u32,
    pub height: u32,
}

impl ScreenGeometry {
    /// Fails when the window would not fit in `i32` pixel coordinates.
    pub fn new(settings: &Settings, rows: usize, cols: usize) -> Result<Self, ConfigError> {
        settings.validate()?;
        let too_large = || {
            ConfigError::Invalid(format!(
                "a {rows}x{cols} grid of {}x{} cells does not fit in a window",
                settings.cell_width, settings.cell_height
            ))
        };
        let span = |count: usize, cell: u32| {
            u32::try_from(count)
                .ok()
                .and_then(|count| count.checked_mul(cell + settings.cell_margin))
        };

        let width = span(cols, settings.cell_width)
            .and_then(|grid_width| grid_width.checked_add(PANEL_WIDTH))
            .filter(|&width| i32::try_from(width).is_ok())
            .ok_or_else(too_large)?;
        let height = span(rows, settings.cell_height)
            .filter(|&grid_height| i32::try_from(grid_height).is_ok())
            .ok_or_else(too_large)?
            .max(PANEL_MIN_HEIGHT);

        Ok(Self {
            cell_width: settings.cell_width,
            cell_height: settings.cell_height,
            cell_margin: settings.cell_margin,
            rows,
            cols,
            width,
            height,
        })
    }

    /// Right edge of the cell area; the control strip starts here.
    pub fn grid_area_width(&self) -> i32 {
        (self.width - PANEL_WIDTH) as i32
    }

    pub fn grid_area_height(&self) -> i32 {
        self.rows as i32 * (self.cell_height + self.cell_margin) as i32
    }

    pub fn cell_rect(&self, row: usize, column: usize) -> PixelRect {
        let margin = self.cell_margin as i32;
        PixelRect::new(
            margin + (margin + self.cell_width as i32) * column as i32,
            margin + (margin + self.cell_height as i32) * row as i32,
            self.cell_width as i32,
            self.cell_height as i32,
        )
    }

    pub fn button_rect(&self, button: Button) -> PixelRect {
        PixelRect::new(self.width as i32 - BUTTON_INSET, button.top(), BUTTON_WIDTH, BUTTON_HEIGHT)
    }

    pub fn label_position(&self, button: Button) -> (i32, i32) {
        (self.width as i32 - LABEL_INSET, button.label_top())
    }

    /// Maps a pixel to the cell under it, if it lies in the cell area.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x >= self.grid_area_width() || y >= self.grid_area_height() {
            return None;
        }
        let column = x / (self.cell_width + self.cell_margin) as i32;
        let row = y / (self.cell_height + self.cell_margin) as i32;
        Some((row as usize, column as usize))
    }
}

/// Classifies a click at pixel `(x, y)`. Buttons are checked first, then the
/// cell area; anything else is `NoEvent`.
pub fn classify_click(x: i32, y: i32, geometry: &ScreenGeometry) -> Event {
    if let Some(button) = Button::ALL
        .into_iter()
        .find(|&button| geometry.button_rect(button).contains(x, y))
    {
        return button.event();
    }
    match geometry.cell_at(x, y) {
        Some((row, column)) => Event::CellToggle { row, column },
        None => Event::NoEvent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(rows: usize, cols: usize) -> ScreenGeometry {
        ScreenGeometry::new(&Settings::default(), rows, cols).unwrap()
    }

    #[test]
    fn window_size_matches_grid() {
        let g = geometry(50, 60);
        assert_eq!((g.width, g.height), (60 * 10 + 100, 500));
        // Short grids still leave room for the buttons.
        assert_eq!(geometry(3, 3).height, PANEL_MIN_HEIGHT);
    }

    #[test]
    fn oversized_window_is_an_error() {
        let settings = Settings::default();
        assert!(matches!(
            ScreenGeometry::new(&settings, 10, usize::MAX),
            Err(ConfigError::Invalid(_))
        ));
        // 300_000_000 columns of 10 px fit in u32 but not in i32.
        assert!(ScreenGeometry::new(&settings, 10, 300_000_000).is_err());
        assert!(ScreenGeometry::new(&settings, 300_000_000, 10).is_err());

        let wide = Settings { cell_width: 4_000_000_000, ..Settings::default() };
        assert!(ScreenGeometry::new(&wide, 1, 1).is_err());
    }

    #[test]
    fn click_maps_to_cell_by_integer_division() {
        let g = geometry(50, 50);
        assert_eq!(classify_click(14, 5, &g), Event::CellToggle { row: 0, column: 1 });
        assert_eq!(classify_click(0, 0, &g), Event::CellToggle { row: 0, column: 0 });
        assert_eq!(classify_click(499, 499, &g), Event::CellToggle { row: 49, column: 49 });
    }

    #[test]
    fn buttons_take_priority() {
        let g = geometry(50, 50);
        assert_eq!(g.button_rect(Button::Start), PixelRect::new(520, 10, 60, 20));
        assert_eq!(classify_click(520, 10, &g), Event::Start);
        assert_eq!(classify_click(579, 45, &g), Event::Stop);
        assert_eq!(classify_click(550, 89, &g), Event::Reset);
        // Gap between buttons and the strip outside them.
        assert_eq!(classify_click(550, 35, &g), Event::NoEvent);
        assert_eq!(classify_click(580, 10, &g), Event::NoEvent);
        assert_eq!(classify_click(505, 200, &g), Event::NoEvent);
    }

    #[test]
    fn clicks_outside_the_cell_area_are_ignored() {
        let g = geometry(3, 3);
        assert_eq!(classify_click(5, 50, &g), Event::NoEvent);
        assert_eq!(classify_click(-1, 5, &g), Event::NoEvent);
        assert_eq!(classify_click(30, 5, &g), Event::NoEvent);
    }

    #[test]
    fn cell_rects_follow_margin() {
        let g = geometry(5, 5);
        assert_eq!(g.cell_rect(0, 0), PixelRect::new(1, 1, 9, 9));
        assert_eq!(g.cell_rect(2, 3), PixelRect::new(31, 21, 9, 9));
        assert_eq!(g.label_position(Button::Reset), (g.width as i32 - 65, 68));
    }
}
