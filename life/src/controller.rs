// controller.rs - Turns raw input into events and draws the game window

use tracing::{debug, info};

use crate::config::{ConfigError, Settings};
use crate::event::Event;
use crate::geometry::{Button, ScreenGeometry, classify_click};
use crate::grid::Grid;
use crate::surface::{RawInput, Surface};

/// Thin adapter between a `Surface` and the simulation. The controller owns
/// the surface for its whole lifetime and closes it when the user quits.
pub struct Controller<S: Surface> {
    surface: S,
    settings: Settings,
    geometry: ScreenGeometry,
    closed: bool,
}

impl<S: Surface> Controller<S> {
    /// Sizes the window for `grid` and opens the surface. Settings that
    /// would not fit in a window are rejected before the surface is touched.
    pub fn new(mut surface: S, settings: Settings, grid: &Grid) -> Result<Self, ConfigError> {
        let geometry = ScreenGeometry::new(&settings, grid.num_rows(), grid.num_cols())?;
        surface.open(&settings.caption, geometry.width, geometry.height);
        info!(width = geometry.width, height = geometry.height, "window opened");
        Ok(Self { surface, settings, geometry, closed: false })
    }

    /// Drains all pending input and returns the first recognised action.
    /// A quit request closes the surface; it is not reported as an event.
    pub fn get_event(&mut self) -> Event {
        if self.closed {
            return Event::NoEvent;
        }

        let mut event = Event::NoEvent;
        for raw in self.surface.poll_input() {
            match raw {
                RawInput::Quit => self.teardown(),
                RawInput::MouseDown { x, y } if !event.is_actionable() => {
                    event = classify_click(x, y, &self.geometry);
                    if event.is_actionable() {
                        debug!(x, y, %event, "click classified");
                    }
                }
                RawInput::MouseDown { .. } | RawInput::Other => {}
            }
        }

        if self.closed { Event::NoEvent } else { event }
    }

    /// Renders one complete frame: background, buttons with labels, then
    /// every cell. Nothing reaches the screen before `present`.
    pub fn display(&mut self, grid: &Grid, delay_ms: u64, fps_cap: u32) {
        if self.closed {
            return;
        }
        let colors = &self.settings.colors;

        self.surface.fill(colors.background);
        for button in Button::ALL {
            self.surface.draw_rect(colors.button, self.geometry.button_rect(button));
            self.surface
                .draw_text(button.label(), self.geometry.label_position(button), colors.label);
        }

        for (row, column, alive) in grid.cells() {
            let color = if alive { colors.alive } else { colors.dead };
            self.surface.draw_rect(color, self.geometry.cell_rect(row, column));
        }

        self.surface.present();
        self.surface.wait(delay_ms);
        self.surface.tick(fps_cap);
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn geometry(&self) -> &ScreenGeometry {
        &self.geometry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn teardown(&mut self) {
        if !self.closed {
            self.surface.close();
            self.closed = true;
            info!("window closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rgb;
    use crate::headless::{HeadlessSurface, Scripted};
    use crate::surface::DrawCommand;

    fn controller(rows: usize, cols: usize) -> (Controller<HeadlessSurface>, Grid) {
        let grid = Grid::dead(rows, cols).unwrap();
        (Controller::new(HeadlessSurface::new(), Settings::default(), &grid).unwrap(), grid)
    }

    #[test]
    fn opens_surface_with_caption_and_size() {
        let (ctl, _) = controller(50, 50);
        assert!(ctl.surface().is_open());
        assert_eq!(ctl.surface().size(), (600, 500));
        assert_eq!(ctl.surface().caption(), Settings::default().caption);
    }

    #[test]
    fn no_input_means_no_event() {
        let (mut ctl, _) = controller(10, 10);
        assert_eq!(ctl.get_event(), Event::NoEvent);
        ctl.surface_mut().push_batch(vec![Scripted::Other]);
        assert_eq!(ctl.get_event(), Event::NoEvent);
    }

    #[test]
    fn first_recognised_click_wins_and_batch_is_drained() {
        let (mut ctl, _) = controller(50, 50);
        ctl.surface_mut().push_batch(vec![
            Scripted::Other,
            Scripted::Click(550, 35), // gap between buttons
            Scripted::Click(550, 15), // start
            Scripted::Click(14, 5),
        ]);
        ctl.surface_mut().push_click(14, 5);
        assert_eq!(ctl.get_event(), Event::Start);
        assert_eq!(ctl.surface().script_remaining(), 1);
        assert_eq!(ctl.get_event(), Event::CellToggle { row: 0, column: 1 });
    }

    #[test]
    fn each_click_is_classified_where_it_landed() {
        let (mut ctl, _) = controller(50, 50);
        ctl.surface_mut()
            .push_batch(vec![Scripted::Click(550, 15), Scripted::Click(14, 5)]);
        assert_eq!(ctl.get_event(), Event::Start);
        // The pointer has moved on to the cell by now.
        assert_eq!(ctl.surface().mouse_position(), (14, 5));

        ctl.surface_mut()
            .push_batch(vec![Scripted::Click(550, 35), Scripted::Click(24, 15)]);
        assert_eq!(ctl.get_event(), Event::CellToggle { row: 1, column: 2 });
    }

    #[test]
    fn settings_too_large_for_a_window_are_rejected() {
        let grid = Grid::dead(10, 10).unwrap();
        let settings = Settings { cell_width: 4_000_000_000, ..Settings::default() };
        let err = Controller::new(HeadlessSurface::new(), settings, &grid).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn quit_closes_the_surface_once() {
        let (mut ctl, grid) = controller(5, 5);
        ctl.surface_mut().push_batch(vec![Scripted::Click(3, 3), Scripted::Quit]);
        assert_eq!(ctl.get_event(), Event::NoEvent);
        assert!(ctl.is_closed());
        assert!(ctl.surface().is_closed());

        ctl.display(&grid, 10, 60);
        assert_eq!(ctl.surface().frames_presented(), 0);
    }

    #[test]
    fn display_redraws_the_whole_frame() {
        let (mut ctl, mut grid) = controller(2, 3);
        grid.toggle(1, 2).unwrap();
        ctl.display(&grid, 25, 60);

        let frame = ctl.surface().last_frame();
        assert_eq!(frame.len(), 1 + 3 * 2 + 6);
        assert_eq!(frame[0], DrawCommand::Fill(Rgb::BLACK));
        assert!(matches!(&frame[2], DrawCommand::Text { text, .. } if text == "Start"));
        let alive: Vec<_> = frame
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Rect { color, .. } if *color == Rgb::WHITE))
            .collect();
        // three buttons plus the single live cell
        assert_eq!(alive.len(), 4);
        assert_eq!(
            frame.last(),
            Some(&DrawCommand::Rect { color: Rgb::WHITE, rect: ctl.geometry().cell_rect(1, 2) })
        );
        assert_eq!(ctl.surface().waited_ms(), 25);
        assert_eq!(ctl.surface().ticks(), 1);
    }
}
