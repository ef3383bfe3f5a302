//! Conway's Game of Life: grid, input events, controller and the polling
//! simulation loop. Rendering is delegated to a [`Surface`]; the egui window
//! lives in the `life_gui` crate.

pub mod config;
pub mod controller;
pub mod event;
pub mod geometry;
pub mod grid;
pub mod headless;
pub mod patterns;
pub mod simulation;
pub mod surface;

pub use config::{ConfigError, LoopOptions, Palette, Rgb, Settings};
pub use controller::Controller;
pub use event::Event;
pub use geometry::{Button, PixelRect, ScreenGeometry, classify_click};
pub use grid::{Fill, Grid, GridError};
pub use headless::{HeadlessSurface, Scripted};
pub use patterns::{PATTERNS, Pattern};
pub use simulation::{RunState, Simulation};
pub use surface::{DrawCommand, FrameBuffer, RawInput, Surface};
