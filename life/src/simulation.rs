// simulation.rs - Run/pause state machine and the polling loop
//
// One iteration: poll exactly one event, apply it, then advance the grid by
// one generation if running. Rendering happens after, in `render`.

use tracing::{debug, info, trace, warn};

use crate::config::LoopOptions;
use crate::controller::Controller;
use crate::event::Event;
use crate::grid::Grid;
use crate::surface::Surface;

const HISTORY_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Paused,
    Running,
    Terminated,
}

impl RunState {
    /// Transition for one event. Cell toggles never change the run state.
    pub fn on_event(self, event: Event) -> RunState {
        match (self, event) {
            (RunState::Terminated, _) => RunState::Terminated,
            (_, Event::Reset) => RunState::Paused,
            (RunState::Paused, Event::Start) => RunState::Running,
            (RunState::Running, Event::Stop) => RunState::Paused,
            (state, _) => state,
        }
    }
}

/// Remembers the fingerprints of recent generations to notice a pattern
/// that has settled into a still life or an oscillator.
#[derive(Debug, Default)]
struct CycleDetector {
    history: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleDetector {
    fn observe(&mut self, fingerprint: u64) -> bool {
        let seen = self.history[..self.count.min(HISTORY_LEN)].contains(&fingerprint);
        self.history[self.count % HISTORY_LEN] = fingerprint;
        self.count += 1;
        seen
    }

    fn clear(&mut self) {
        self.count = 0;
    }
}

pub struct Simulation<S: Surface> {
    grid: Grid,
    controller: Controller<S>,
    options: LoopOptions,
    state: RunState,
    generation: u64,
    cycles: CycleDetector,
    cycling: bool,
}

impl<S: Surface> Simulation<S> {
    pub fn new(grid: Grid, controller: Controller<S>, options: LoopOptions) -> Self {
        Self {
            grid,
            controller,
            options,
            state: RunState::Paused,
            generation: 0,
            cycles: CycleDetector::default(),
            cycling: false,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once a generation repeated one of the last few. Informational
    /// only; the simulation keeps running until stopped.
    pub fn is_cycling(&self) -> bool {
        self.cycling
    }

    pub fn controller(&self) -> &Controller<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<S> {
        &mut self.controller
    }

    /// Applies one event to the run state and the grid.
    pub fn handle_event(&mut self, event: Event) -> RunState {
        if self.state == RunState::Terminated {
            return self.state;
        }

        match event {
            Event::Reset => {
                self.grid.reset();
                self.generation = 0;
                self.clear_history();
            }
            Event::CellToggle { row, column } if self.state == RunState::Running => {
                debug!(row, column, "toggle ignored while running");
            }
            Event::CellToggle { row, column } => match self.grid.toggle(row, column) {
                Ok(alive) => {
                    debug!(row, column, alive, "cell toggled");
                    self.clear_history();
                }
                Err(err) => warn!(%err, "toggle rejected"),
            },
            Event::Start | Event::Stop | Event::NoEvent => {}
        }

        let next = self.state.on_event(event);
        if next != self.state {
            info!(from = ?self.state, to = ?next, generation = self.generation, "run state changed");
            self.state = next;
        }
        self.state
    }

    /// One loop iteration: exactly one event, then at most one generation.
    pub fn tick(&mut self) -> RunState {
        let event = self.controller.get_event();
        if self.controller.is_closed() {
            if self.state != RunState::Terminated {
                info!(generation = self.generation, "simulation terminated");
            }
            self.state = RunState::Terminated;
            return self.state;
        }

        self.handle_event(event);
        if self.state == RunState::Running {
            self.advance();
        }
        self.state
    }

    pub fn render(&mut self) {
        self.controller.display(&self.grid, self.options.delay_ms, self.options.fps_cap);
    }

    /// Runs until the window is closed and returns the generation reached.
    pub fn run(&mut self) -> u64 {
        while self.tick() != RunState::Terminated {
            self.render();
        }
        self.generation
    }

    fn advance(&mut self) {
        self.grid.step();
        self.generation += 1;
        trace!(generation = self.generation, "stepped");

        if self.cycles.observe(self.grid.fingerprint()) && !self.cycling {
            self.cycling = true;
            info!(
                generation = self.generation,
                population = self.grid.population(),
                "pattern repeats"
            );
        }
    }

    fn clear_history(&mut self) {
        self.cycles.clear();
        self.cycling = false;
    }
}
