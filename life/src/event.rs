use std::fmt;

/// One unit of user intent, produced by the controller once per poll and
/// consumed by the simulation in the same loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Event {
    Start,
    Stop,
    Reset,
    CellToggle { row: usize, column: usize },
    #[default]
    NoEvent,
}

impl Event {
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Event::NoEvent)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Start => f.write_str("START"),
            Event::Stop => f.write_str("STOP"),
            Event::Reset => f.write_str("RESET"),
            Event::CellToggle { row, column } => write!(f, "CELL_TOGGLE({row}, {column})"),
            Event::NoEvent => f.write_str("NO_EVENT"),
        }
    }
}
