use super::error::Result;
use super::geometry::Direction;

pub(crate) trait EventSource {
    /// Block until the next event. Implementations yield `Event::Tick` when nothing happened for
    /// a while, which drives timed sequences such as replay.
    fn next_event(&mut self) -> Result<Event>;
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    UserInput(UserInput),
    Resize,
    Tick,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum UserInput {
    /// Left mouse button pressed at the given terminal column and row.
    Click(usize, usize),
    /// Move the keyboard cursor one cell.
    Cursor(Direction),
    /// Activate the tile under the keyboard cursor.
    Activate,
    NewGame,
    ShowSolution,
    Grow,
    Shrink,
    NextImage,
    Dismiss,
    Quit,
}
