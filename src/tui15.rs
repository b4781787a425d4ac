use std::collections::HashMap;
use std::time::Duration;

use log::{debug, info, warn};

use crate::engine::grid::{Grid, Idx as BoardIdx, Label, MoveHint, MIN_SIZE};
use crate::error::{Error, Result};
use crate::session::{GameSession, ImageRef, Outcome, Phase};
use crate::tui::canvas::{Canvas, Modifier};
use crate::tui::colors::{next_image, Theme};
use crate::tui::drawbuffer::DrawBuffer;
use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::geometry::{Bounds2D, Direction, Idx, Rectangle};
use crate::tui::renderer::Renderer;
use crate::tui::textbuffer::{FormatOptions, HAlignment, TextBuffer, VAlignment};

/// Board layout, shown here for a 3x3 board:
///
///  ╔═══════════════════════════════╗
///  ║                               ║
///  ║  ╔═════╗ ╔═════╗ ╔═════╗      ║
///  ║  ║  1  ║ ║  2  ║ ║  3  ║      ║
///  ║  ╚═════╝ ╚═════╝ ╚═════╝      ║
///  ║  ...                          ║
///  ║                               ║
///  ╚═══════════════════════════════╝
///   status lines
const BOARD_FIXED_X_OFFSET: usize = 2;
const BOARD_FIXED_Y_OFFSET: usize = 1;
const BOARD_BORDER_WIDTH: usize = 1;
const BOARD_X_PADDING: usize = 2;
const BOARD_Y_PADDING: usize = 1;
const TILE_WIDTH: usize = 7;
const TILE_HEIGHT: usize = 3;
const TILE_X_GAP: usize = 1;
const TILE_Y_GAP: usize = 0;
const STATUS_HEIGHT: usize = 4;
const STATUS_MIN_WIDTH: usize = 48;
const MODAL_WIDTH: usize = 26;
const MODAL_HEIGHT: usize = 5;

/// Columns and rows a sliding tile covers per animation frame.
const SLIDE_X_STEP: usize = 2;
const SLIDE_Y_STEP: usize = 1;

/// Largest board the player can grow to from the keyboard.
pub(crate) const MAX_BOARD_SIZE: usize = 8;

/// Layout maps board cells to terminal rectangles and terminal coordinates back to cells.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Layout {
    size: usize,
}

impl Layout {
    fn new(size: usize) -> Self {
        Self { size }
    }

    fn board_rectangle(&self) -> Rectangle {
        let width = 2 * (BOARD_BORDER_WIDTH + BOARD_X_PADDING)
            + self.size * TILE_WIDTH
            + (self.size - 1) * TILE_X_GAP;
        let height = 2 * (BOARD_BORDER_WIDTH + BOARD_Y_PADDING)
            + self.size * TILE_HEIGHT
            + (self.size - 1) * TILE_Y_GAP;
        Rectangle(
            Idx(BOARD_FIXED_X_OFFSET, BOARD_FIXED_Y_OFFSET),
            Bounds2D(width, height),
        )
    }

    fn status_rectangle(&self) -> Rectangle {
        let board = self.board_rectangle();
        Rectangle(
            Idx(board.x(), board.y() + board.height()),
            Bounds2D(board.width().max(STATUS_MIN_WIDTH), STATUS_HEIGHT),
        )
    }

    fn modal_rectangle(&self) -> Rectangle {
        let board = self.board_rectangle();
        let width = MODAL_WIDTH.min(board.width());
        Rectangle(
            Idx(
                board.x() + (board.width() - width) / 2,
                board.y() + (board.height() - MODAL_HEIGHT) / 2,
            ),
            Bounds2D(width, MODAL_HEIGHT),
        )
    }

    /// Smallest terminal the layout fits in.
    fn required(&self) -> (usize, usize) {
        self.status_rectangle().extents()
    }

    fn origin(&self) -> Idx {
        Idx(
            BOARD_FIXED_X_OFFSET + BOARD_BORDER_WIDTH + BOARD_X_PADDING,
            BOARD_FIXED_Y_OFFSET + BOARD_BORDER_WIDTH + BOARD_Y_PADDING,
        )
    }

    fn tile_rectangle(&self, idx: &BoardIdx) -> Rectangle {
        let origin = self.origin();
        Rectangle(
            Idx(
                origin.x() + idx.col() * (TILE_WIDTH + TILE_X_GAP),
                origin.y() + idx.row() * (TILE_HEIGHT + TILE_Y_GAP),
            ),
            Bounds2D(TILE_WIDTH, TILE_HEIGHT),
        )
    }

    /// The board cell under a terminal coordinate, if any. Gaps between tiles belong to no cell.
    fn cell_at(&self, x: usize, y: usize) -> Option<BoardIdx> {
        let origin = self.origin();
        if x < origin.x() || y < origin.y() {
            return None;
        }
        let col = (x - origin.x()) / (TILE_WIDTH + TILE_X_GAP);
        let row = (y - origin.y()) / (TILE_HEIGHT + TILE_Y_GAP);
        if row >= self.size || col >= self.size {
            return None;
        }
        let idx = BoardIdx(row, col);
        if self.tile_rectangle(&idx).contains(&Idx(x, y)) {
            Some(idx)
        } else {
            None
        }
    }
}

/// The drawable pieces of a board: its frame and one buffer per tile, looked up by label.
struct Tui15Board {
    layout: Layout,
    theme: Theme,
    frame: DrawBuffer,
    tiles: HashMap<Label, DrawBuffer>,
}

impl Tui15Board {
    fn new(session: &GameSession, canvas: &Canvas) -> Result<Self> {
        let grid = session.grid();
        let layout = Layout::new(grid.size());
        let (cwidth, cheight) = canvas.dimensions();
        let (x_extent, y_extent) = layout.required();
        if cwidth < x_extent || cheight < y_extent {
            return Err(Error::TerminalTooSmall(x_extent, y_extent));
        }

        let theme = Theme::for_image(session.image().as_str());
        let (board_bg, board_fg) = theme.board_colors();
        let mut frame = canvas.get_draw_buffer(layout.board_rectangle());
        frame.draw_border();
        frame.fill(' ');
        frame.modify(Modifier::SetBackgroundColor(board_bg));
        frame.modify(Modifier::SetForegroundColor(board_fg));

        let mut tiles = HashMap::with_capacity(grid.size() * grid.size());
        for (idx, cell) in grid.cells() {
            if let Some(tile) = cell {
                let label = tile.label();
                let home = home_of(label, grid.size());
                let (bg, fg) = theme.tile_colors(&home, grid.size());
                let mut tile_buf = canvas.get_draw_buffer(layout.tile_rectangle(&idx));
                tile_buf.modify(Modifier::SetBackgroundColor(bg));
                tile_buf.modify(Modifier::SetForegroundColor(fg));
                tile_buf.draw_border();
                tile_buf.fill(' ');
                tile_buf.write_center(&format!("{}", label));
                tiles.insert(label, tile_buf);
            }
        }

        Ok(Self {
            layout,
            theme,
            frame,
            tiles,
        })
    }

    /// Put every tile buffer back on the cell its tile occupies.
    fn sync(&mut self, grid: &Grid) {
        for (idx, cell) in grid.cells() {
            if let Some(tile) = cell {
                if let Some(tile_buf) = self.tiles.get_mut(&tile.label()) {
                    tile_buf.move_to(self.layout.tile_rectangle(&idx).0);
                }
            }
        }
    }

    fn draw(
        &self,
        canvas: &mut Canvas,
        grid: &Grid,
        moveable: &[BoardIdx],
        cursor: Option<BoardIdx>,
    ) {
        canvas.draw(&self.frame);
        for (idx, cell) in grid.cells() {
            let tile_buf = match cell.and_then(|tile| self.tiles.get(&tile.label())) {
                Some(tile_buf) => tile_buf,
                None => continue,
            };
            if moveable.contains(&idx) {
                let mut highlighted = tile_buf.clone();
                highlighted.modify(Modifier::Bold);
                canvas.draw(&highlighted);
            } else {
                canvas.draw(tile_buf);
            }
        }
        if let Some(cursor) = cursor {
            let mut marker = canvas.get_draw_buffer(self.layout.tile_rectangle(&cursor));
            marker.draw_border();
            marker.modify(Modifier::SetForegroundColor(self.theme.highlight()));
            marker.modify(Modifier::Bold);
            canvas.draw(&marker);
        }
    }

    fn modal(&self, canvas: &Canvas) -> Result<DrawBuffer> {
        let (bg, fg) = self.theme.board_colors();
        let mut dbuf = canvas.get_draw_buffer(self.layout.modal_rectangle());
        dbuf.draw_border();
        dbuf.fill(' ');
        dbuf.modify(Modifier::SetBackgroundColor(fg));
        dbuf.modify(Modifier::SetForegroundColor(bg));
        dbuf.modify(Modifier::Bold);
        let mut tbuf = TextBuffer::new(dbuf);
        tbuf.write("solved!", None, None);
        tbuf.write("n: play again  d: close", None, None);
        Ok(tbuf.flush()?)
    }
}

/// The cell a tile occupies on a solved board.
fn home_of(label: Label, size: usize) -> BoardIdx {
    let rank = label as usize - 1;
    BoardIdx(rank / size, rank % size)
}

/// Slides the tiles named in a MoveHint from their current buffers to their new cells, one
/// frame at a time.
struct AnimatedTui15Board {
    tui_board: Tui15Board,
    slides: Vec<(Label, Rectangle)>,
}

impl AnimatedTui15Board {
    fn new(tui_board: Tui15Board, hint: &MoveHint) -> Self {
        let slides = hint
            .updates()
            .iter()
            .map(|update| (update.label, tui_board.layout.tile_rectangle(&update.to)))
            .collect();
        Self { tui_board, slides }
    }

    /// Advance every sliding tile by one frame. Returns false once all of them have arrived.
    fn animate(&mut self) -> Result<bool> {
        let mut moving = false;
        for (label, target) in &self.slides {
            let tile_buf = match self.tui_board.tiles.get_mut(label) {
                Some(tile_buf) => tile_buf,
                None => continue,
            };
            let current = tile_buf.rectangle();
            let (direction, distance, step) = if current.x() < target.x() {
                (Direction::Right, target.x() - current.x(), SLIDE_X_STEP)
            } else if current.x() > target.x() {
                (Direction::Left, current.x() - target.x(), SLIDE_X_STEP)
            } else if current.y() < target.y() {
                (Direction::Down, target.y() - current.y(), SLIDE_Y_STEP)
            } else if current.y() > target.y() {
                (Direction::Up, current.y() - target.y(), SLIDE_Y_STEP)
            } else {
                continue;
            };
            tile_buf.translate(step.min(distance), &direction)?;
            moving = true;
        }
        Ok(moving)
    }

    fn board(&self) -> &Tui15Board {
        &self.tui_board
    }

    fn extract_board(self) -> Tui15Board {
        self.tui_board
    }
}

pub(crate) struct Tui15<R: Renderer, E: EventSource> {
    renderer: R,
    event_source: E,
    canvas: Canvas,
    session: GameSession,
    tui_board: Option<Tui15Board>,
    cursor: BoardIdx,
    modal: bool,
    dirty: bool,
    frame_delay: Duration,
}

impl<R: Renderer, E: EventSource> Tui15<R, E> {
    pub(crate) fn new(
        session: GameSession,
        renderer: R,
        event_source: E,
        frame_delay: Duration,
    ) -> Result<Self> {
        let (width, height) = renderer.size_hint()?;
        let cursor = session.grid().blank();
        Ok(Self {
            renderer,
            event_source,
            canvas: Canvas::new(width as usize, height as usize),
            session,
            tui_board: None,
            cursor,
            modal: false,
            dirty: true,
            frame_delay,
        })
    }

    /// Run consumes the Tui15 instance and takes control of the terminal to begin gameplay.
    pub(crate) fn run(mut self) -> Result<()> {
        self.inner_run()
    }

    fn inner_run(&mut self) -> Result<()> {
        if self.session.phase() == Phase::Ready {
            self.new_game()?;
        }
        self.resize()?;

        loop {
            if self.dirty {
                self.draw()?;
                self.dirty = false;
            }

            match self.event_source.next_event()? {
                Event::UserInput(UserInput::Quit) => break,
                Event::UserInput(input) => {
                    self.handle_input(input)?;
                    self.dirty = true;
                }
                Event::Resize => {
                    self.resize()?;
                    self.renderer.clear()?;
                    self.dirty = true;
                }
                Event::Tick => self.tick()?,
            }
        }
        info!("quitting");
        Ok(())
    }
}

impl<R: Renderer, E: EventSource> Tui15<R, E> {
    fn handle_input(&mut self, input: UserInput) -> Result<()> {
        debug!("input {:?}", input);
        match input {
            UserInput::Click(_, _) if self.modal => self.modal = false,
            UserInput::Click(x, y) => {
                let cell = self
                    .tui_board
                    .as_ref()
                    .and_then(|tb| tb.layout.cell_at(x, y));
                if let Some(idx) = cell {
                    self.cursor = idx;
                    self.activate(idx)?;
                }
            }
            UserInput::Cursor(direction) => self.move_cursor(&direction),
            UserInput::Activate => self.activate(self.cursor)?,
            UserInput::NewGame => self.new_game()?,
            UserInput::ShowSolution => {
                if !self.session.begin_replay() {
                    debug!("nothing to replay while {}", self.session.phase());
                }
            }
            UserInput::Grow => self.change_size(self.session.config().size + 1)?,
            UserInput::Shrink => self.change_size(self.session.config().size.saturating_sub(1))?,
            UserInput::NextImage => {
                let image = ImageRef::new(next_image(self.session.image().as_str()));
                if self.session.change_image(image)? {
                    self.rebuild()?;
                }
            }
            UserInput::Dismiss if self.modal => self.modal = false,
            UserInput::Dismiss => self.session.cancel_replay(),
            UserInput::Quit => (),
        }
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        if self.session.phase() != Phase::Replaying {
            return Ok(());
        }
        if let Some(outcome) = self.session.replay_step()? {
            self.apply(outcome)?;
        }
        self.dirty = true;
        Ok(())
    }

    fn activate(&mut self, idx: BoardIdx) -> Result<()> {
        if let Some(outcome) = self.session.activate(&idx)? {
            self.apply(outcome)?;
        }
        Ok(())
    }

    fn apply(&mut self, outcome: Outcome) -> Result<()> {
        self.slide(&outcome.hint)?;
        if outcome.solved {
            info!("board solved");
            self.modal = true;
        }
        Ok(())
    }

    fn new_game(&mut self) -> Result<()> {
        self.session.start()?;
        self.modal = false;
        self.cursor = self.session.grid().blank();
        if let Some(tui_board) = self.tui_board.as_mut() {
            tui_board.sync(self.session.grid());
        }
        Ok(())
    }

    fn change_size(&mut self, size: usize) -> Result<()> {
        if !(MIN_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            debug!("refusing to resize board to {}", size);
            return Ok(());
        }
        if self.session.change_size(size)? {
            self.rebuild()?;
        }
        Ok(())
    }

    fn move_cursor(&mut self, direction: &Direction) {
        let max = self.session.grid().size() - 1;
        let BoardIdx(row, col) = self.cursor;
        self.cursor = match direction {
            Direction::Left => BoardIdx(row, col.saturating_sub(1)),
            Direction::Right => BoardIdx(row, (col + 1).min(max)),
            Direction::Up => BoardIdx(row.saturating_sub(1), col),
            Direction::Down => BoardIdx((row + 1).min(max), col),
        };
    }

    fn resize(&mut self) -> Result<()> {
        let (width, height) = self.renderer.size_hint()?;
        self.canvas = Canvas::new(width as usize, height as usize);
        self.rebuild()
    }

    /// Recreate the board's drawables after the board, its image or the terminal changed.
    fn rebuild(&mut self) -> Result<()> {
        self.modal = false;
        self.cursor = self.session.grid().blank();
        self.tui_board = match Tui15Board::new(&self.session, &self.canvas) {
            Ok(tb) => Some(tb),
            Err(Error::TerminalTooSmall(width, height)) => {
                warn!("terminal too small, need {} x {}", width, height);
                None
            }
            Err(e) => return Err(e),
        };
        Ok(())
    }

    fn slide(&mut self, hint: &MoveHint) -> Result<()> {
        let tui_board = match self.tui_board.take() {
            Some(tb) => tb,
            None => return Ok(()),
        };
        debug!("sliding {} tiles", hint.len());
        let mut tui_board = if self.frame_delay.is_zero() {
            tui_board
        } else {
            let mut animation = AnimatedTui15Board::new(tui_board, hint);
            while animation.animate()? {
                self.paint(Some(animation.board()))?;
                std::thread::sleep(self.frame_delay);
            }
            animation.extract_board()
        };
        tui_board.sync(self.session.grid());
        self.tui_board = Some(tui_board);
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let tui_board = self.tui_board.take();
        let result = self.paint(tui_board.as_ref());
        self.tui_board = tui_board;
        result
    }

    fn paint(&mut self, tui_board: Option<&Tui15Board>) -> Result<()> {
        self.canvas.clear();
        match tui_board {
            Some(tui_board) => {
                let cursor = match self.session.phase() {
                    Phase::Playing => Some(self.cursor),
                    _ => None,
                };
                tui_board.draw(
                    &mut self.canvas,
                    self.session.grid(),
                    &self.session.moveable(),
                    cursor,
                );
                let status = self.status(tui_board.layout.status_rectangle())?;
                self.canvas.draw(&status);
                if self.modal {
                    let modal = tui_board.modal(&self.canvas)?;
                    self.canvas.draw(&modal);
                }
            }
            None => {
                let (width, height) = Layout::new(self.session.grid().size()).required();
                let mut tbuf = TextBuffer::new(self.canvas.get_layer());
                tbuf.write(
                    &format!(
                        "terminal too small: the board needs {} x {}, resize or press - (q quits)",
                        width, height
                    ),
                    None,
                    None,
                );
                let message = tbuf.flush()?;
                self.canvas.draw(&message);
            }
        }
        self.renderer.render(&self.canvas)?;
        Ok(())
    }

    fn status(&self, rectangle: Rectangle) -> Result<DrawBuffer> {
        let size = self.session.grid().size();
        let prompt = match self.session.phase() {
            Phase::Ready => "press n to shuffle and start",
            Phase::Playing => "click a tile in line with the gap, or move with the arrows and press space",
            Phase::Replaying => "showing the solution, d stops it",
            Phase::Solved => "solved! press n for a new game",
        };
        let mut tbuf = TextBuffer::new(self.canvas.get_draw_buffer(rectangle));
        tbuf.format(&FormatOptions {
            halign: HAlignment::Left,
            valign: VAlignment::Top,
        });
        tbuf.write(
            &format!("{0}x{0}  image: {1}", size, self.session.image()),
            None,
            None,
        );
        tbuf.write(prompt, None, None);
        tbuf.write("n new  c solution  +/- size  i image  q quit", None, None);
        Ok(tbuf.flush()?)
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use rstest::*;

    use super::*;
    use crate::session::GameConfig;
    use crate::tui::error::Result as TuiResult;

    struct TestRenderer {
        size: (u16, u16),
        frames: Rc<RefCell<Vec<Vec<String>>>>,
    }

    impl Renderer for TestRenderer {
        fn size_hint(&self) -> TuiResult<(u16, u16)> {
            Ok(self.size)
        }

        fn render(&mut self, c: &Canvas) -> TuiResult<()> {
            let (_, height) = c.dimensions();
            let frame = (0..height).map(|y| c.row_text(y)).collect();
            self.frames.borrow_mut().push(frame);
            Ok(())
        }

        fn clear(&mut self) -> TuiResult<()> {
            Ok(())
        }
    }

    /// Plays back a fixed list of events, then quits.
    struct ScriptedEvents {
        events: VecDeque<Event>,
    }

    impl EventSource for ScriptedEvents {
        fn next_event(&mut self) -> TuiResult<Event> {
            Ok(self
                .events
                .pop_front()
                .unwrap_or(Event::UserInput(UserInput::Quit)))
        }
    }

    fn session(size: usize) -> GameSession {
        let config = GameConfig {
            size,
            image: ImageRef::new("sunset"),
        };
        GameSession::new(config, SmallRng::seed_from_u64(42)).expect("valid size")
    }

    fn harness(
        session: GameSession,
        size: (u16, u16),
        events: Vec<Event>,
    ) -> (
        Tui15<TestRenderer, ScriptedEvents>,
        Rc<RefCell<Vec<Vec<String>>>>,
    ) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let renderer = TestRenderer {
            size,
            frames: frames.clone(),
        };
        let events = ScriptedEvents {
            events: events.into(),
        };
        let tui = Tui15::new(session, renderer, events, Duration::ZERO).expect("test renderer");
        (tui, frames)
    }

    fn input(input: UserInput) -> Event {
        Event::UserInput(input)
    }

    #[rstest]
    #[case::two(2)]
    #[case::four(4)]
    #[case::eight(8)]
    fn cell_at_inverts_tile_rectangle(#[case] size: usize) {
        let layout = Layout::new(size);
        for row in 0..size {
            for col in 0..size {
                let idx = BoardIdx(row, col);
                let r = layout.tile_rectangle(&idx);
                assert_eq!(layout.cell_at(r.x(), r.y()), Some(idx));
                assert_eq!(
                    layout.cell_at(r.x() + r.width() - 1, r.y() + r.height() - 1),
                    Some(idx)
                );
                // the gap right of every tile belongs to no cell
                assert_eq!(layout.cell_at(r.x() + r.width(), r.y()), None);
            }
        }
        let board = layout.board_rectangle();
        assert_eq!(layout.cell_at(board.x(), board.y()), None);
        let last = layout.tile_rectangle(&BoardIdx(size - 1, size - 1));
        assert!(board.contains(&Idx(last.x() + last.width(), last.y() + last.height())));
    }

    #[test]
    fn starts_a_game_and_draws() -> Result<()> {
        let (mut tui, frames) = harness(session(4), (120, 40), vec![]);
        tui.inner_run()?;
        assert_eq!(tui.session.phase(), Phase::Playing);
        assert!(!tui.session.grid().is_solved());
        let frames = frames.borrow();
        let last = frames.last().expect("at least one frame");
        assert!(last.iter().any(|row| row.contains("image: sunset")));
        Ok(())
    }

    #[test]
    fn click_activates_tile() -> Result<()> {
        let mut session = session(4);
        session.start()?;
        let blank = session.grid().blank();
        let target = BoardIdx(if blank.row() == 0 { 3 } else { 0 }, blank.col());
        let r = Layout::new(4).tile_rectangle(&target);
        let events = vec![input(UserInput::Click(r.x() + 1, r.y() + 1))];

        let (mut tui, _) = harness(session, (120, 40), events);
        tui.inner_run()?;
        assert_eq!(tui.session.grid().blank(), target);
        Ok(())
    }

    #[test]
    fn click_on_the_frame_does_nothing() -> Result<()> {
        let mut session = session(3);
        session.start()?;
        let before = session.grid().clone();
        let board = Layout::new(3).board_rectangle();
        let events = vec![input(UserInput::Click(board.x(), board.y()))];

        let (mut tui, _) = harness(session, (120, 40), events);
        tui.inner_run()?;
        assert_eq!(tui.session.grid(), &before);
        Ok(())
    }

    #[test]
    fn keyboard_cursor_activates_tile() -> Result<()> {
        let mut session = session(3);
        session.start()?;
        let blank = session.grid().blank();
        let (direction, target) = if blank.col() > 0 {
            (Direction::Left, BoardIdx(blank.row(), blank.col() - 1))
        } else {
            (Direction::Right, BoardIdx(blank.row(), blank.col() + 1))
        };
        let events = vec![
            input(UserInput::Cursor(direction)),
            input(UserInput::Activate),
        ];

        let (mut tui, _) = harness(session, (120, 40), events);
        tui.inner_run()?;
        assert_eq!(tui.session.grid().blank(), target);
        Ok(())
    }

    #[test]
    fn show_solution_replays_on_ticks() -> Result<()> {
        let mut events = vec![input(UserInput::ShowSolution)];
        events.extend(std::iter::repeat(Event::Tick).take(2000));
        let (mut tui, frames) = harness(session(3), (120, 40), events);
        tui.inner_run()?;
        assert_eq!(tui.session.phase(), Phase::Solved);
        assert!(tui.session.grid().is_solved());
        assert!(tui.modal);
        let frames = frames.borrow();
        let last = frames.last().expect("at least one frame");
        assert!(last.iter().any(|row| row.contains("solved!")));
        Ok(())
    }

    #[test]
    fn dismiss_stops_replay() -> Result<()> {
        let events = vec![
            input(UserInput::ShowSolution),
            Event::Tick,
            input(UserInput::Dismiss),
            Event::Tick,
        ];
        let (mut tui, _) = harness(session(4), (120, 40), events);
        tui.inner_run()?;
        assert_eq!(tui.session.phase(), Phase::Playing);
        Ok(())
    }

    #[test]
    fn grow_and_shrink_stay_in_range() -> Result<()> {
        let events = vec![
            input(UserInput::Shrink),
            input(UserInput::Shrink),
            input(UserInput::Shrink),
        ];
        let (mut tui, _) = harness(session(3), (120, 40), events);
        tui.inner_run()?;
        assert_eq!(tui.session.config().size, MIN_SIZE);
        assert_eq!(tui.session.phase(), Phase::Ready);

        let events = vec![input(UserInput::Grow)];
        let (mut tui, _) = harness(session(MAX_BOARD_SIZE), (120, 40), events);
        tui.inner_run()?;
        assert_eq!(tui.session.config().size, MAX_BOARD_SIZE);
        Ok(())
    }

    #[test]
    fn next_image_resets_board() -> Result<()> {
        let events = vec![input(UserInput::NextImage)];
        let (mut tui, _) = harness(session(3), (120, 40), events);
        tui.inner_run()?;
        assert_eq!(tui.session.image().as_str(), "forest");
        assert!(tui.session.grid().is_solved());
        Ok(())
    }

    #[test]
    fn small_terminal_shows_message() -> Result<()> {
        let events = vec![input(UserInput::Click(5, 5)), input(UserInput::Activate)];
        let (mut tui, frames) = harness(session(4), (30, 10), events);
        tui.inner_run()?;
        assert!(tui.tui_board.is_none());
        let frames = frames.borrow();
        let first = frames.first().expect("at least one frame");
        assert!(first.iter().any(|row| row.contains("terminal too small")));
        Ok(())
    }

    #[test]
    fn animation_ends_on_target() -> Result<()> {
        let mut session = session(4);
        let canvas = Canvas::new(120, 40);
        let tui_board = Tui15Board::new(&session, &canvas)?;
        session.start()?;
        let blank = session.grid().blank();
        // line the drawables up with the shuffled board before sliding anything
        let mut tui_board = tui_board;
        tui_board.sync(session.grid());
        let target = BoardIdx(blank.row(), if blank.col() == 0 { 3 } else { 0 });
        let outcome = session.activate(&target)?.expect("aligned move");

        let mut animation = AnimatedTui15Board::new(tui_board, &outcome.hint);
        let mut frames = 0;
        while animation.animate()? {
            frames += 1;
            assert!(frames < 100, "animation must terminate");
        }
        assert!(frames > 0);
        let tui_board = animation.extract_board();
        for update in outcome.hint.updates() {
            let placed = tui_board.tiles[&update.label].rectangle();
            assert_eq!(placed, tui_board.layout.tile_rectangle(&update.to));
        }
        Ok(())
    }
}
