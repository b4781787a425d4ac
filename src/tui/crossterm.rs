use std::io::Write;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrossTermEvent, KeyCode,
        KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    style, terminal, ExecutableCommand, QueueableCommand,
};

use super::canvas::Canvas;
use super::colors::Rgb;
use super::error::Result;
use super::events::{Event, EventSource, UserInput};
use super::geometry::Direction;
use super::renderer::Renderer;

pub(crate) struct Crossterm<T: Write> {
    w: Box<T>,
}

impl<T: Write> Crossterm<T> {
    pub(crate) fn new(mut w: Box<T>) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(EnableMouseCapture)?;
        w.execute(cursor::Hide)?;
        Ok(Self { w })
    }
}

impl<T: Write> Drop for Crossterm<T> {
    fn drop(&mut self) {
        // the terminal is being handed back; there is nobody left to report failures to
        let _ = self.w.execute(cursor::Show);
        let _ = self.w.execute(DisableMouseCapture);
        let _ = self.w.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl<T: Write> Renderer for Crossterm<T> {
    fn size_hint(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn render(&mut self, c: &Canvas) -> Result<()> {
        self.w.queue(terminal::BeginSynchronizedUpdate)?;
        for (y, row) in c.rows().enumerate() {
            self.w.queue(cursor::MoveTo(0, y as u16))?;
            let mut current = None;
            for tuxel in row {
                let look = (tuxel.colors(), tuxel.bold());
                if current != Some(look) {
                    let ((fg, bg), bold) = look;
                    self.style(fg, bg, bold)?;
                    current = Some(look);
                }
                self.w.queue(style::Print(tuxel.content()))?;
            }
        }
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::EndSynchronizedUpdate)?;
        self.w.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;
        self.w.flush()?;
        Ok(())
    }
}

impl<T: Write> Crossterm<T> {
    fn style(&mut self, fg: Option<Rgb>, bg: Option<Rgb>, bold: bool) -> Result<()> {
        self.w
            .queue(style::SetAttribute(style::Attribute::Reset))?;
        self.w.queue(style::SetForegroundColor(
            fg.map_or(style::Color::Reset, Into::into),
        ))?;
        self.w.queue(style::SetBackgroundColor(
            bg.map_or(style::Color::Reset, Into::into),
        ))?;
        if bold {
            self.w.queue(style::SetAttribute(style::Attribute::Bold))?;
        }
        Ok(())
    }
}

/// Reads terminal input, yielding `Event::Tick` whenever nothing arrives within `tick`.
pub(crate) struct CrosstermEvents {
    tick: Duration,
}

impl CrosstermEvents {
    pub(crate) fn new(tick: Duration) -> Self {
        Self { tick }
    }
}

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> Result<Event> {
        loop {
            if !event::poll(self.tick)? {
                return Ok(Event::Tick);
            }
            let input = match event::read()? {
                CrossTermEvent::Key(ke) => handle_key_event(ke),
                CrossTermEvent::Mouse(me) => handle_mouse_event(me),
                CrossTermEvent::Resize(_, _) => return Ok(Event::Resize),
                _ => None,
            };
            if let Some(input) = input {
                return Ok(Event::UserInput(input));
            }
        }
    }
}

fn handle_key_event(ke: KeyEvent) -> Option<UserInput> {
    if ke.kind == KeyEventKind::Release {
        return None;
    }
    match ke.code {
        KeyCode::Char('c') if ke.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UserInput::Quit)
        }
        KeyCode::Left | KeyCode::Char('h') => Some(UserInput::Cursor(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(UserInput::Cursor(Direction::Right)),
        KeyCode::Up | KeyCode::Char('k') => Some(UserInput::Cursor(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(UserInput::Cursor(Direction::Down)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UserInput::Activate),
        KeyCode::Char('n') => Some(UserInput::NewGame),
        KeyCode::Char('c') => Some(UserInput::ShowSolution),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(UserInput::Grow),
        KeyCode::Char('-') => Some(UserInput::Shrink),
        KeyCode::Char('i') => Some(UserInput::NextImage),
        KeyCode::Esc | KeyCode::Char('d') => Some(UserInput::Dismiss),
        KeyCode::Char('q') => Some(UserInput::Quit),
        _ => None,
    }
}

fn handle_mouse_event(me: MouseEvent) -> Option<UserInput> {
    match me.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            Some(UserInput::Click(me.column as usize, me.row as usize))
        }
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crossterm::event::KeyEventState;
    use rstest::*;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[rstest]
    #[case::arrow(KeyCode::Left, KeyModifiers::NONE, Some(UserInput::Cursor(Direction::Left)))]
    #[case::vi(KeyCode::Char('j'), KeyModifiers::NONE, Some(UserInput::Cursor(Direction::Down)))]
    #[case::space(KeyCode::Char(' '), KeyModifiers::NONE, Some(UserInput::Activate))]
    #[case::cheat(KeyCode::Char('c'), KeyModifiers::NONE, Some(UserInput::ShowSolution))]
    #[case::ctrl_c(KeyCode::Char('c'), KeyModifiers::CONTROL, Some(UserInput::Quit))]
    #[case::grow(KeyCode::Char('='), KeyModifiers::NONE, Some(UserInput::Grow))]
    #[case::unbound(KeyCode::Char('z'), KeyModifiers::NONE, None)]
    fn key_bindings(
        #[case] code: KeyCode,
        #[case] modifiers: KeyModifiers,
        #[case] expected: Option<UserInput>,
    ) {
        assert_eq!(
            handle_key_event(key(code, modifiers, KeyEventKind::Press)),
            expected
        );
    }

    #[test]
    fn releases_are_ignored() {
        let release = key(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(handle_key_event(release), None);
    }

    #[test]
    fn left_click_reports_position() {
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(handle_mouse_event(click), Some(UserInput::Click(12, 7)));

        let right = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..click
        };
        assert_eq!(handle_mouse_event(right), None);
    }
}
