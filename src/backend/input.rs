//! Input pump: Dedicated thread turning terminal events into [`InputEvent`]s.
//!
//! The pump polls crossterm with a timeout, converts what it reads and
//! forwards it to the sender handed out by [`crate::Gui::input_sender`].
//! The core drains that queue on its own thread in [`crate::Gui::tick`].

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use tracing::{debug, warn};

use crate::input::{InputEvent, KeyCode, KeyModifiers};
use crate::layout::Point;

/// Handle to the input thread.
pub struct InputPump {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    quit: Arc<AtomicBool>,
}

impl InputPump {
    /// Spawn the input thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let quit = Arc::new(AtomicBool::new(false));
        let (thread_shutdown, thread_quit) = (shutdown.clone(), quit.clone());

        let handle = thread::Builder::new()
            .name("gadgetry-input".to_string())
            .spawn(move || Self::run_loop(&sender, &thread_shutdown, &thread_quit, poll_timeout))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            quit,
        })
    }

    /// Check if the user pressed Ctrl+C or Ctrl+Q.
    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }

    /// Signal the input thread to stop.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Stop the input thread and wait for it.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(
        sender: &Sender<InputEvent>,
        shutdown: &AtomicBool,
        quit: &AtomicBool,
        poll_timeout: Duration,
    ) {
        while !shutdown.load(Ordering::Relaxed) {
            match event::poll(poll_timeout) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(error) => {
                    warn!(%error, "input poll failed");
                    continue;
                }
            }
            let event = match event::read() {
                Ok(event) => event,
                Err(error) => {
                    warn!(%error, "input read failed");
                    continue;
                }
            };
            if is_quit_key(&event) {
                quit.store(true, Ordering::Relaxed);
                continue;
            }
            let Some(input) = convert_event(&event) else {
                continue;
            };
            // A full queue drops the event rather than stalling the terminal.
            if let Err(error) = sender.try_send(input) {
                if error.is_disconnected() {
                    debug!("input receiver dropped; pump exiting");
                    break;
                }
                warn!("input queue full, event dropped");
            }
        }
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn is_quit_key(event: &Event) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    key.kind == KeyEventKind::Press
        && key.modifiers.contains(event::KeyModifiers::CONTROL)
        && matches!(key.code, event::KeyCode::Char('c' | 'q'))
}

/// Convert a crossterm event into core input.
///
/// Only the left mouse button drives the pointer. Resize, focus and paste
/// events have no core counterpart and yield `None`.
pub fn convert_event(event: &Event) -> Option<InputEvent> {
    let timestamp = Instant::now();
    match event {
        Event::Key(key) => {
            let code = convert_key_code(key.code)?;
            let modifiers = convert_modifiers(key.modifiers);
            Some(match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => InputEvent::KeyDown {
                    code,
                    modifiers,
                    timestamp,
                },
                KeyEventKind::Release => InputEvent::KeyUp {
                    code,
                    modifiers,
                    timestamp,
                },
            })
        }
        Event::Mouse(mouse) => {
            let point = Point::new(i32::from(mouse.column), i32::from(mouse.row));
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    Some(InputEvent::PointerDown { point, timestamp })
                }
                MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp { point, timestamp }),
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    Some(InputEvent::PointerMove { point, timestamp })
                }
                _ => None,
            }
        }
        Event::Resize(..) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::BackTab => KeyCode::BackTab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseEvent};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: event::KeyModifiers::NONE,
        })
    }

    fn key(code: event::KeyCode, modifiers: event::KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_left_button_maps_to_pointer() {
        let down = convert_event(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 7));
        assert!(matches!(down, Some(InputEvent::PointerDown { point, .. }) if point == Point::new(4, 7)));

        let drag = convert_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 5, 7));
        assert!(matches!(drag, Some(InputEvent::PointerMove { .. })));

        let up = convert_event(&mouse(MouseEventKind::Up(MouseButton::Left), 5, 7));
        assert!(matches!(up, Some(InputEvent::PointerUp { .. })));
    }

    #[test]
    fn test_other_buttons_ignored() {
        assert!(convert_event(&mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)).is_none());
        assert!(convert_event(&mouse(MouseEventKind::ScrollUp, 0, 0)).is_none());
        assert!(convert_event(&Event::Resize(80, 24)).is_none());
    }

    #[test]
    fn test_key_conversion() {
        let press = convert_event(&key(
            event::KeyCode::Char('a'),
            event::KeyModifiers::SHIFT,
            KeyEventKind::Press,
        ));
        let Some(InputEvent::KeyDown { code, modifiers, .. }) = press else {
            panic!("expected key down, got {press:?}");
        };
        assert_eq!(code, KeyCode::Char('a'));
        assert!(modifiers.shift && !modifiers.control);

        let release = convert_event(&key(
            event::KeyCode::Enter,
            event::KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(matches!(release, Some(InputEvent::KeyUp { code: KeyCode::Enter, .. })));

        assert!(convert_event(&key(
            event::KeyCode::Insert,
            event::KeyModifiers::NONE,
            KeyEventKind::Press
        ))
        .is_none());
    }

    #[test]
    fn test_quit_keys() {
        let ctrl = event::KeyModifiers::CONTROL;
        assert!(is_quit_key(&key(event::KeyCode::Char('q'), ctrl, KeyEventKind::Press)));
        assert!(is_quit_key(&key(event::KeyCode::Char('c'), ctrl, KeyEventKind::Press)));
        assert!(!is_quit_key(&key(
            event::KeyCode::Char('q'),
            event::KeyModifiers::NONE,
            KeyEventKind::Press
        )));
    }
}
