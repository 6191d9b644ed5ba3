use std::io;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use termduel::net::CHANNEL_CAPACITY;
use termduel::{Intent, MenuOption, map_game_key, map_menu_key, map_restart_key};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Background thread turning key presses into intents while a match runs.
///
/// The thread stops after forwarding `Quit` or as soon as the receiving side
/// is dropped, so later prompts get the keyboard back.
pub struct KeyboardPump {
    handle: Option<thread::JoinHandle<()>>,
}

impl KeyboardPump {
    pub fn spawn() -> (Self, mpsc::Receiver<Intent>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let handle = thread::spawn(move || pump(tx));
        (
            Self {
                handle: Some(handle),
            },
            rx,
        )
    }

    pub fn join(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Keyboard thread panicked");
            }
        }
    }
}

impl Drop for KeyboardPump {
    fn drop(&mut self) {
        self.stop();
    }
}

fn pump(tx: mpsc::Sender<Intent>) {
    while !tx.is_closed() {
        let intent = match next_key(POLL_INTERVAL) {
            Ok(Some(key)) => match map_game_key(key) {
                Some(intent) => intent,
                None => continue,
            },
            Ok(None) => continue,
            Err(e) => {
                log::warn!("Keyboard read failed: {}", e);
                Intent::Quit
            }
        };

        if tx.blocking_send(intent).is_err() || intent == Intent::Quit {
            break;
        }
    }
}

fn next_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(Some(key)),
        _ => Ok(None),
    }
}

fn wait_key() -> io::Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            return Ok(key);
        }
    }
}

/// Blocks until the player picks restart (`true`) or exit (`false`).
pub fn wait_for_restart() -> io::Result<bool> {
    loop {
        if let Some(restart) = map_restart_key(wait_key()?) {
            return Ok(restart);
        }
    }
}

pub fn read_menu(selected: MenuOption) -> io::Result<(MenuOption, bool)> {
    Ok(map_menu_key(selected, wait_key()?))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    Pending,
    Submit,
    Cancel,
}

/// Applies one key to an address being typed.
pub fn edit_address(input: &mut String, key: KeyEvent) -> LineEdit {
    if key.kind != KeyEventKind::Press {
        return LineEdit::Pending;
    }
    match key.code {
        KeyCode::Enter => LineEdit::Submit,
        KeyCode::Esc => LineEdit::Cancel,
        KeyCode::Backspace => {
            input.pop();
            LineEdit::Pending
        }
        KeyCode::Char(c) if c.is_ascii_alphanumeric() || ".:-[]".contains(c) => {
            input.push(c);
            LineEdit::Pending
        }
        _ => LineEdit::Pending,
    }
}

pub fn read_address_key() -> io::Result<KeyEvent> {
    wait_key()
}
