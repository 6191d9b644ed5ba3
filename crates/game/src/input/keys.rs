use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    CreateRoom,
    JoinRoom,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [MenuOption::CreateRoom, MenuOption::JoinRoom, MenuOption::Exit];

    pub fn index(self) -> usize {
        match self {
            MenuOption::CreateRoom => 0,
            MenuOption::JoinRoom => 1,
            MenuOption::Exit => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::CreateRoom => "Create Room (Host)",
            MenuOption::JoinRoom => "Join Room (Client)",
            MenuOption::Exit => "Exit Game",
        }
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }
}

fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

pub fn map_game_key(key: KeyEvent) -> Option<Intent> {
    if !is_press(&key) {
        return None;
    }
    if is_ctrl(&key, 'c') {
        return Some(Intent::Quit);
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Intent::Quit),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Intent::MoveLeft),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Intent::MoveRight),
        KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char(' ') => Some(Intent::Shoot),
        _ => None,
    }
}

/// `Some(true)` restarts, `Some(false)` exits, `None` keeps waiting.
pub fn map_restart_key(key: KeyEvent) -> Option<bool> {
    if !is_press(&key) {
        return None;
    }
    if is_ctrl(&key, 'c') {
        return Some(false);
    }

    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(true),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

/// Returns the new selection and whether it was confirmed.
pub fn map_menu_key(selected: MenuOption, key: KeyEvent) -> (MenuOption, bool) {
    if !is_press(&key) {
        return (selected, false);
    }
    if is_ctrl(&key, 'q') || is_ctrl(&key, 'c') {
        return (MenuOption::Exit, true);
    }

    match key.code {
        KeyCode::Enter => (selected, true),
        KeyCode::Up => (selected.prev(), false),
        KeyCode::Down => (selected.next(), false),
        KeyCode::Esc => (MenuOption::Exit, true),
        _ => (selected, false),
    }
}
