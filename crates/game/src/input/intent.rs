use std::fmt;
use std::str::FromStr;

use crate::net::ProtocolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Shoot,
    Quit,
}

impl Intent {
    pub const ALL: [Intent; 4] = [Intent::MoveLeft, Intent::MoveRight, Intent::Shoot, Intent::Quit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "move_left",
            Intent::MoveRight => "move_right",
            Intent::Shoot => "shoot",
            Intent::Quit => "quit",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownIntent(s.to_string()))
    }
}
