use std::fmt;

use crate::geometry::Face;

/// One of the six sticker colors. Every color appears on exactly nine squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White = 0,
    Yellow = 1,
    Green = 2,
    Blue = 3,
    Red = 4,
    Orange = 5,
}

impl Color {
    pub const ALL: [Self; 6] = {
        use Color::*;
        let v = [White, Yellow, Green, Blue, Red, Orange];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The color a face carries on a freshly built cube
    pub const fn solved_on(face: Face) -> Self {
        match face {
            Face::Top => Color::White,
            Face::Bottom => Color::Yellow,
            Face::Front => Color::Green,
            Face::Back => Color::Blue,
            Face::Right => Color::Red,
            Face::Left => Color::Orange,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Orange => "orange",
        }
    }

    /// Single letter used when printing nets
    pub const fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Red => 'R',
            Color::Orange => 'O',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
