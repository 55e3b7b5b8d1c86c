//! Presentation interface
//!
//! The core draws and talks through [`Presentation`]; screen layout,
//! fonts and timing belong to the embedder. [`Transcript`] records
//! everything it is told, which is all a headless run or a test needs.

use hashbrown::HashMap;

use crate::dungeon::Coord;

/// Foreground colors the simulation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Normal,
    Red,
    Yellow,
    Blue,
}

pub trait Presentation {
    fn draw_char(&mut self, pos: Coord, ch: char);

    /// What is currently shown at `pos`
    fn char_at(&self, pos: Coord) -> char;

    fn set_color(&mut self, color: Color);

    fn standout(&mut self);

    /// End standout mode and return to normal color
    fn standend(&mut self);

    fn message(&mut self, text: &str);

    /// Short visual delay between animation frames
    fn pause(&mut self);
}

/// A presentation layer that just remembers
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    cells: HashMap<Coord, char>,
    messages: Vec<String>,
    colors: Vec<Color>,
    color: Color,
    standout: bool,
    marked: usize,
    pauses: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    /// True if any message contains `text`
    pub fn saw(&self, text: &str) -> bool {
        self.messages.iter().any(|m| m.contains(text))
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Every color switch, in order
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn pauses(&self) -> usize {
        self.pauses
    }

    pub fn in_standout(&self) -> bool {
        self.standout
    }

    /// How many times standout mode was entered
    pub fn standouts(&self) -> usize {
        self.marked
    }
}

impl Presentation for Transcript {
    fn draw_char(&mut self, pos: Coord, ch: char) {
        self.cells.insert(pos, ch);
    }

    fn char_at(&self, pos: Coord) -> char {
        self.cells.get(&pos).copied().unwrap_or(' ')
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
        self.colors.push(color);
    }

    fn standout(&mut self) {
        self.standout = true;
        self.marked += 1;
    }

    fn standend(&mut self) {
        self.standout = false;
        self.color = Color::Normal;
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }
}
