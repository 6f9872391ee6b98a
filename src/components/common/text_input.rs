use crossterm::event::KeyEvent;
use ratatui::{
  layout::Rect,
  prelude::Color,
  style::{Modifier, Style},
  widgets::{Block, Borders},
};
use tui_textarea::{Input, TextArea};

use crate::tui::Frame;

/// Text field for one entry. Pasted newlines are kept as typed.
#[derive(Debug, Default)]
pub struct TextInput {
  pub text_input: TextArea<'static>,
  title: String,
  focused: bool,
}

impl TextInput {
  pub fn new(title: impl Into<String>) -> Self {
    let mut input = Self { title: title.into(), ..Self::default() };
    input.init_style();
    input
  }

  pub fn init_style(&mut self) {
    let border = if self.focused { Color::LightGreen } else { Color::White };
    self.text_input.set_style(Style::default().fg(Color::White));
    self.text_input.set_cursor_line_style(Style::default());
    self.text_input.set_cursor_style(if self.focused {
      Style::default().add_modifier(Modifier::REVERSED)
    } else {
      Style::default()
    });
    self
      .text_input
      .set_block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)).title(self.title.clone()));
  }

  pub fn set_focused(&mut self, focused: bool) {
    if self.focused != focused {
      self.focused = focused;
      self.init_style();
    }
  }

  pub fn is_focused(&self) -> bool {
    self.focused
  }

  /// The current text exactly as typed, which may be empty.
  pub fn text(&self) -> String {
    self.text_input.lines().join("\n")
  }

  /// Empties the field, including any extra lines a paste may have added.
  pub fn clear(&mut self) {
    self.text_input = TextArea::default();
    self.init_style();
  }

  /// Feeds a key press to the field. Returns whether the text changed.
  pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
    self.text_input.input(Input::from(key_event))
  }

  pub fn insert_str(&mut self, text: &str) -> bool {
    self.text_input.insert_str(text)
  }

  pub fn render(&mut self, f: &mut Frame<'_>, area: Rect) {
    f.render_widget(&self.text_input, area);
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
  use pretty_assertions::assert_eq;

  use super::*;

  fn press(code: KeyCode) -> KeyEvent {
    KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
      kind: crossterm::event::KeyEventKind::Press,
      state: crossterm::event::KeyEventState::NONE,
    }
  }

  #[test]
  fn test_text_is_not_trimmed() {
    let mut text_input = TextInput::new("New item");
    text_input.insert_str("  test input ");

    assert_eq!(text_input.text(), "  test input ");
  }

  #[test]
  fn test_text_empty() {
    let text_input = TextInput::new("New item");

    assert_eq!(text_input.text(), "");
  }

  #[test]
  fn test_handle_key_event_typing() {
    let mut text_input = TextInput::new("New item");

    assert!(text_input.handle_key_event(press(KeyCode::Char('h'))));
    assert!(text_input.handle_key_event(press(KeyCode::Char('i'))));
    assert!(text_input.handle_key_event(press(KeyCode::Backspace)));

    assert_eq!(text_input.text(), "h");
  }

  #[test]
  fn test_clear() {
    let mut text_input = TextInput::new("New item");
    text_input.insert_str("Milk");

    text_input.clear();

    assert_eq!(text_input.text(), "");
  }

  #[test]
  fn test_clear_multi_line() {
    let mut text_input = TextInput::new("New item");
    text_input.insert_str("Milk\nBread");

    text_input.clear();

    assert_eq!(text_input.text(), "");
    assert_eq!(text_input.text_input.lines().len(), 1);
  }

  #[test]
  fn test_set_focused() {
    let mut text_input = TextInput::new("New item");
    assert!(!text_input.is_focused());

    text_input.set_focused(true);

    assert!(text_input.is_focused());
  }
}
