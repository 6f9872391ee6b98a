use ratatui::{
  layout::Rect,
  style::{Color, Style},
  widgets::{Block, Borders, Paragraph},
};

use crate::{mode::Mode, tui::Frame};

#[derive(Default)]
pub struct InstructionFooter {}

impl InstructionFooter {
  pub fn instructions(&self, mode: Mode, has_rows: bool) -> Vec<&'static str> {
    match mode {
      Mode::Input => vec!["enter: Add", "tab: Go to List", "ctrl+c: Quit"],
      Mode::List if has_rows => {
        vec!["↑/↓: Select", "d: Remove", "click [x]: Remove", "tab: Go to Input", "q: Quit"]
      },
      Mode::List => vec!["tab: Go to Input", "q: Quit"],
      Mode::Error => vec!["esc: Dismiss"],
    }
  }

  pub fn render(&self, frame: &mut Frame<'_>, area: Rect, mode: Mode, has_rows: bool) {
    let paragraph = Paragraph::new(self.instructions(mode, has_rows).join(" | "))
      .block(Block::default().borders(Borders::ALL))
      .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_remove_hint_only_with_rows() {
    let footer = InstructionFooter::default();

    assert!(footer.instructions(Mode::List, true).contains(&"d: Remove"));
    assert_eq!(footer.instructions(Mode::List, false), vec!["tab: Go to Input", "q: Quit"]);
    assert_eq!(footer.instructions(Mode::Input, true)[0], "enter: Add");
  }
}
