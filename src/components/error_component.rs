use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  prelude::*,
  widgets::{Block, Borders, Paragraph},
};

use super::Component;
use crate::{action::Action, tui::Frame};

/// Full screen view for errors raised while running the screen.
#[derive(Default)]
pub struct ErrorComponent {
  message: Option<String>,
  scroll: u16,
  last_height: u16,
}

impl ErrorComponent {
  pub fn set_message(&mut self, message: String) {
    self.message = Some(message);
  }

  pub fn message(&self) -> Option<&str> {
    self.message.as_deref()
  }

  fn has_scrolled_to_bottom(&self) -> bool {
    match &self.message {
      Some(message) => {
        let total_lines = message.lines().count() as u16;
        self.scroll + self.last_height >= total_lines
      },
      None => false,
    }
  }
}

#[async_trait::async_trait]
impl Component for ErrorComponent {
  fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    self.last_height = area.height.saturating_sub(2);
    let message = self.message.clone().unwrap_or_default();
    let paragraph = Paragraph::new(message)
      .block(
        Block::default().title("Error (esc to dismiss)").style(Style::default().fg(Color::Red)).borders(Borders::ALL),
      )
      .scroll((self.scroll, 0));

    frame.render_widget(paragraph, area);
    Ok(())
  }

  async fn handle_key_events(&mut self, key: KeyEvent) -> color_eyre::Result<Option<Action>> {
    let action = match key.code {
      KeyCode::Up => {
        if self.scroll > 0 {
          self.scroll -= 1;
        }
        None
      },
      KeyCode::Down => {
        if !self.has_scrolled_to_bottom() {
          self.scroll += 1;
        }
        None
      },
      KeyCode::Esc => {
        self.scroll = 0;
        self.message = None;
        self.last_height = 0;
        Some(Action::ExitError)
      },
      _ => None,
    };
    Ok(action)
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::KeyModifiers;
  use pretty_assertions::assert_eq;

  use super::*;

  #[tokio::test]
  async fn test_scroll_stops_at_bottom() {
    let mut error = ErrorComponent::default();
    error.set_message("one\ntwo\nthree".to_string());
    error.last_height = 2;

    error.handle_key_events(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)).await.unwrap();
    error.handle_key_events(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)).await.unwrap();

    assert_eq!(error.scroll, 1);
  }

  #[tokio::test]
  async fn test_escape_dismisses() {
    let mut error = ErrorComponent::default();
    error.set_message("Failed to draw".to_string());

    let action = error.handle_key_events(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)).await.unwrap();

    assert_eq!(action, Some(Action::ExitError));
    assert_eq!(error.message(), None);
  }
}
