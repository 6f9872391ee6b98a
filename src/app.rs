use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::Rect;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::{
  action::Action,
  cli::Cli,
  components::{Component, ErrorComponent, ShoppingList},
  config::Config,
  mode::Mode,
  tui::{self, Tui},
};

pub struct App {
  pub config: Config,
  pub tick_rate: f64,
  pub frame_rate: f64,
  pub screen: Box<dyn Component>,
  pub error_view: ErrorComponent,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub mode: Mode,
  mode_before_error: Mode,
}

impl App {
  pub fn new(cli: &Cli) -> Result<Self> {
    let mut config = Config::new()?;
    if cli.clear_on_add {
      config.screen.clear_input_on_add = true;
    }
    info!("Using configuration from {}", config.config._config_dir.display());
    Ok(Self::with_config(config, cli.tick_rate, cli.frame_rate))
  }

  pub fn with_config(config: Config, tick_rate: f64, frame_rate: f64) -> Self {
    let screen = Box::new(ShoppingList::new(config.screen.clone()));
    Self {
      config,
      tick_rate,
      frame_rate,
      screen,
      error_view: ErrorComponent::default(),
      should_quit: false,
      should_suspend: false,
      mode: Mode::Input,
      mode_before_error: Mode::Input,
    }
  }

  /// Looks up the action bound to `key` in the current mode.
  pub fn map_key(&self, key: &KeyEvent) -> Option<Action> {
    self.config.action_for(self.mode, key)
  }

  /// Maps terminal events that do not depend on focus straight to actions.
  pub fn map_event(event: &tui::Event) -> Option<Action> {
    match event {
      tui::Event::Quit | tui::Event::Closed => Some(Action::Quit),
      tui::Event::Tick => Some(Action::Tick),
      tui::Event::Render => Some(Action::Render),
      tui::Event::Resize(x, y) => Some(Action::Resize(*x, *y)),
      _ => None,
    }
  }

  /// Applies the parts of `action` that belong to the app rather than the screen.
  pub fn apply(&mut self, action: &Action) {
    match action {
      Action::FocusInput => self.mode = Mode::Input,
      Action::FocusList => self.mode = Mode::List,
      Action::Error(message) => {
        error!("{message}");
        self.error_view.set_message(message.clone());
        if self.mode != Mode::Error {
          self.mode_before_error = self.mode;
        }
        self.mode = Mode::Error;
      },
      Action::ExitError => self.mode = self.mode_before_error,
      Action::Quit => self.should_quit = true,
      Action::Suspend => self.should_suspend = true,
      Action::Resume => self.should_suspend = false,
      _ => {},
    }
  }

  fn active_component(&mut self) -> &mut dyn Component {
    match self.mode {
      Mode::Error => &mut self.error_view,
      Mode::Input | Mode::List => self.screen.as_mut(),
    }
  }

  fn render(&mut self, tui: &mut Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
    let component = self.active_component();
    tui.draw(|f| {
      if let Err(e) = component.draw(f, f.area()) {
        if let Err(send_err) = action_tx.send(Action::Error(format!("Failed to draw: {:?}", e))) {
          error!("Failed to report draw error: {send_err}");
        }
      }
    })?;
    Ok(())
  }

  pub async fn run(&mut self) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let mut tui = Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate).mouse(true).paste(true);
    tui.enter()?;

    self.screen.register_action_handler(action_tx.clone())?;
    self.error_view.register_action_handler(action_tx.clone())?;

    loop {
      if let Some(e) = tui.next().await {
        if let Some(action) = Self::map_event(&e) {
          action_tx.send(action)?;
        } else {
          match e {
            tui::Event::Error => warn!("Terminal reported an input error"),
            tui::Event::Key(key) => {
              if let Some(action) = self.map_key(&key) {
                action_tx.send(action)?;
              } else if let Some(action) = self.active_component().handle_events(Some(e.clone())).await? {
                action_tx.send(action)?;
              }
            },
            _ => {
              if let Some(action) = self.active_component().handle_events(Some(e.clone())).await? {
                action_tx.send(action)?;
              }
            },
          }
        }
      }

      while let Ok(action) = action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          debug!("{action:?}");
        }
        self.apply(&action);

        match action {
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.render(&mut tui, &action_tx)?;
          },
          Action::Render => self.render(&mut tui, &action_tx)?,
          _ => {},
        }
        if let Some(action) = self.screen.update(action.clone()).await? {
          action_tx.send(action)?
        };
      }
      if self.should_suspend {
        tui.suspend()?;
        action_tx.send(Action::Resume)?;
        tui = Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate).mouse(true).paste(true);
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::{KeyCode, KeyModifiers};
  use pretty_assertions::assert_eq;

  use super::*;

  fn app() -> App {
    let config: Config = json5::from_str(include_str!("../.config/config.json5")).unwrap();
    App::with_config(config, 4.0, 30.0)
  }

  #[test]
  fn test_keys_depend_on_mode() {
    let mut app = app();
    let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);

    assert_eq!(app.map_key(&q), None);

    app.apply(&Action::FocusList);
    assert_eq!(app.mode, Mode::List);
    assert_eq!(app.map_key(&q), Some(Action::Quit));
  }

  #[test]
  fn test_enter_adds_in_input_mode() {
    let app = app();

    assert_eq!(app.map_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)), Some(Action::AddItem));
  }

  #[test]
  fn test_error_returns_to_previous_mode() {
    let mut app = app();
    app.apply(&Action::FocusList);

    app.apply(&Action::Error("Failed to draw".to_string()));
    assert_eq!(app.mode, Mode::Error);
    assert_eq!(app.error_view.message(), Some("Failed to draw"));

    app.apply(&Action::Error("Failed again".to_string()));
    app.apply(&Action::ExitError);
    assert_eq!(app.mode, Mode::List);
  }

  #[test]
  fn test_quit_and_suspend_flags() {
    let mut app = app();

    app.apply(&Action::Suspend);
    assert!(app.should_suspend);
    app.apply(&Action::Resume);
    assert!(!app.should_suspend);
    app.apply(&Action::Quit);
    assert!(app.should_quit);
  }

  #[test]
  fn test_closed_input_stream_quits() {
    assert_eq!(App::map_event(&tui::Event::Closed), Some(Action::Quit));
    assert_eq!(App::map_event(&tui::Event::Quit), Some(Action::Quit));
    assert_eq!(App::map_event(&tui::Event::Resize(80, 24)), Some(Action::Resize(80, 24)));
    assert_eq!(App::map_event(&tui::Event::Error), None);
  }

  #[tokio::test]
  async fn test_screen_receives_add_action() {
    let mut app = app();
    app.screen.handle_events(Some(tui::Event::Paste("Milk".to_string()))).await.unwrap();

    app.screen.update(Action::AddItem).await.unwrap();

    let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(40, 10)).unwrap();
    terminal.draw(|f| app.screen.draw(f, f.area()).unwrap()).unwrap();
    let buffer = terminal.backend().buffer();
    let row: String = (0..40u16).map(|x| buffer[(x, 4u16)].symbol()).collect();
    assert!(row.contains("[x] Milk"));
  }
}
