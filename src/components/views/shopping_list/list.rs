use color_eyre::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
  layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
  style::{Color, Modifier, Style},
  text::Span,
  widgets::{Block, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use super::{InstructionFooter, RowAdapter, RowBinding, row_binding::REMOVE_CONTROL};
use crate::{
  action::Action,
  components::{Component, common::text_input::TextInput},
  config::ScreenConfig,
  mode::Mode,
  shopping::Item,
  tui::{Event, Frame},
};

const HIGHLIGHT_SYMBOL: &str = "→ ";
const ADD_BUTTON: &str = "Add";
const ADD_BUTTON_WIDTH: u16 = 9;

/// Where the last frame placed each interactive part of the screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ScreenLayout {
  input: Rect,
  add_button: Rect,
  list: Rect,
}

/// The shopping list screen: an input field, an add button and the list of
/// entries.
pub struct ShoppingList {
  adapter: RowAdapter<Item>,
  rows: Vec<RowBinding<Item>>,
  input: TextInput,
  footer: InstructionFooter,
  mode: Mode,
  list_state: ListState,
  config: ScreenConfig,
  layout: ScreenLayout,
}

impl ShoppingList {
  pub fn new(config: ScreenConfig) -> Self {
    let mut input = TextInput::new(config.input_title.clone());
    input.set_focused(true);
    Self {
      adapter: RowAdapter::new(),
      rows: Vec::new(),
      input,
      footer: InstructionFooter::default(),
      mode: Mode::Input,
      list_state: ListState::default(),
      config,
      layout: ScreenLayout::default(),
    }
  }

  pub fn adapter(&self) -> &RowAdapter<Item> {
    &self.adapter
  }

  pub fn rows(&self) -> &[RowBinding<Item>] {
    &self.rows
  }

  pub fn input_text(&self) -> String {
    self.input.text()
  }

  pub fn selected(&self) -> Option<usize> {
    self.list_state.selected()
  }

  /// Adds whatever is in the input field, as typed, to the end of the list.
  pub fn on_add(&mut self) {
    let item = Item::new(self.input.text()).into_ref();
    info!("Adding {:?} to the shopping list", item.name);
    self.adapter.add(item);
    if self.config.clear_input_on_add {
      self.input.clear();
    }
    self.rebind_rows();
  }

  /// Fires the remove control of the row at `index`.
  pub fn remove_row(&mut self, index: usize) {
    let Some(row) = self.rows.get(index).cloned() else {
      debug!("No row at position {} to remove", index);
      return;
    };
    if row.remove.fire(&mut self.adapter) {
      info!("Removed {:?} from the shopping list", row.label);
    }
    self.rebind_rows();
  }

  pub fn remove_selected(&mut self) {
    if let Some(index) = self.list_state.selected() {
      self.remove_row(index);
    }
  }

  fn rebind_rows(&mut self) {
    self.rows = self.adapter.render_all();
    self.clamp_selection();
  }

  fn clamp_selection(&mut self) {
    let count = self.rows.len();
    match self.list_state.selected() {
      _ if count == 0 => self.list_state.select(None),
      Some(index) if index >= count => self.list_state.select(Some(count - 1)),
      None if self.mode == Mode::List => self.list_state.select(Some(0)),
      _ => {},
    }
  }

  fn select_next(&mut self) {
    let count = self.rows.len();
    if count == 0 {
      return;
    }
    let next = match self.list_state.selected() {
      Some(index) if index + 1 < count => index + 1,
      _ => 0,
    };
    self.list_state.select(Some(next));
  }

  fn select_previous(&mut self) {
    let count = self.rows.len();
    if count == 0 {
      return;
    }
    let previous = match self.list_state.selected() {
      Some(0) | None => count - 1,
      Some(index) => index - 1,
    };
    self.list_state.select(Some(previous));
  }

  fn focus(&mut self, mode: Mode) {
    self.mode = mode;
    self.input.set_focused(mode == Mode::Input);
    self.clamp_selection();
  }

  /// Maps a screen position to the row drawn there and whether it hit the
  /// row's remove control.
  fn row_at(&self, column: u16, row: u16) -> Option<(usize, bool)> {
    let inner = Block::default().borders(Borders::ALL).inner(self.layout.list);
    if !inner.contains(Position::new(column, row)) {
      return None;
    }
    let index = self.list_state.offset() + usize::from(row - inner.y);
    if index >= self.rows.len() {
      return None;
    }
    let control_start = inner.x + Span::raw(HIGHLIGHT_SYMBOL).width() as u16;
    let control_end = control_start + Span::raw(REMOVE_CONTROL).width() as u16;
    Some((index, (control_start..control_end).contains(&column)))
  }

  fn render_input_row(&mut self, frame: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Min(1), Constraint::Length(ADD_BUTTON_WIDTH)])
      .split(area);
    self.layout.input = chunks[0];
    self.layout.add_button = chunks[1];

    self.input.render(frame, chunks[0]);
    let button = Paragraph::new(ADD_BUTTON)
      .alignment(Alignment::Center)
      .block(Block::default().borders(Borders::ALL))
      .style(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD));
    frame.render_widget(button, chunks[1]);
  }

  fn render_list(&mut self, frame: &mut Frame<'_>, area: Rect) {
    self.layout.list = area;
    // Rows are re-derived from the adapter on every frame.
    self.rows = self.adapter.render_all();
    self.clamp_selection();

    let items: Vec<ListItem> = self.rows.iter().map(RowBinding::render).collect();
    let title = format!("{} ({})", self.config.list_title, self.rows.len());
    let border = if self.mode == Mode::List { Color::LightGreen } else { Color::White };
    let highlight = if self.mode == Mode::List {
      Style::default().add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };

    let list = List::new(items)
      .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(border)))
      .style(Style::default().fg(Color::White))
      .highlight_style(highlight)
      .highlight_symbol(HIGHLIGHT_SYMBOL)
      .highlight_spacing(HighlightSpacing::Always);

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }
}

#[async_trait::async_trait]
impl Component for ShoppingList {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
    self.adapter.register_observer(tx);
    Ok(())
  }

  async fn handle_events(&mut self, event: Option<Event>) -> Result<Option<Action>> {
    match event {
      Some(Event::Key(key)) => self.handle_key_events(key).await,
      Some(Event::Mouse(mouse)) => self.handle_mouse_events(mouse).await,
      Some(Event::Paste(text)) if self.mode == Mode::Input => {
        Ok(if self.input.insert_str(&text) { Some(Action::Render) } else { None })
      },
      _ => Ok(None),
    }
  }

  async fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    if self.mode != Mode::Input {
      return Ok(None);
    }
    let changed = self.input.handle_key_event(key);
    Ok(if changed { Some(Action::Render) } else { None })
  }

  async fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
    match mouse.kind {
      MouseEventKind::Down(MouseButton::Left) => {
        let position = Position::new(mouse.column, mouse.row);
        if self.layout.add_button.contains(position) {
          return Ok(Some(Action::AddItem));
        }
        if self.layout.input.contains(position) {
          return Ok(Some(Action::FocusInput));
        }
        match self.row_at(mouse.column, mouse.row) {
          Some((index, true)) => {
            self.remove_row(index);
            Ok(None)
          },
          Some((index, false)) => {
            self.list_state.select(Some(index));
            Ok(Some(Action::FocusList))
          },
          None => Ok(None),
        }
      },
      MouseEventKind::ScrollDown if self.mode == Mode::List => Ok(Some(Action::SelectNext)),
      MouseEventKind::ScrollUp if self.mode == Mode::List => Ok(Some(Action::SelectPrevious)),
      _ => Ok(None),
    }
  }

  async fn update(&mut self, action: Action) -> Result<Option<Action>> {
    match action {
      Action::AddItem => {
        self.on_add();
        Ok(None)
      },
      Action::RemoveSelected => {
        self.remove_selected();
        Ok(None)
      },
      Action::SelectNext => {
        self.select_next();
        Ok(Some(Action::Render))
      },
      Action::SelectPrevious => {
        self.select_previous();
        Ok(Some(Action::Render))
      },
      Action::FocusInput => {
        self.focus(Mode::Input);
        Ok(Some(Action::Render))
      },
      Action::FocusList => {
        self.focus(Mode::List);
        Ok(Some(Action::Render))
      },
      _ => Ok(None),
    }
  }

  fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
      .split(area);

    self.render_input_row(frame, chunks[0]);
    self.render_list(frame, chunks[1]);
    self.footer.render(frame, chunks[2], self.mode, !self.adapter.is_empty());

    Ok(())
  }
}
