use std::{collections::HashMap, path::PathBuf};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{Deserialize, Serialize, de::Deserializer};
use tracing::debug;

use crate::{action::Action, error::Error, mode::Mode, utils::get_config_dir};

const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub _config_dir: PathBuf,
}

/// Settings for the shopping list screen itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
  /// Whether the input field is emptied after an item is added.
  pub clear_input_on_add: bool,
  pub input_title: String,
  pub list_title: String,
}

impl Default for ScreenConfig {
  fn default() -> Self {
    Self {
      clear_input_on_add: false,
      input_title: String::from("New item"),
      list_title: String::from("Shopping list"),
    }
  }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
  #[serde(default, flatten)]
  pub config: AppConfig,
  #[serde(default)]
  pub keybindings: KeyBindings,
  #[serde(default)]
  pub screen: ScreenConfig,
}

impl Config {
  pub fn new() -> Result<Self> {
    Self::load_from(get_config_dir())
  }

  /// Loads user settings from `config_dir`, falling back to the built-in
  /// defaults for anything the user did not set.
  pub fn load_from(config_dir: PathBuf) -> Result<Self> {
    let default_config: Config = json5::from_str(CONFIG)?;
    let mut builder = config::Config::builder().set_default("_config_dir", config_dir.display().to_string())?;

    let config_files = [
      ("config.json5", config::FileFormat::Json5),
      ("config.json", config::FileFormat::Json),
      ("config.yaml", config::FileFormat::Yaml),
      ("config.toml", config::FileFormat::Toml),
      ("config.ini", config::FileFormat::Ini),
    ];
    let mut found_config = false;
    for (file, format) in &config_files {
      let path = config_dir.join(file);
      if path.exists() {
        found_config = true;
      }
      builder = builder.add_source(config::File::from(path).format(*format).required(false));
    }
    if !found_config {
      debug!("No configuration file found in {}, using defaults", config_dir.display());
    }

    let mut cfg: Self = builder.build()?.try_deserialize()?;

    for (mode, default_bindings) in default_config.keybindings.iter() {
      let user_bindings = cfg.keybindings.entry(*mode).or_default();
      for (key, action) in default_bindings.iter() {
        user_bindings.entry(*key).or_insert_with(|| action.clone());
      }
    }

    Ok(cfg)
  }

  pub fn action_for(&self, mode: Mode, key: &KeyEvent) -> Option<Action> {
    self.keybindings.get(&mode).and_then(|bindings| bindings.get(key)).cloned()
  }
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct KeyBindings(pub HashMap<Mode, HashMap<KeyEvent, Action>>);

impl<'de> Deserialize<'de> for KeyBindings {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let parsed_map = HashMap::<Mode, HashMap<String, Action>>::deserialize(deserializer)?;

    let mut keybindings = HashMap::new();
    for (mode, inner_map) in parsed_map {
      let mut converted = HashMap::new();
      for (key_str, action) in inner_map {
        let key = parse_key_event(&key_str).map_err(serde::de::Error::custom)?;
        converted.insert(key, action);
      }
      keybindings.insert(mode, converted);
    }

    Ok(KeyBindings(keybindings))
  }
}

/// Parses a binding such as `<q>`, `<Ctrl-c>` or `<Delete>` into a key event.
pub fn parse_key_event(raw: &str) -> Result<KeyEvent, Error> {
  let inner = raw
    .strip_prefix('<')
    .and_then(|s| s.strip_suffix('>'))
    .ok_or_else(|| Error::KeyBinding(raw.to_string()))?;
  let (remaining, modifiers) = extract_modifiers(inner);
  parse_key_code_with_modifiers(remaining, modifiers).ok_or_else(|| Error::KeyBinding(raw.to_string()))
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
  let mut modifiers = KeyModifiers::empty();
  let mut current = raw;

  loop {
    let lower = current.to_ascii_lowercase();
    if lower.starts_with("ctrl-") {
      modifiers.insert(KeyModifiers::CONTROL);
      current = &current[5..];
    } else if lower.starts_with("alt-") {
      modifiers.insert(KeyModifiers::ALT);
      current = &current[4..];
    } else if lower.starts_with("shift-") {
      modifiers.insert(KeyModifiers::SHIFT);
      current = &current[6..];
    } else {
      break;
    }
  }

  (current, modifiers)
}

fn parse_key_code_with_modifiers(raw: &str, mut modifiers: KeyModifiers) -> Option<KeyEvent> {
  let code = match raw.to_ascii_lowercase().as_str() {
    "esc" => KeyCode::Esc,
    "enter" => KeyCode::Enter,
    "left" => KeyCode::Left,
    "right" => KeyCode::Right,
    "up" => KeyCode::Up,
    "down" => KeyCode::Down,
    "home" => KeyCode::Home,
    "end" => KeyCode::End,
    "pageup" => KeyCode::PageUp,
    "pagedown" => KeyCode::PageDown,
    "backtab" => {
      modifiers.insert(KeyModifiers::SHIFT);
      KeyCode::BackTab
    },
    "backspace" => KeyCode::Backspace,
    "delete" => KeyCode::Delete,
    "insert" => KeyCode::Insert,
    "tab" => KeyCode::Tab,
    "space" => KeyCode::Char(' '),
    "hyphen" | "minus" => KeyCode::Char('-'),
    f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
    _ => {
      let mut chars = raw.chars();
      let c = chars.next()?;
      if chars.next().is_some() {
        return None;
      }
      if modifiers.contains(KeyModifiers::SHIFT) {
        KeyCode::Char(c.to_ascii_uppercase())
      } else {
        KeyCode::Char(c)
      }
    },
  };
  Some(KeyEvent::new(code, modifiers))
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_default_config_parses() {
    let c: Config = json5::from_str(CONFIG).unwrap();

    assert_eq!(c.screen, ScreenConfig::default());
    assert_eq!(
      c.action_for(Mode::Input, &KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
      Some(Action::AddItem)
    );
    assert_eq!(
      c.action_for(Mode::List, &KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)),
      Some(Action::RemoveSelected)
    );
  }

  #[test]
  fn test_input_mode_leaves_letters_unbound() {
    let c: Config = json5::from_str(CONFIG).unwrap();

    assert_eq!(c.action_for(Mode::Input, &KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)), None);
    assert_eq!(c.action_for(Mode::Input, &KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)), None);
  }

  #[test]
  fn test_load_from_missing_dir_uses_defaults() {
    let dir = std::env::temp_dir().join("shopping-list-config-test-missing");
    let c = Config::load_from(dir).unwrap();

    assert!(!c.screen.clear_input_on_add);
    assert_eq!(
      c.action_for(Mode::List, &KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
      Some(Action::Quit)
    );
  }

  #[test]
  fn test_load_from_user_file_overrides_screen() {
    let dir = std::env::temp_dir().join("shopping-list-config-test-override");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.json5"), r#"{ screen: { clear_input_on_add: true }, keybindings: { List: { "<x>": "RemoveSelected" } } }"#)
      .unwrap();

    let c = Config::load_from(dir.clone()).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert!(c.screen.clear_input_on_add);
    assert_eq!(c.screen.list_title, "Shopping list");
    assert_eq!(
      c.action_for(Mode::List, &KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
      Some(Action::RemoveSelected)
    );
    // built-in bindings are still merged in
    assert_eq!(
      c.action_for(Mode::List, &KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)),
      Some(Action::RemoveSelected)
    );
  }

  #[test]
  fn test_simple_keys() {
    assert_eq!(parse_key_event("<a>").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty()));
    assert_eq!(parse_key_event("<Enter>").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));
    assert_eq!(parse_key_event("<esc>").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::empty()));
    assert_eq!(parse_key_event("<F5>").unwrap(), KeyEvent::new(KeyCode::F(5), KeyModifiers::empty()));
  }

  #[test]
  fn test_with_modifiers() {
    assert_eq!(parse_key_event("<Ctrl-c>").unwrap(), KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(parse_key_event("<alt-enter>").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
    assert_eq!(
      parse_key_event("<ctrl-alt-a>").unwrap(),
      KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)
    );
  }

  #[test]
  fn test_invalid_keys() {
    assert_eq!(parse_key_event("q"), Err(Error::KeyBinding("q".to_string())));
    assert_eq!(parse_key_event("<ctrl-invalid-key>"), Err(Error::KeyBinding("<ctrl-invalid-key>".to_string())));
  }
}
