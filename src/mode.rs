use serde::{Deserialize, Serialize};
use strum::Display;

/// Which part of the screen receives unbound key presses.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mode {
  #[default]
  #[serde(alias = "input")]
  Input,
  #[serde(alias = "list")]
  List,
  #[serde(alias = "error")]
  Error,
}
