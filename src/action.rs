use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  AddItem,
  Error(String),
  ExitError,
  FocusInput,
  FocusList,
  Quit,
  RemoveSelected,
  Render,
  Resize(u16, u16),
  Resume,
  SelectNext,
  SelectPrevious,
  Suspend,
  Tick,
}
