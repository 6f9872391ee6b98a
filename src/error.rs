use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("unable to parse key binding `{0}`")]
  KeyBinding(String),
}
