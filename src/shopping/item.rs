use std::sync::Arc;

use crate::components::traits::managed_item::ManagedItem;

/// A single shopping list entry.
///
/// The name is kept exactly as it was typed, including surrounding whitespace
/// and the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
  pub name: String,
}

/// Items are shared by reference; two entries with the same name are still
/// distinct entries.
pub type ItemRef = Arc<Item>;

impl Item {
  pub fn new(name: impl Into<String>) -> Self {
    Item { name: name.into() }
  }

  pub fn into_ref(self) -> ItemRef {
    Arc::new(self)
  }
}

impl ManagedItem for Item {
  fn label(&self) -> &str {
    &self.name
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_name_is_kept_verbatim() {
    assert_eq!(Item::new("  Milk ").label(), "  Milk ");
    assert_eq!(Item::new("").label(), "");
  }

  #[test]
  fn test_equal_names_are_distinct_refs() {
    let a = Item::new("Milk").into_ref();
    let b = Item::new("Milk").into_ref();

    assert_eq!(a, b);
    assert!(!Arc::ptr_eq(&a, &b));
  }
}
