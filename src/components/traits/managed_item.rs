use std::fmt::Debug;

/// Items that can be shown as rows by a [`RowAdapter`](crate::components::views::shopping_list::RowAdapter).
pub trait ManagedItem: Debug + Send + Sync + 'static {
  /// Text shown for the item's row.
  fn label(&self) -> &str;
}
