use std::sync::Arc;

use ratatui::{
  style::{Color, Style},
  text::{Line, Span},
  widgets::ListItem,
};

use super::row_adapter::RowAdapter;
use crate::components::traits::managed_item::ManagedItem;

/// The inline control drawn at the start of every row.
pub const REMOVE_CONTROL: &str = "[x]";

/// Removes the item a row was bound to.
#[derive(Debug)]
pub struct RemoveTrigger<T: ManagedItem> {
  item: Arc<T>,
}

impl<T: ManagedItem> RemoveTrigger<T> {
  pub(super) fn new(item: Arc<T>) -> Self {
    RemoveTrigger { item }
  }

  /// Removes the bound item from `adapter`. Returns false if it was already gone.
  pub fn fire(&self, adapter: &mut RowAdapter<T>) -> bool {
    adapter.remove(&self.item)
  }
}

impl<T: ManagedItem> Clone for RemoveTrigger<T> {
  fn clone(&self) -> Self {
    RemoveTrigger { item: Arc::clone(&self.item) }
  }
}

impl<T: ManagedItem> PartialEq for RemoveTrigger<T> {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.item, &other.item)
  }
}

/// What one visible row shows, plus the trigger for its remove control.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBinding<T: ManagedItem> {
  pub label: String,
  pub remove: RemoveTrigger<T>,
}

impl<T: ManagedItem> RowBinding<T> {
  pub fn render(&self) -> ListItem<'static> {
    ListItem::from(Line::from(vec![
      Span::styled(REMOVE_CONTROL, Style::default().fg(Color::LightRed)),
      Span::raw(" "),
      Span::raw(self.label.clone()),
    ]))
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::shopping::Item;

  #[test]
  fn test_render() {
    let mut adapter = RowAdapter::new();
    adapter.add(Item::new("Milk").into_ref());

    let rendered = adapter.render(0).unwrap().render();

    assert_eq!(
      rendered,
      ListItem::new(Line::from_iter([
        Span::from("[x]").style(Style::default().fg(Color::LightRed)),
        Span::from(" "),
        Span::from("Milk"),
      ]))
    );
  }

  #[test]
  fn test_triggers_compare_by_identity() {
    let milk = Item::new("Milk").into_ref();
    let other_milk = Item::new("Milk").into_ref();

    assert_eq!(RemoveTrigger::new(milk.clone()), RemoveTrigger::new(milk));
    assert_ne!(RemoveTrigger::new(Item::new("Milk").into_ref()), RemoveTrigger::new(other_milk));
  }

  #[test]
  fn test_fire_twice_only_removes_once() {
    let mut adapter = RowAdapter::new();
    adapter.add(Item::new("Milk").into_ref());
    adapter.add(Item::new("Bread").into_ref());
    let row = adapter.render(0).unwrap();

    assert!(row.remove.fire(&mut adapter));
    assert!(!row.remove.fire(&mut adapter));
    assert_eq!(adapter.count(), 1);
    assert_eq!(adapter.render(0).unwrap().label, "Bread");
  }
}
