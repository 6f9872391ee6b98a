use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error};

use super::row_binding::{RemoveTrigger, RowBinding};
use crate::{action::Action, components::traits::managed_item::ManagedItem, shopping::Item};

/// Owns the ordered list of items and hands out one [`RowBinding`] per
/// position.
///
/// Every mutation asks the host to redraw all rows. There is no partial
/// invalidation.
#[derive(Debug)]
pub struct RowAdapter<T: ManagedItem = Item> {
  items: Vec<Arc<T>>,
  observer: Option<UnboundedSender<Action>>,
  generation: u64,
}

impl<T: ManagedItem> Default for RowAdapter<T> {
  fn default() -> Self {
    RowAdapter { items: Vec::new(), observer: None, generation: 0 }
  }
}

impl<T: ManagedItem> RowAdapter<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the channel that receives [`Action::Render`] after each mutation.
  pub fn register_observer(&mut self, tx: UnboundedSender<Action>) {
    self.observer = Some(tx);
  }

  pub fn count(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Number of data set change notifications issued so far.
  pub fn generation(&self) -> u64 {
    self.generation
  }

  /// Appends `item`. Empty and duplicate names are accepted.
  pub fn add(&mut self, item: Arc<T>) {
    debug!("Adding item {:?} at position {}", item.label(), self.items.len());
    self.items.push(item);
    self.notify_data_set_changed();
  }

  /// Removes the first entry that is the same allocation as `item`.
  ///
  /// Removing something that is not present leaves the list as it was.
  pub fn remove(&mut self, item: &Arc<T>) -> bool {
    let removed = match self.items.iter().position(|candidate| Arc::ptr_eq(candidate, item)) {
      Some(index) => {
        debug!("Removing item {:?} at position {}", item.label(), index);
        self.items.remove(index);
        true
      },
      None => {
        debug!("Item {:?} is not in the list, nothing to remove", item.label());
        false
      },
    };
    self.notify_data_set_changed();
    removed
  }

  /// Binds the row at `index`, or `None` past the end of the list.
  pub fn render(&self, index: usize) -> Option<RowBinding<T>> {
    self.items.get(index).map(|item| RowBinding {
      label: item.label().to_string(),
      remove: RemoveTrigger::new(Arc::clone(item)),
    })
  }

  /// Binds every row, in list order.
  pub fn render_all(&self) -> Vec<RowBinding<T>> {
    (0..self.count()).filter_map(|index| self.render(index)).collect()
  }

  pub fn item_at(&self, index: usize) -> Option<&Arc<T>> {
    self.items.get(index)
  }

  fn notify_data_set_changed(&mut self) {
    self.generation += 1;
    if let Some(tx) = &self.observer {
      if let Err(e) = tx.send(Action::Render) {
        error!("Failed to send action: {}", e);
      }
    }
  }
}
