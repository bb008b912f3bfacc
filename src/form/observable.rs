//! A shared value that notifies subscribers whenever it changes.

use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable handle to a value observed by any number of readers.
///
/// All clones refer to the same value. Writes are visible to every holder and wake every
/// [`watch::Receiver`] obtained from [`subscribe`].
///
/// [`subscribe`]: Observable::subscribe
#[derive(Debug)]
pub(crate) struct Observable<T> {
  sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for Observable<T> {
  fn clone(&self) -> Self {
    Observable {
      sender: self.sender.clone(),
    }
  }
}

impl<T: Default> Default for Observable<T> {
  fn default() -> Self {
    Observable::new(T::default())
  }
}

impl<T> Observable<T> {
  pub(crate) fn new(value: T) -> Self {
    let (sender, _) = watch::channel(value);
    Observable {
      sender: Arc::new(sender),
    }
  }

  /// Returns a copy of the current value.
  pub(crate) fn get(&self) -> T
  where
    T: Clone,
  {
    self.sender.borrow().clone()
  }

  /// Replaces the value and notifies subscribers.
  pub(crate) fn set(&self, value: T) {
    self.sender.send_replace(value);
  }

  /// Modifies the value in place and notifies subscribers.
  pub(crate) fn update(&self, modify: impl FnOnce(&mut T)) {
    self.sender.send_modify(modify);
  }

  pub(crate) fn subscribe(&self) -> watch::Receiver<T> {
    self.sender.subscribe()
  }
}
