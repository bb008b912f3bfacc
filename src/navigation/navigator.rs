use dyn_clone::DynClone;

/// Router capability used to leave the login view.
pub(crate) trait Navigator: DynClone + Send + Sync {
  fn navigate_to(&self, path: &str);
}

dyn_clone::clone_trait_object!(Navigator);
