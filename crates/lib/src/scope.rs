//! Variable scopes and the layered collection that encloses them.
//!
//! A [`Scope`] is the unit every resolver in [`crate::args`] produces: an
//! insertion-ordered set of name to [`Binding`] entries. A binding is either
//! *active* (eligible for substitution right away) or *inactive* (registered,
//! but only usable once something activates it, e.g. a matching declaration).
//!
//! A [`Collection`] stacks scopes to model the enclosing build context.
//! Resolvers read from it only through the [`ActiveLookup`] trait, so callers
//! are free to plug in their own context type.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ArgError;

/// A single variable binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
  pub value: String,
  pub active: bool,
}

/// Read-only access to the active bindings of a variable context.
pub trait ActiveLookup {
  /// Look up `name`, ignoring bindings that are not active.
  fn get_active(&self, name: &str) -> Option<&str>;
}

/// Resolve `name` from the active bindings of `current`.
///
/// This is how an argument given without a value inherits the value of a
/// variable already active in the enclosing context.
pub fn resolve_active(name: &str, current: &impl ActiveLookup) -> Result<String, ArgError> {
  current
    .get_active(name)
    .map(str::to_string)
    .ok_or_else(|| ArgError::CannotInfer(name.to_string()))
}

/// An insertion-ordered mapping from variable name to [`Binding`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Scope {
  vars: IndexMap<String, Binding>,
}

impl Scope {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert an active binding.
  ///
  /// An existing binding with the same name is replaced in place.
  pub fn add_active(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.insert(name.into(), value.into(), true);
  }

  /// Insert an inactive binding.
  ///
  /// An existing binding with the same name is replaced in place.
  pub fn add_inactive(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.insert(name.into(), value.into(), false);
  }

  fn insert(&mut self, name: String, value: String, active: bool) {
    self.vars.insert(name, Binding { value, active });
  }

  pub fn get(&self, name: &str) -> Option<&Binding> {
    self.vars.get(name)
  }

  /// Mark an existing binding as active.
  ///
  /// Returns `false` if no binding with that name exists.
  pub fn activate(&mut self, name: &str) -> bool {
    match self.vars.get_mut(name) {
      Some(binding) => {
        binding.active = true;
        true
      }
      None => false,
    }
  }

  /// Remove a binding, preserving the order of the remaining entries.
  pub fn remove(&mut self, name: &str) -> Option<Binding> {
    self.vars.shift_remove(name)
  }

  pub fn len(&self) -> usize {
    self.vars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vars.is_empty()
  }

  /// Iterate bindings in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
    self.vars.iter().map(|(name, binding)| (name.as_str(), binding))
  }

  /// Names in insertion order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.vars.keys().map(String::as_str)
  }

  /// Names of active bindings, in insertion order.
  pub fn active_names(&self) -> impl Iterator<Item = &str> {
    self.iter().filter(|(_, b)| b.active).map(|(name, _)| name)
  }

  /// Names in lexicographic order.
  pub fn sorted_names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.names().collect();
    names.sort_unstable();
    names
  }

  /// Overlay `other` on top of this scope.
  ///
  /// Bindings from `other` replace same-named bindings here (keeping their
  /// position); names new to this scope are appended in `other`'s order.
  pub fn combine(mut self, other: Scope) -> Scope {
    self.vars.extend(other.vars);
    self
  }
}

impl ActiveLookup for Scope {
  fn get_active(&self, name: &str) -> Option<&str> {
    self
      .vars
      .get(name)
      .filter(|b| b.active)
      .map(|b| b.value.as_str())
  }
}

impl<'a> IntoIterator for &'a Scope {
  type Item = (&'a String, &'a Binding);
  type IntoIter = indexmap::map::Iter<'a, String, Binding>;

  fn into_iter(self) -> Self::IntoIter {
    self.vars.iter()
  }
}

/// A stack of scopes describing the enclosing build context.
///
/// The most recently pushed scope is the innermost one and is consulted first.
#[derive(Debug, Clone, Default)]
pub struct Collection {
  layers: Vec<Scope>,
}

impl Collection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Push `scope` as the new innermost layer.
  pub fn push(&mut self, scope: Scope) {
    self.layers.push(scope);
  }

  /// Pop the innermost layer.
  pub fn pop(&mut self) -> Option<Scope> {
    self.layers.pop()
  }

  pub fn depth(&self) -> usize {
    self.layers.len()
  }
}

impl ActiveLookup for Collection {
  // An inactive binding does not hide an active one in an outer layer.
  fn get_active(&self, name: &str) -> Option<&str> {
    self.layers.iter().rev().find_map(|scope| scope.get_active(name))
  }
}

impl FromIterator<Scope> for Collection {
  fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
    Self {
      layers: iter.into_iter().collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn preserves_insertion_order() {
    let mut scope = Scope::new();
    scope.add_inactive("ZED", "1");
    scope.add_inactive("ALPHA", "2");
    scope.add_active("MID", "3");

    assert_eq!(scope.names().collect::<Vec<_>>(), vec!["ZED", "ALPHA", "MID"]);
    assert_eq!(scope.sorted_names(), vec!["ALPHA", "MID", "ZED"]);
  }

  #[test]
  fn reinsert_replaces_in_place() {
    let mut scope = Scope::new();
    scope.add_inactive("A", "1");
    scope.add_inactive("B", "2");
    scope.add_active("A", "3");

    assert_eq!(scope.len(), 2);
    assert_eq!(scope.names().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(
      scope.get("A"),
      Some(&Binding {
        value: "3".to_string(),
        active: true
      })
    );
  }

  #[test]
  fn inactive_bindings_are_invisible_to_active_lookup() {
    let mut scope = Scope::new();
    scope.add_inactive("VERSION", "1.2.3");

    assert_eq!(scope.get_active("VERSION"), None);
    assert!(scope.get("VERSION").is_some());
  }

  #[test]
  fn activate_makes_binding_visible() {
    let mut scope = Scope::new();
    scope.add_inactive("VERSION", "1.2.3");

    assert!(scope.activate("VERSION"));
    assert_eq!(scope.get_active("VERSION"), Some("1.2.3"));
    assert!(!scope.activate("MISSING"));
  }

  #[test]
  fn active_names_skips_inactive() {
    let mut scope = Scope::new();
    scope.add_active("A", "1");
    scope.add_inactive("B", "2");
    scope.add_active("C", "3");

    assert_eq!(scope.active_names().collect::<Vec<_>>(), vec!["A", "C"]);
  }

  #[test]
  fn remove_keeps_remaining_order() {
    let mut scope = Scope::new();
    scope.add_active("A", "1");
    scope.add_active("B", "2");
    scope.add_active("C", "3");

    assert_eq!(scope.remove("B").map(|b| b.value), Some("2".to_string()));
    assert_eq!(scope.names().collect::<Vec<_>>(), vec!["A", "C"]);
    assert!(scope.remove("B").is_none());
  }

  #[test]
  fn combine_overrides_and_appends() {
    let mut base = Scope::new();
    base.add_active("A", "1");
    base.add_active("B", "2");

    let mut overlay = Scope::new();
    overlay.add_inactive("B", "20");
    overlay.add_inactive("C", "30");

    let combined = base.combine(overlay);
    assert_eq!(combined.names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    assert_eq!(combined.get("B").map(|b| b.value.as_str()), Some("20"));
    assert_eq!(combined.get_active("B"), None);
  }

  #[test]
  fn collection_prefers_innermost_active_binding() {
    let mut outer = Scope::new();
    outer.add_active("IMAGE", "alpine");
    let mut inner = Scope::new();
    inner.add_active("IMAGE", "debian");

    let collection: Collection = [outer, inner].into_iter().collect();
    assert_eq!(collection.get_active("IMAGE"), Some("debian"));
  }

  #[test]
  fn collection_inactive_does_not_shadow_outer_active() {
    let mut outer = Scope::new();
    outer.add_active("IMAGE", "alpine");
    let mut inner = Scope::new();
    inner.add_inactive("IMAGE", "debian");

    let mut collection = Collection::new();
    collection.push(outer);
    collection.push(inner);

    assert_eq!(collection.get_active("IMAGE"), Some("alpine"));
    assert_eq!(collection.depth(), 2);
    collection.pop();
    assert_eq!(collection.depth(), 1);
  }

  #[test]
  fn resolve_active_inherits_or_fails() {
    let mut scope = Scope::new();
    scope.add_active("IMAGE", "alpine");
    scope.add_inactive("TAG", "latest");
    let collection: Collection = [scope].into_iter().collect();

    assert_eq!(resolve_active("IMAGE", &collection), Ok("alpine".to_string()));
    assert_eq!(
      resolve_active("TAG", &collection),
      Err(ArgError::CannotInfer("TAG".to_string()))
    );
  }

  #[test]
  fn empty_collection_finds_nothing() {
    assert_eq!(Collection::new().get_active("ANY"), None);
  }

  #[test]
  fn serializes_as_ordered_map() {
    let mut scope = Scope::new();
    scope.add_inactive("B", "2");
    scope.add_active("A", "1");

    let json = serde_json::to_string(&scope).unwrap();
    assert_eq!(
      json,
      r#"{"B":{"value":"2","active":false},"A":{"value":"1","active":true}}"#
    );
  }
}
