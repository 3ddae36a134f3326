//! Resource traits and the reconciliation policy.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// How a list controller brings its local collection back in line with
/// the backend after a successful mutation.
///
/// Each resource declares exactly one policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// Apply the entity returned by the backend to the local collection:
    /// replace on id match, append otherwise, remove on delete.
    Merge,
    /// Discard the local collection and fetch it again.
    Refetch,
}

/// Exposes the display fields a local search query is matched against.
pub trait Searchable {
    /// Display fields considered by the local filter.
    ///
    /// Absent optional fields are simply left out.
    fn search_fields(&self) -> Vec<&str>;
}

/// A server-owned record cached by a list controller.
pub trait Resource:
    Searchable + Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Payload sent on create and update.
    type Input: Serialize + Debug + Send + Sync;

    /// Human readable entity name used in logs and error messages.
    const KIND: &'static str;

    /// Reconciliation policy applied after every successful mutation.
    const POLICY: ReconcilePolicy;

    /// The opaque backend identifier.
    fn id(&self) -> &str;
}

/// Merges a backend-returned entity into a collection.
///
/// Replaces the element with the same id in place, otherwise appends.
pub fn merge_entity<R: Resource>(items: &mut Vec<R>, entity: R) {
    match items.iter_mut().find(|item| item.id() == entity.id()) {
        Some(slot) => *slot = entity,
        None => items.push(entity),
    }
}

/// Removes the entity with the given id, returning whether one was removed.
pub fn remove_entity<R: Resource>(items: &mut Vec<R>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treatment::Treatment;

    fn treatment(id: &str, name: &str) -> Treatment {
        Treatment {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            duration: 30,
            price: 100.0,
        }
    }

    #[test]
    fn test_merge_replaces_on_id_match() {
        let mut items = vec![treatment("t-1", "Cleaning"), treatment("t-2", "Whitening")];
        merge_entity(&mut items, treatment("t-1", "Deep cleaning"));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Deep cleaning");
    }

    #[test]
    fn test_merge_appends_new_entity() {
        let mut items = vec![treatment("t-1", "Cleaning")];
        merge_entity(&mut items, treatment("t-9", "Implant"));

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "t-9");
    }

    #[test]
    fn test_remove_entity() {
        let mut items = vec![treatment("t-1", "Cleaning"), treatment("t-2", "Whitening")];
        assert!(remove_entity(&mut items, "t-1"));
        assert!(!remove_entity(&mut items, "t-1"));
        assert_eq!(items.len(), 1);
    }
}
