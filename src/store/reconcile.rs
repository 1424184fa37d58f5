//! How a settled response is folded into the cached list.

use crate::models::{Entity, EntityId};

/// Snapshot: the server's list replaces whatever was cached
pub fn replace_all<T>(items: &mut Vec<Entity<T>>, fresh: Vec<Entity<T>>) {
    *items = fresh;
}

/// A created record goes to the end
pub fn append<T>(items: &mut Vec<Entity<T>>, created: Entity<T>) {
    items.push(created);
}

/// Swap in `updated` where its id matches. Returns false if nothing matched,
/// in which case the list is left alone.
pub fn replace_by_id<T>(items: &mut [Entity<T>], updated: Entity<T>) -> bool {
    match items.iter_mut().find(|item| item.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Drop the record with `id`. Returns how many entries were removed.
pub fn remove_by_id<T>(items: &mut Vec<Entity<T>>, id: &EntityId) -> usize {
    let before = items.len();
    items.retain(|item| &item.id != id);
    before - items.len()
}
