//! Entity trait: records with a stable identity (products, issuances).

/// A record identified by a store-assigned id.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> Self::Id;
}

/// Linear lookup by id.
pub fn find_by_id<E: Entity>(items: &[E], id: E::Id) -> Option<&E> {
    items.iter().find(|e| e.id() == id)
}

/// Next id for a table whose ids are allocated as `max + 1` (SQLite rowid rules),
/// so an emptied table starts again at 1.
pub fn next_id<E>(items: &[E]) -> E::Id
where
    E: Entity,
    E::Id: From<i64>,
    i64: From<E::Id>,
{
    let max = items.iter().map(|e| i64::from(e.id())).max().unwrap_or(0);
    E::Id::from(max + 1)
}
