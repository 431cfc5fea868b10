//! Generic in-memory repository.
//!
//! A [`Repo`] stores entities in slots, in insertion order, and maps entity ids to slots. Removing
//! an entity empties its slot, so iteration order is insertion order among the live entities.

use std::collections::hash_map::Entry;

prelude! {
    repr::idx::{Slot, SlotMap},
}

/// Keyed store over some [`Entity`] type.
///
/// # Examples
///
/// ```rust
/// # campus_rs::prelude! {}
/// let mut courses = Repo::new("course");
/// let c1 = Course::new("C1", "Programming I", 6, 1, "P1").unwrap();
/// assert!(courses.add(c1.clone()));
/// // ids are unique
/// assert!(!courses.add(c1));
/// assert_eq!(courses.get("C1").map(|c| c.credits()), Some(6));
///
/// let found = courses
///     .search(&Criteria::new().with("name", "programming"))
///     .unwrap();
/// assert_eq!(found.len(), 1);
///
/// assert!(courses.delete("C1"));
/// assert!(courses.get("C1").is_none());
/// ```
pub struct Repo<T> {
    desc: &'static str,
    slots: SlotMap<Option<T>>,
    by_id: HashMap<String, Slot>,
}

impl<T: Entity> Repo<T> {
    /// Constructor, `desc` describes the entities in logs and errors.
    pub fn with_capacity(desc: &'static str, capa: usize) -> Self {
        Self {
            desc,
            slots: SlotMap::with_capacity(capa),
            by_id: HashMap::with_capacity(capa),
        }
    }
    pub fn new(desc: &'static str) -> Self {
        Self::with_capacity(desc, 7)
    }

    pub fn desc(&self) -> &'static str {
        self.desc
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Inserts a new entity, false if its id is already taken.
    pub fn add(&mut self, item: T) -> bool {
        match self.by_id.entry(item.id().to_string()) {
            Entry::Occupied(entry) => {
                log::debug!("refusing to add {} `{}`: id taken", self.desc, entry.key());
                false
            }
            Entry::Vacant(entry) => {
                let slot = self.slots.push_idx(|_| Some(item));
                log::debug!("added {} `{}` #{}", self.desc, entry.key(), slot);
                entry.insert(slot);
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        let slot = *self.by_id.get(id)?;
        self.slots[slot].as_ref()
    }
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        let slot = *self.by_id.get(id)?;
        self.slots[slot].as_mut()
    }

    /// Live entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Snapshot of all live entities, in insertion order.
    pub fn get_all(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Replaces the entity stored under `id`, yields the previous version.
    ///
    /// Returns `None` and leaves the repository untouched if `id` is unknown, or if `item`'s id is
    /// not `id`.
    pub fn replace(&mut self, id: &str, item: T) -> Option<T> {
        if item.id() != id {
            log::warn!(
                "refusing to store {} `{}` under id `{}`",
                self.desc,
                item.id(),
                id
            );
            return None;
        }
        let slot = *self.by_id.get(id)?;
        self.slots[slot].replace(item)
    }

    /// Same as [`Self::replace`], but only reports success.
    pub fn update(&mut self, id: &str, item: T) -> bool {
        self.replace(id, item).is_some()
    }

    /// Removes an entity and yields it.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let slot = self.by_id.remove(id)?;
        log::debug!("removed {} `{}` #{}", self.desc, id, slot);
        self.slots[slot].take()
    }

    /// Same as [`Self::remove`], but only reports success.
    pub fn delete(&mut self, id: &str) -> bool {
        self.remove(id).is_some()
    }

    /// Live entities satisfying `pred`, in insertion order.
    pub fn filter(&self, mut pred: impl FnMut(&T) -> bool) -> Vec<&T> {
        self.iter().filter(|item| pred(item)).collect()
    }

    /// Live entities matching all `criteria`, see [`repr::search`].
    pub fn search(&self, criteria: &Criteria) -> Res<Vec<&T>> {
        let query = criteria
            .compile()
            .context(|| format!("searching {} repository", self.desc))?;
        Ok(self.filter(|item| query.matches(item)))
    }
}
