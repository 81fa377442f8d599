//! Slot-indexed node pool.
//!
//! Values live in a `Vec<Option<T>>`; vacated slots go on a free list and are
//! handed out again by the next [`SlotArena::insert`]. Callers keep a
//! [`SlotId`] instead of a pointer, so a structure that links its nodes by id
//! (see [`IntrusiveList`](crate::ds::IntrusiveList)) never forms an ownership
//! cycle.
//!
//! ```text
//!   slots:     [ Some(a) | None | Some(c) | Some(d) ]
//!   free_list: [ 1 ]
//!
//!   insert(e) -> SlotId(1)   (reuses the hole before growing the Vec)
//! ```
//!
//! A `SlotId` is only meaningful for the arena that issued it, and only until
//! that slot is removed.

/// Stable handle to an occupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of `T` addressed by [`SlotId`].
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Pre-allocates room for `capacity` slots.
    ///
    /// A bounded cache sizes its arena once at construction so steady-state
    /// churn (evict one, insert one) never reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Stores `value` and returns its handle, reusing a free slot if one exists.
    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = match self.free_list.pop() {
            Some(idx) => {
                debug_assert!(self.slots[idx].is_none(), "free slot {idx} is occupied");
                self.slots[idx] = Some(value);
                idx
            }
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            }
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Takes the value out of `id`, freeing the slot for reuse.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value. Allocated storage is retained.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }

    /// Occupied slots in index order (not insertion order).
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (SlotId(idx), value)))
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
