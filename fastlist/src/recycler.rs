use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;

use crate::{Item, ItemKey, ItemKind};

/// `(section, row)` -> first available position in [`KindTable::entries`].
type CoordMap = HashMap<(usize, usize), usize>;

/// Handle to an item created during the current pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slot(usize);

#[derive(Clone, Copy, Debug)]
struct Entry {
    /// `None` once the key has been taken by a new item.
    key: Option<ItemKey>,
    /// Next entry with the same coordinates (duplicates are matched in order).
    next: Option<usize>,
}

#[derive(Clone, Debug, Default)]
struct KindTable {
    /// Keys available for re-binding, in previous-frame order.
    entries: Vec<Entry>,
    heads: CoordMap,
    /// Slots waiting for a key, in request order.
    pending: Vec<usize>,
}

impl KindTable {
    fn clear(&mut self) {
        self.entries.clear();
        self.heads.clear();
        self.pending.clear();
    }

    fn push_available(&mut self, section: usize, row: usize, key: ItemKey) {
        let pos = self.entries.len();
        self.entries.push(Entry {
            key: Some(key),
            next: None,
        });
        match self.heads.entry((section, row)) {
            MapEntry::Vacant(v) => {
                v.insert(pos);
            }
            MapEntry::Occupied(o) => {
                let mut cur = *o.get();
                while let Some(next) = self.entries[cur].next {
                    cur = next;
                }
                self.entries[cur].next = Some(pos);
            }
        }
    }

    /// Takes the first available key for `(section, row)` along with its entry position.
    fn take(&mut self, section: usize, row: usize) -> Option<(usize, ItemKey)> {
        let head = *self.heads.get(&(section, row))?;
        let entry = &mut self.entries[head];
        let key = entry.key.take();
        match entry.next {
            Some(next) => {
                self.heads.insert((section, row), next);
            }
            None => {
                self.heads.remove(&(section, row));
            }
        }
        key.map(|key| (head, key))
    }

    /// Puts a taken key back in front of its chain. Undoing takes in reverse order restores
    /// the table exactly.
    fn restore(&mut self, section: usize, row: usize, pos: usize, key: ItemKey) {
        let next = self.heads.insert((section, row), pos);
        self.entries[pos] = Entry {
            key: Some(key),
            next,
        };
    }
}

#[derive(Clone, Copy, Debug)]
struct SlotState {
    item: Item,
    /// Entry the key was taken from; `None` while pending.
    entry: Option<usize>,
    released: bool,
}

/// Hands out stable [`ItemKey`]s across recomputations.
///
/// A pass looks like:
/// 1. [`Recycler::begin`] with the items of the previous frame.
/// 2. [`Recycler::get`] for every item the layout produces. An item whose
///    `(kind, section, row)` existed in the previous frame takes over its key.
/// 3. [`Recycler::finish`], which binds keys for the remaining (pending) items: first from the
///    previous-frame keys nobody claimed, paired positionally per kind, then from a monotonic
///    counter owned by this recycler.
///
/// The positional pairing in step 3 keeps the number of freshly minted keys low when the
/// window moves, but it can hand an unrelated item the key of one that scrolled away. Only
/// items whose coordinates survive between frames are guaranteed to keep their key.
#[derive(Clone, Debug, Default)]
pub struct Recycler {
    tables: [KindTable; ItemKind::COUNT],
    slots: Vec<SlotState>,
    last_key: ItemKey,
}

impl Recycler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently minted key (`0` before the first one).
    pub fn last_key(&self) -> ItemKey {
        self.last_key
    }

    /// Starts a pass, making the keys of `previous` available for re-binding.
    pub fn begin(&mut self, previous: &[Item]) {
        self.slots.clear();
        for table in &mut self.tables {
            table.clear();
        }
        for item in previous {
            if item.key == Item::UNASSIGNED_KEY {
                vwarn!(
                    section = item.section,
                    row = item.row,
                    "Recycler::begin: previous item without a key"
                );
                continue;
            }
            self.tables[item.kind.index()].push_available(item.section, item.row, item.key);
        }
    }

    pub fn get(
        &mut self,
        kind: ItemKind,
        offset: f64,
        height: f64,
        section: usize,
        row: usize,
    ) -> Slot {
        let slot = self.slots.len();
        let table = &mut self.tables[kind.index()];
        let (entry, key) = match table.take(section, row) {
            Some((pos, key)) => (Some(pos), key),
            None => {
                table.pending.push(slot);
                (None, Item::UNASSIGNED_KEY)
            }
        };
        self.slots.push(SlotState {
            item: Item {
                kind,
                key,
                offset,
                height,
                section,
                row,
            },
            entry,
            released: false,
        });
        Slot(slot)
    }

    pub fn item(&self, slot: Slot) -> &Item {
        &self.slots[slot.0].item
    }

    /// Drops an item from the current pass and returns its key to the front of the pool, so
    /// the next [`Recycler::get`] with the same coordinates re-binds it.
    ///
    /// Releasing the most recent items in reverse order of their `get` leaves the recycler as
    /// if they had never been requested.
    pub fn release(&mut self, slot: Slot) {
        let state = &mut self.slots[slot.0];
        if state.released {
            debug_assert!(!state.released, "Recycler::release: slot released twice");
            return;
        }
        state.released = true;
        let item = state.item;
        let table = &mut self.tables[item.kind.index()];
        match state.entry {
            Some(pos) => table.restore(item.section, item.row, pos, item.key),
            None => table.pending.retain(|&p| p != slot.0),
        }
    }

    /// Binds keys for all pending items and returns the items of `order`.
    pub fn finish(&mut self, order: &[Slot]) -> Vec<Item> {
        for table in &mut self.tables {
            let mut leftovers = table.entries.iter().filter_map(|e| e.key);
            for &slot in &table.pending {
                let key = match leftovers.next() {
                    Some(key) => key,
                    None => {
                        self.last_key += 1;
                        self.last_key
                    }
                };
                self.slots[slot].item.key = key;
            }
            table.pending.clear();
        }

        order
            .iter()
            .map(|&slot| {
                let state = &self.slots[slot.0];
                debug_assert!(!state.released, "Recycler::finish: released slot in output");
                state.item
            })
            .collect()
    }
}
