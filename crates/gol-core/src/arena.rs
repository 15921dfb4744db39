//! Generational arena backing the widget list and list-box items.
//!
//! Records are addressed by a [`Key`] holding the slot index and the
//! generation the slot had when the record was inserted. Removing a record
//! bumps the slot generation, so keys left over from a removed record never
//! resolve to whatever reuses the slot later.

use alloc::vec::Vec;

use crate::error::{GolError, GolResult};

/// Stable reference to a record stored in an [`Arena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    index: u32,
    generation: u32,
}

impl Key {
    /// Slot index, mostly useful for logging
    pub fn index(&self) -> u32 {
        self.index
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next_free: Option<u32> },
}

/// Slot storage with a free list and generation checks
#[derive(Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store a value, reusing a vacant slot when one exists.
    ///
    /// Growing the backing storage is fallible: allocation failure is
    /// reported as [`GolError::OutOfMemory`] and the arena is left unchanged.
    pub fn try_insert(&mut self, value: T) -> GolResult<Key> {
        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            if let Slot::Vacant {
                generation,
                next_free,
            } = *slot
            {
                self.free_head = next_free;
                *slot = Slot::Occupied { generation, value };
                self.len += 1;
                return Ok(Key { index, generation });
            }
        }

        self.slots
            .try_reserve(1)
            .map_err(|_| GolError::OutOfMemory)?;
        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied {
            generation: 0,
            value,
        });
        self.len += 1;
        Ok(Key {
            index,
            generation: 0,
        })
    }

    /// Take a value out, invalidating every copy of `key`.
    pub fn remove(&mut self, key: Key) -> Option<T> {
        let slot = self.slots.get_mut(key.index as usize)?;
        let live = matches!(slot, Slot::Occupied { generation, .. } if *generation == key.generation);
        if !live {
            return None;
        }

        let vacant = Slot::Vacant {
            generation: key.generation.wrapping_add(1),
            next_free: self.free_head,
        };
        match core::mem::replace(slot, vacant) {
            Slot::Occupied { value, .. } => {
                self.free_head = Some(key.index);
                self.len -= 1;
                Some(value)
            }
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: Key) -> Option<&T> {
        match self.slots.get(key.index as usize)? {
            Slot::Occupied { generation, value } if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: Key) -> Option<&mut T> {
        match self.slots.get_mut(key.index as usize)? {
            Slot::Occupied { generation, value } if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    /// Drop every record. Outstanding keys become stale.
    pub fn clear(&mut self) {
        let mut free_head = None;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            let generation = match slot {
                Slot::Occupied { generation, .. } => generation.wrapping_add(1),
                Slot::Vacant { generation, .. } => *generation,
            };
            *slot = Slot::Vacant {
                generation,
                next_free: free_head,
            };
            free_head = Some(index as u32);
        }
        self.free_head = free_head;
        self.len = 0;
    }
}
