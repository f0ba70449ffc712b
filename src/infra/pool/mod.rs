//! Fixed-capacity message pool shared by interrupt handlers and tasks.
//!
//! Slots are claimed with a linear scan of the used flags and handed out as
//! [`SlotRef`] tokens. A token is not `Clone`: whoever holds it owns the slot
//! until it is given back with [`MessagePool::release`].
//!
//! Every token is stamped with the address of the pool that minted it, and a
//! pool ignores tokens carrying another stamp. A pool must therefore stay in
//! place (typically a `static`) while any of its slots is claimed.
use core::cell::RefCell;

use critical_section::Mutex;

use crate::protocol::transport::can_frame::CanFrame;

//==================================================================================SLOT_REF
/// Exclusive reference to one pool slot.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotRef {
    owner: usize,
    index: u8,
}

impl SlotRef {
    /// Only the pool (and the queue timeout path) may mint references.
    pub(crate) const fn new(owner: usize, index: u8) -> Self {
        Self { owner, index }
    }

    /// Position of the slot inside its pool.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Stamp of the pool that handed the slot out.
    pub(crate) fn owner(&self) -> usize {
        self.owner
    }
}

//==================================================================================POOL
#[derive(Debug, Clone, Copy)]
struct PoolSlot {
    used: bool,
    frame: CanFrame,
}

impl PoolSlot {
    const FREE: PoolSlot = PoolSlot {
        used: false,
        frame: CanFrame::EMPTY,
    };
}

/// Static arena of `N` message slots (`N` ≤ 256).
#[derive(Debug)]
pub struct MessagePool<const N: usize> {
    slots: Mutex<RefCell<[PoolSlot; N]>>,
}

impl<const N: usize> Default for MessagePool<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MessagePool<N> {
    /// Create a pool with every slot free.
    pub const fn new() -> Self {
        assert!(N <= 256, "slot indices are stored in a u8");
        Self {
            slots: Mutex::new(RefCell::new([PoolSlot::FREE; N])),
        }
    }

    /// Number of slots in the pool.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Stamp carried by every reference this pool hands out.
    pub(crate) fn id(&self) -> usize {
        self as *const Self as usize
    }

    fn owns(&self, slot: &SlotRef) -> bool {
        slot.owner == self.id()
    }

    /// Claim the first free slot, or `None` when the pool is exhausted.
    pub fn allocate(&self) -> Option<SlotRef> {
        let id = self.id();
        critical_section::with(|cs| {
            let mut slots = self.slots.borrow_ref_mut(cs);
            for (i, slot) in slots.iter_mut().enumerate() {
                if !slot.used {
                    slot.used = true;
                    return Some(SlotRef::new(id, i as u8));
                }
            }
            None
        })
    }

    /// Claim a slot and fill it with `frame` in the same critical section.
    pub fn allocate_with(&self, frame: &CanFrame) -> Option<SlotRef> {
        let id = self.id();
        critical_section::with(|cs| {
            let mut slots = self.slots.borrow_ref_mut(cs);
            for (i, slot) in slots.iter_mut().enumerate() {
                if !slot.used {
                    slot.used = true;
                    slot.frame = *frame;
                    return Some(SlotRef::new(id, i as u8));
                }
            }
            None
        })
    }

    /// Give a slot back. References minted by another pool or pointing
    /// outside this one are ignored.
    pub fn release(&self, slot: SlotRef) {
        if !self.owns(&slot) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Release of foreign slot {} ignored", slot.index());
            return;
        }
        critical_section::with(|cs| {
            match self.slots.borrow_ref_mut(cs).get_mut(slot.index()) {
                Some(entry) => entry.used = false,
                None => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Release of out-of-range slot {} ignored", slot.index());
                }
            }
        })
    }

    /// Store `frame` in the slot. Foreign references are ignored.
    pub fn write(&self, slot: &SlotRef, frame: &CanFrame) {
        if !self.owns(slot) {
            return;
        }
        critical_section::with(|cs| {
            if let Some(entry) = self.slots.borrow_ref_mut(cs).get_mut(slot.index()) {
                entry.frame = *frame;
            }
        })
    }

    /// Copy the frame out of the slot. Foreign references read as an empty frame.
    pub fn read(&self, slot: &SlotRef) -> CanFrame {
        if !self.owns(slot) {
            return CanFrame::EMPTY;
        }
        critical_section::with(|cs| {
            self.slots
                .borrow_ref(cs)
                .get(slot.index())
                .map(|entry| entry.frame)
                .unwrap_or(CanFrame::EMPTY)
        })
    }

    /// Copy the frame out and release the slot.
    pub fn take(&self, slot: SlotRef) -> CanFrame {
        let frame = self.read(&slot);
        self.release(slot);
        frame
    }

    /// Number of slots currently claimed.
    pub fn in_use(&self) -> usize {
        critical_section::with(|cs| {
            self.slots
                .borrow_ref(cs)
                .iter()
                .filter(|slot| slot.used)
                .count()
        })
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
