//! Shared state port.
//!
//! `SharedStatePort` is the only way the device touches the shared record. Backings
//! implement word-level `load`/`store`; `push`, `pull_levels` and `snapshot` are built on
//! those and perform no locking, so concurrent readers may see a push half-applied.
//! A backing that wants stronger guarantees (a version word, a seqlock) overrides the
//! provided methods without any change to the device.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::common::constants::{NUM_BANKS, NUM_FSEL};
use crate::common::pin::PinIndex;

use super::{SHARED_WORDS, SharedField, SharedState};

/// Word-level access to the shared record.
pub trait SharedStatePort: Send + Sync {
    /// Reads one word of the record.
    fn load(&self, field: SharedField) -> u32;

    /// Writes one word of the record.
    fn store(&self, field: SharedField, val: u32);

    /// Publishes the function-select words and the derived output state.
    ///
    /// Eight sequential stores; the level words are never written.
    fn push(&self, fsel: &[u32; NUM_FSEL], outstate: &[u32; NUM_BANKS]) {
        for (field, val) in SharedField::FSEL.iter().zip(fsel) {
            self.store(*field, *val);
        }
        for (field, val) in SharedField::OUTSTATE.iter().zip(outstate) {
            self.store(*field, *val);
        }
    }

    /// Reads the externally driven level words.
    fn pull_levels(&self) -> [u32; NUM_BANKS] {
        [
            self.load(SharedField::Level0),
            self.load(SharedField::Level1),
        ]
    }

    /// Sets or clears the level bit of `pin`, as a button front-end does.
    ///
    /// A plain read-modify-write of one level word; a concurrent push cannot clobber it
    /// (pushes never store levels) but a second injector can.
    fn drive_level(&self, pin: PinIndex, high: bool) {
        let field = SharedField::LEVEL[pin.bank()];
        let word = self.load(field);
        let word = if high { word | pin.mask() } else { word & !pin.mask() };
        self.store(field, word);
    }

    /// Copies the whole record word by word.
    fn snapshot(&self) -> SharedState {
        let mut words = [0u32; SHARED_WORDS];
        for field in SharedField::ALL {
            words[field.index()] = self.load(field);
        }
        SharedState {
            fsel: [words[0], words[1], words[2], words[3], words[4], words[5]],
            level: [words[6], words[7]],
            outstate: [words[8], words[9]],
        }
    }
}

/// An in-process shared record.
///
/// Clones share the same words, so one clone can play the device and another an
/// external front-end. Accesses are relaxed atomics: individually untorn, collectively
/// as unsynchronized as the System V backing.
#[derive(Clone, Debug, Default)]
pub struct LocalSegment {
    words: Arc<[AtomicU32; SHARED_WORDS]>,
}

impl LocalSegment {
    /// Creates a zeroed record.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SharedStatePort for LocalSegment {
    fn load(&self, field: SharedField) -> u32 {
        self.words[field.index()].load(Ordering::Relaxed)
    }

    fn store(&self, field: SharedField, val: u32) {
        self.words[field.index()].store(val, Ordering::Relaxed);
    }
}
