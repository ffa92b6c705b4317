use mockall::mock;
use pibridge_core::common::pin::PinIndex;
use pibridge_core::shared::{SharedField, SharedState, SharedStatePort};
use std::sync::{Arc, Mutex};

mock! {
    pub SharedPort {}
    impl SharedStatePort for SharedPort {
        fn load(&self, field: SharedField) -> u32;
        fn store(&self, field: SharedField, val: u32);
        fn push(&self, fsel: &[u32; 6], outstate: &[u32; 2]);
        fn pull_levels(&self) -> [u32; 2];
        fn drive_level(&self, pin: PinIndex, high: bool);
        fn snapshot(&self) -> SharedState;
    }
}

/// A shareable wrapper around the mock port.
///
/// The bridge takes ownership of a boxed port; tests keep a clone to add
/// expectations or call `checkpoint` afterwards.
#[derive(Clone)]
pub struct SyncSharedPort {
    pub mock: Arc<Mutex<MockSharedPort>>,
}

impl SyncSharedPort {
    pub fn new(mock: MockSharedPort) -> Self {
        Self {
            mock: Arc::new(Mutex::new(mock)),
        }
    }

    /// Verifies and clears every expectation set so far.
    pub fn checkpoint(&self) {
        self.mock.lock().unwrap().checkpoint();
    }
}

unsafe impl Send for SyncSharedPort {}
unsafe impl Sync for SyncSharedPort {}

impl SharedStatePort for SyncSharedPort {
    fn load(&self, field: SharedField) -> u32 {
        self.mock.lock().unwrap().load(field)
    }

    fn store(&self, field: SharedField, val: u32) {
        self.mock.lock().unwrap().store(field, val)
    }

    fn push(&self, fsel: &[u32; 6], outstate: &[u32; 2]) {
        self.mock.lock().unwrap().push(fsel, outstate)
    }

    fn pull_levels(&self) -> [u32; 2] {
        self.mock.lock().unwrap().pull_levels()
    }

    fn drive_level(&self, pin: PinIndex, high: bool) {
        self.mock.lock().unwrap().drive_level(pin, high)
    }

    fn snapshot(&self) -> SharedState {
        self.mock.lock().unwrap().snapshot()
    }
}
