//! System V shared memory backing.
//!
//! This module provides a handle around the SysV segment that carries the shared
//! record between processes. Independent processes find the same segment through a key
//! derived with `ftok` from a well-known path and a project id, so no handshake is
//! needed. The handle:
//! 1. **Attaches** the segment, optionally creating it, and fails with a `SegmentError`
//!    instead of handing out an invalid mapping.
//! 2. **Accesses** words with volatile loads and stores, since other processes change
//!    them behind the compiler's back.
//! 3. **Detaches** on drop; the segment itself outlives the process unless `remove` is called.

use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr::{self, NonNull};

use crate::common::error::SegmentError;
use crate::config::SharedMemoryConfig;

use super::port::SharedStatePort;
use super::{SHARED_STATE_SIZE, SharedField, SharedState};

/// An attached System V segment holding one `SharedState`.
#[derive(Debug)]
pub struct ShmSegment {
    ptr: NonNull<SharedState>,
    id: i32,
    key: i32,
}

// SAFETY: the mapping stays valid until `Drop`, and every access is a volatile word
// load/store. Concurrent use from several threads is no weaker than the concurrent use
// from several processes that the record is designed for.
unsafe impl Send for ShmSegment {}
unsafe impl Sync for ShmSegment {}

impl ShmSegment {
    /// Derives the rendezvous key for `path` and `project_id`.
    ///
    /// # Returns
    ///
    /// The key, or `SegmentError::Key` if `path` does not exist.
    pub fn key_for(path: &Path, project_id: u8) -> Result<i32, SegmentError> {
        let c_path =
            CString::new(path.as_os_str().as_bytes()).map_err(|_| SegmentError::KeyPath {
                path: path.to_path_buf(),
            })?;
        // SAFETY: `c_path` is a valid NUL-terminated string for the duration of the call.
        let key = unsafe { libc::ftok(c_path.as_ptr(), i32::from(project_id)) };
        if key == -1 {
            return Err(SegmentError::Key {
                path: path.to_path_buf(),
                project_id,
                source: io::Error::last_os_error(),
            });
        }
        Ok(key)
    }

    /// Attaches the segment described by `config`.
    ///
    /// Creates the segment with `config.mode` permissions when `config.create` is set and
    /// it does not exist yet. A newly created segment reads as zero.
    ///
    /// # Arguments
    ///
    /// * `config` - Rendezvous parameters.
    ///
    /// # Returns
    ///
    /// The attached handle, or the step that failed.
    pub fn attach(config: &SharedMemoryConfig) -> Result<Self, SegmentError> {
        let key = Self::key_for(&config.key_path, config.project_id)?;
        let mut flags = (config.mode & 0o777) as libc::c_int;
        if config.create {
            flags |= libc::IPC_CREAT;
        }

        // SAFETY: plain syscall wrapper, no pointers involved.
        let id = unsafe { libc::shmget(key, SHARED_STATE_SIZE, flags) };
        if id == -1 {
            return Err(SegmentError::Create {
                key,
                source: io::Error::last_os_error(),
            });
        }

        // SAFETY: a null address lets the kernel choose the mapping; the result is checked
        // against the documented `(void *) -1` failure value before use.
        let raw = unsafe { libc::shmat(id, ptr::null(), 0) };
        if raw as isize == -1 {
            return Err(SegmentError::Attach {
                id,
                source: io::Error::last_os_error(),
            });
        }
        let ptr = NonNull::new(raw.cast::<SharedState>()).ok_or_else(|| SegmentError::Attach {
            id,
            source: io::Error::from(io::ErrorKind::InvalidData),
        })?;

        tracing::info!(key, id, "attached shared GPIO segment");
        Ok(Self { ptr, id, key })
    }

    /// Returns the kernel's identifier of the segment.
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Returns the rendezvous key the segment was found by.
    pub const fn key(&self) -> i32 {
        self.key
    }

    /// Marks the segment for destruction once every process has detached.
    ///
    /// The device never does this; it is an administrative operation for host tools.
    pub fn remove(&self) -> Result<(), SegmentError> {
        // SAFETY: IPC_RMID ignores the buffer argument.
        let rc = unsafe { libc::shmctl(self.id, libc::IPC_RMID, ptr::null_mut()) };
        if rc == -1 {
            return Err(SegmentError::Remove {
                id: self.id,
                source: io::Error::last_os_error(),
            });
        }
        Ok(())
    }

    fn word(&self, field: SharedField) -> *mut u32 {
        // SAFETY: `SharedState` is `repr(C)` with ten `u32` words and `field.index() < 10`,
        // so the offset stays inside the mapping.
        unsafe { self.ptr.as_ptr().cast::<u32>().add(field.index()) }
    }
}

impl SharedStatePort for ShmSegment {
    fn load(&self, field: SharedField) -> u32 {
        // SAFETY: `word` points into the live, aligned mapping.
        unsafe { ptr::read_volatile(self.word(field)) }
    }

    fn store(&self, field: SharedField, val: u32) {
        // SAFETY: `word` points into the live, aligned mapping.
        unsafe { ptr::write_volatile(self.word(field), val) }
    }
}

impl Drop for ShmSegment {
    /// Detaches the mapping; the segment persists for other processes.
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `shmat` and is detached exactly once.
        let rc = unsafe { libc::shmdt(self.ptr.as_ptr().cast::<libc::c_void>()) };
        if rc == -1 {
            tracing::warn!(id = self.id, "failed to detach shared GPIO segment");
        }
    }
}
