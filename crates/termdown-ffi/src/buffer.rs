//! Strings handed across the C boundary

use std::ffi::{c_char, CStr, CString, NulError};

#[cfg(test)]
thread_local! {
    static LIVE: std::cell::Cell<isize> = const { std::cell::Cell::new(0) };
}

#[cfg(test)]
fn track(delta: isize) {
    LIVE.with(|live| live.set(live.get() + delta));
}

#[cfg(not(test))]
fn track(_delta: isize) {}

/// Strings allocated on this thread and not yet freed, wherever they are
#[cfg(test)]
pub(crate) fn live_allocations() -> isize {
    LIVE.with(|live| live.get())
}

/// A NUL-terminated string owned by this library.
///
/// Dropping it frees the string. [`OwnedCString::into_raw`] hands ownership
/// to C; the pointer comes back through [`OwnedCString::from_raw`] to be
/// freed.
#[derive(Debug)]
pub struct OwnedCString {
    inner: Option<CString>,
}

impl OwnedCString {
    pub fn new(text: impl Into<Vec<u8>>) -> Result<Self, NulError> {
        let inner = CString::new(text)?;
        track(1);
        Ok(Self { inner: Some(inner) })
    }

    pub fn empty() -> Self {
        track(1);
        Self {
            inner: Some(CString::default()),
        }
    }

    pub fn as_c_str(&self) -> &CStr {
        self.inner.as_deref().unwrap_or_default()
    }

    /// Release ownership to the caller. The pointer is never null and must be
    /// passed to [`OwnedCString::from_raw`] exactly once.
    pub fn into_raw(mut self) -> *mut c_char {
        self.inner.take().unwrap_or_default().into_raw()
    }

    /// Take back a pointer returned by [`OwnedCString::into_raw`]. Null gives
    /// `None`.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or come from [`OwnedCString::into_raw`] and not have
    /// been reclaimed before.
    pub unsafe fn from_raw(ptr: *mut c_char) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }
        Some(Self {
            inner: Some(CString::from_raw(ptr)),
        })
    }
}

impl Drop for OwnedCString {
    fn drop(&mut self) {
        if self.inner.take().is_some() {
            track(-1);
        }
    }
}
