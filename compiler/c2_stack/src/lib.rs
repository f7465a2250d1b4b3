//! Stack growth guard for recursive walks over type graphs.
//!
//! Pointer and array chains can nest arbitrarily deep (`int*****`), and the
//! printers and queries in `c2_types` recurse once per level. Wrapping each
//! recursive step in [`ensure_sufficient_stack`] keeps those walks from
//! overflowing the native stack.
//!
//! On native targets the stack is grown on demand through `stacker`. On WASM the
//! closure is called directly.

/// Remaining stack below which a new segment is allocated (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
