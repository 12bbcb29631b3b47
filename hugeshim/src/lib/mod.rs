#[allow(non_camel_case_types)]
/// Crate is targeting Linux user-space processes which
/// `mmap` model files living on hugetlbfs. We're doing it via
/// [*function interposition*](https://stackoverflow.com/questions/426230/what-is-the-ld-preload-trick).
/// We thus need the signatures of the interposed pair, plus some
/// assistant type aliases (e.g. `void` instead of `c_void`) and
/// allocation-free C-string helpers for `dlsym`.
///
/// Public for integration test access; not a stable API.
pub mod ffi;

/// Resolves the real `mmap`/`munmap` living below us in symbol
/// resolution order. Exactly once, never again.
mod real;

/// hugetlbfs membership probe and file size query.
pub mod fsprobe;

/// Book-keeping of synthesized regions: base address to true length.
pub mod registry;

/// Builds the anonymous huge-page stand-in region and populates it
/// from the original file.
pub mod synth;

/// Contains actual interposing code.
pub mod core;

/// Load/unload hooks wired into the ELF init/fini arrays.
mod hooks;
