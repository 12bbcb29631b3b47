use crate::ffi::void;
use crate::real;
use crate::registry;

// A preloaded library has no `main` to hang setup on; the run-once
// attach/detach pair lives in the ELF init/fini arrays instead, like
// a C interposer's constructor and destructor.

unsafe extern "C" fn attach() {
    // Fail fast: a process that cannot delegate must not limp along
    // until the first intercepted call.
    real::primitives();
    eprintln!("hpmmap shim loaded (pid {})", std::process::id());
}

unsafe extern "C" fn detach() {
    // Whatever the application never unmapped goes away with us, so
    // exit-time leak checkers have nothing to point at.
    registry::drain_with(|addr, len| unsafe {
        real::true_munmap(addr as *mut void, len);
    });
}

#[used]
#[link_section = ".init_array"]
static ATTACH: unsafe extern "C" fn() = attach;

#[used]
#[link_section = ".fini_array"]
static DETACH: unsafe extern "C" fn() = detach;
