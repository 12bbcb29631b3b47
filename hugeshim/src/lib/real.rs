use crate::ffi::*;
use crate::make_cstring;
use std::ptr::addr_of;
use std::sync::{Mutex, TryLockError};

/// The pair of primitives found below us in symbol resolution order.
/// Once published it is never reassigned: every interposed call is a
/// delegation to these two, so losing them has no safe degraded mode.
#[derive(Clone, Copy)]
pub struct PrimitivePair {
    pub mmap:   CMmap,
    pub munmap: CMunmap,
}

// Only one thread is allowed to run `dlsym`; the pair is fetched once.
static INIT_LOCK: Mutex<()> = Mutex::new(());
static mut PAIR: Option<PrimitivePair> = None;

pub unsafe fn primitives() -> PrimitivePair {
    match *addr_of!(PAIR) {
        Some(pair)  => {
            // Happy path: pair already resolved.
            pair
        },
        None    => {
            match INIT_LOCK.try_lock() {
                Ok(_)   => {
                    // `dlsym` is thread-safe!
                    // [source: https://man7.org/linux/man-pages/man3/dlsym.3.html#ATTRIBUTES]
                    let mmap_addr = dlsym(RTLD_NEXT, make_cstring!("mmap").as_ptr());
                    check_dlerror();
                    let munmap_addr = dlsym(RTLD_NEXT, make_cstring!("munmap").as_ptr());
                    check_dlerror();
                    if mmap_addr.is_null() || munmap_addr.is_null() {
                        graceful_exit("hpmmap: no real mmap/munmap below this layer.");
                    }
                    let pair = PrimitivePair {
                        mmap:   std::mem::transmute::<*const (), CMmap>(mmap_addr as *const ()),
                        munmap: std::mem::transmute::<*const (), CMunmap>(munmap_addr as *const ()),
                    };
                    PAIR = Some(pair);

                    pair
                },
                Err(e)  => {
                    match e {
                        TryLockError::Poisoned(_)   => {
                            // Do not tolerate poisoned threads.
                            graceful_exit("hpmmap: poisoned mutex upon primitive resolution.");
                        },
                        TryLockError::WouldBlock    => {
                            // Edge case: thread asks for the pair while another
                            // thread has already started resolving it.
                            while let None = *addr_of!(PAIR) {/* Wait until resolution is complete. */};
                            (*addr_of!(PAIR)).unwrap()
                        }
                    }
                }
            }
        }
    }
}

pub unsafe fn true_mmap(
    addr:   *mut void,
    length: size_t,
    prot:   int,
    flags:  int,
    fd:     int,
    offset: off_t,
) -> *mut void {
    (primitives().mmap)(addr, length, prot, flags, fd, offset)
}

pub unsafe fn true_munmap(addr: *mut void, length: size_t) -> int {
    (primitives().munmap)(addr, length)
}
