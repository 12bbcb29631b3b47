use crate::ffi::*;
use crate::fsprobe;
use crate::real;
use crate::registry;
use crate::synth;

#[no_mangle]
/// Function interposition is used to shadow the C library's `mmap`.
///
/// Whole-file mappings of hugetlbfs descriptors get a synthesized
/// anonymous huge-page region instead, populated from the file.
/// Everything else (anonymous requests, ordinary filesystems, partial
/// views) falls through to the real primitive with the caller's
/// arguments untouched, so the caller cannot tell us apart from the
/// native facility.
pub unsafe extern "C" fn mmap(
    addr:   *mut void,
    length: size_t,
    prot:   int,
    flags:  int,
    fd:     int,
    offset: off_t,
) -> *mut void {
    if fd >= 0 && fsprobe::on_hugetlbfs(fd) {
        match fsprobe::file_size(fd) {
            None    => {
                eprintln!("hpmmap: cannot size fd {}, leaving its mapping untouched", fd);
            },
            Some(file_len)  => {
                // Only the whole-file-from-zero shape is substituted.
                // The same `length` drives the copy and the registry
                // record, with no recomputation.
                if offset == 0 && length == file_len {
                    return synth::substitute(length, prot, fd);
                }
            }
        }
    }

    real::true_mmap(addr, length, prot, flags, fd, offset)
}

#[no_mangle]
/// Deallocation first consults the region book. For a synthesized
/// region the recorded length is released, whatever length the caller
/// supplied; any other address passes through unchanged.
pub unsafe extern "C" fn munmap(addr: *mut void, length: size_t) -> int {
    match registry::untrack(addr as usize) {
        Some(true_len)  => {
            eprintln!("hpmmap: releasing {:.2} GiB synthesized region", synth::gib(true_len));
            real::true_munmap(addr, true_len)
        },
        None    => {
            real::true_munmap(addr, length)
        }
    }
}
