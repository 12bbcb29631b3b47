use crate::ffi::*;
use crate::real;
use crate::registry;
use std::io;

/// Copy granularity. Bounds transient read sizes; also the reason the
/// per-GiB progress lines land on even boundaries.
const CHUNK_BYTES: size_t = 64 * 1024 * 1024;
const GIB: size_t = 1024 * 1024 * 1024;

pub fn gib(n: size_t) -> f64 {
    n as f64 / GIB as f64
}

/// Stands a populated anonymous region in for a whole-file mapping of
/// `fd`. Preconditions (hugetlbfs descriptor, offset zero, length equal
/// to the file size) are the caller's business. Returns the region's
/// address, or `MAP_FAILED` with nothing allocated and nothing tracked,
/// so the result can be relayed as if it came from the native primitive.
pub unsafe fn substitute(length: size_t, prot: int, fd: int) -> *mut void {
    eprintln!("hpmmap: intercepting hugetlbfs mmap of a {:.2} GiB file", gib(length));

    let mut region = real::true_mmap(
        std::ptr::null_mut(),
        length,
        libc::PROT_READ | libc::PROT_WRITE,
        libc::MAP_PRIVATE | libc::MAP_ANONYMOUS | libc::MAP_HUGETLB,
        -1,
        0,
    );
    if region == libc::MAP_FAILED {
        eprintln!("hpmmap: MAP_HUGETLB refused, retrying with plain anonymous pages");
        region = real::true_mmap(
            std::ptr::null_mut(),
            length,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
            -1,
            0,
        );
        if region == libc::MAP_FAILED {
            eprintln!("hpmmap: anonymous mmap failed: {}", io::Error::last_os_error());
            return libc::MAP_FAILED;
        }
    } else {
        eprintln!("hpmmap: {:.2} GiB allocated with MAP_HUGETLB", gib(length));
    }

    if libc::lseek(fd, 0, libc::SEEK_SET) != 0 {
        eprintln!("hpmmap: seek to file start failed: {}", io::Error::last_os_error());
        real::true_munmap(region, length);
        return libc::MAP_FAILED;
    }

    if let Err(e) = populate(fd, region as *mut u8, length) {
        eprintln!("hpmmap: populating region failed: {}", e);
        real::true_munmap(region, length);
        return libc::MAP_FAILED;
    }

    if prot & libc::PROT_WRITE == 0 {
        // The copy needed a writable region; narrow it back to what
        // the caller asked for. On failure the region is merely
        // over-permissioned, so the operation still succeeds.
        if libc::mprotect(region, length, prot) != 0 {
            eprintln!("hpmmap: mprotect fix-up failed: {}", io::Error::last_os_error());
        }
    }

    registry::track(region as usize, length);
    eprintln!("hpmmap: {:.2} GiB now resident in anonymous memory", gib(length));

    region
}

/// Reads exactly `length` bytes from `fd`'s current position into
/// `dest`. Short positive reads are resumed with the remaining count;
/// a zero read before `length` is a premature end of file.
pub unsafe fn populate(fd: int, dest: *mut u8, length: size_t) -> io::Result<()> {
    let mut copied: size_t = 0;
    while copied < length {
        let want = CHUNK_BYTES.min(length - copied);
        let got = libc::read(fd, dest.add(copied) as *mut void, want);
        if got < 0 {
            return Err(io::Error::last_os_error());
        }
        if got == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("end of file after {} of {} bytes", copied, length),
            ));
        }
        copied += got as size_t;
        if copied % GIB == 0 && copied < length {
            eprintln!("hpmmap: ... {:.1} / {:.1} GiB", gib(copied), gib(length));
        }
    }

    Ok(())
}
