use crate::ffi::*;

/// Decides whether `fd` lives on hugetlbfs. The probe is advisory:
/// any lookup failure (closed fd, anonymous object, weird mount)
/// classifies as "not hugetlbfs" rather than sinking the mapping.
pub fn on_hugetlbfs(fd: int) -> bool {
    let mut fs: libc::statfs = unsafe { std::mem::zeroed() };
    if unsafe { libc::fstatfs(fd, &mut fs) } != 0 {
        return false;
    }

    fs.f_type as u64 == HUGETLBFS_MAGIC
}

/// Current byte length of the file behind `fd`, if it can be queried
/// at all. `None` disqualifies substitution at the call site.
pub fn file_size(fd: int) -> Option<size_t> {
    let mut st: libc::stat = unsafe { std::mem::zeroed() };
    if unsafe { libc::fstat(fd, &mut st) } != 0 {
        return None;
    }

    Some(st.st_size as size_t)
}
