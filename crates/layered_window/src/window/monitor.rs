//! Monitor selection and size resolution

/// Index of the monitor a window should use
///
/// Out of range requests fall back to the primary monitor, index 0.
pub const fn resolve_monitor_index(requested: usize, monitor_count: usize) -> usize {
    if requested < monitor_count {
        requested
    } else {
        0
    }
}

/// Convert a monitor work area `(x, y, width, height)` to a window size
pub fn work_area_size(work_area: (i32, i32, i32, i32)) -> (u32, u32) {
    let (_, _, width, height) = work_area;
    (
        u32::try_from(width).unwrap_or(0),
        u32::try_from(height).unwrap_or(0),
    )
}

/// New size for a resize request, where 0 keeps the current dimension
pub const fn resolve_resize(current: (u32, u32), requested: (u32, u32)) -> (u32, u32) {
    let width = if requested.0 == 0 { current.0 } else { requested.0 };
    let height = if requested.1 == 0 { current.1 } else { requested.1 };
    (width, height)
}
