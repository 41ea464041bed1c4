/// Previous entry of a cyclic list such as the category toggles.
pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Moves `index` by `delta` rows without leaving `0..len`.
pub const fn step_clamped(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    let moved = index.saturating_add_signed(delta);
    if moved >= len {
        len - 1
    } else {
        moved
    }
}
