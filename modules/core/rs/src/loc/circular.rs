//! Coordinate arithmetic on a circular genome of `len` positions, where position `len - 1` is
//! followed by position 0. All functions return `None` for an empty genome, which has no valid
//! positions at all.

/// Normalize an arbitrary signed position into `[0, len)`.
#[inline]
pub fn wrap(pos: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((pos as i128).rem_euclid(len as i128) as usize)
}

/// Position reached by moving `offset` positions away from `pos`, wrapping around the genome
/// boundary in both directions.
#[inline]
pub fn offset(pos: usize, offset: i64, len: usize) -> Option<usize> {
    let shift = wrap(offset, len)?;
    let pos = pos % len;
    // pos and shift are both below len, the sum can't wrap more than once.
    Some(match pos.checked_add(shift) {
        Some(sum) if sum < len => sum,
        Some(sum) => sum - len,
        None => shift - (len - pos),
    })
}
