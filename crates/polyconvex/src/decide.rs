//! The convexity rule shared by the serial and parallel verifiers.

/// `true` iff every flag has the same polarity (or there are none).
///
/// Order-independent: only the presence of each polarity matters, so the
/// parallel path may feed flags in any merge order.
#[inline]
pub fn decide(flags: &[bool]) -> bool {
    flags.iter().all(|&f| f) || !flags.iter().any(|&f| f)
}
