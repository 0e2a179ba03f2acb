//! Model handles and cache keys.

use std::fmt;

/// Index into a [`ModelGraph`](crate::ModelGraph).
///
/// Two observations of the same code site or the same builtin resolve to
/// the same `ModelId`; generation relies on that to share nodes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ModelId(u32);

impl ModelId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelId({})", self.0)
    }
}

/// Code-site key: the start offset of the allocation site in the traced
/// source. Object, array, and function models are cached per site.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SiteKey(pub u32);

impl SiteKey {
    /// Key for a tracer-reported start offset. The tracer reports `-1` for
    /// synthetic positions, which get no key (and so no caching).
    pub fn from_offset(offset: i64) -> Option<Self> {
        u32::try_from(offset).ok().map(SiteKey)
    }
}
