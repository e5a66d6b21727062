use std::collections::HashSet;

/// Member sets of one district that were already explored and failed.
///
/// Keys are order-independent: the same set of units reached through a different
/// insertion order is the same configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct AttemptMemo {
    seen: HashSet<Box<[u32]>, ahash::RandomState>,
}

impl AttemptMemo {
    fn key(members: &[usize]) -> Box<[u32]> {
        let mut key = members.iter().map(|&m| m as u32).collect::<Box<[u32]>>();
        key.sort_unstable();
        key
    }

    /// Record `members` as attempted. Returns false if it was already present.
    pub(crate) fn insert(&mut self, members: &[usize]) -> bool {
        self.seen.insert(Self::key(members))
    }

    pub(crate) fn contains(&self, members: &[usize]) -> bool {
        self.seen.contains(&Self::key(members))
    }

    pub(crate) fn clear(&mut self) { self.seen.clear() }

    #[inline] pub(crate) fn len(&self) -> usize { self.seen.len() }
}
