//! Registry entries and the frontier ordering key.

/// Arena index of a [`SearchEntry`] in the frontier registry.
///
/// Ids are assigned in discovery order starting at 0 (the start node), so
/// they double as a deterministic discovery counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    /// Discovery index of this entry.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0 as u64
    }
}

/// Where an entry sits in the driver's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPhase {
    /// Queued at its best-known cost, termination not yet checked at that
    /// cost. New discoveries and relaxations land here.
    Pending,
    /// Checked and expanding: holds a live cursor and is queued keyed by a
    /// lower bound on its next candidate's cost.
    Open,
    /// Cursor exhausted. Kept for relaxation bookkeeping and paths.
    Retired,
    /// Accepted as a solution; not expanded further.
    Settled,
}

impl EntryPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Open => "open",
            Self::Retired => "retired",
            Self::Settled => "settled",
        }
    }
}

/// One discovered node: `(node, best_cost, cursor, parent)` plus bookkeeping.
///
/// Owned by the [`crate::FrontierManager`]. Parents are stored as arena ids,
/// never as references, so the parent tree has no ownership cycles.
#[derive(Debug)]
pub struct SearchEntry<N, C, K> {
    pub(crate) node: N,
    pub(crate) best_cost: C,
    pub(crate) parent: Option<EntryId>,
    pub(crate) cursor: Option<K>,
    pub(crate) phase: EntryPhase,
    /// Bumped whenever the entry is re-queued, relaxed or retired. A queue
    /// item is live only while its epoch matches.
    pub(crate) epoch: u64,
    /// Number of times this entry has been popped live.
    pub(crate) pops: u64,
    /// Number of pulls made against this entry's cursors.
    pub(crate) pulls: u64,
}

impl<N, C, K> SearchEntry<N, C, K> {
    pub(crate) fn new(node: N, best_cost: C, parent: Option<EntryId>) -> Self {
        Self {
            node,
            best_cost,
            parent,
            cursor: None,
            phase: EntryPhase::Pending,
            epoch: 0,
            pops: 0,
            pulls: 0,
        }
    }

    #[must_use]
    pub fn node(&self) -> &N {
        &self.node
    }

    #[must_use]
    pub fn best_cost(&self) -> &C {
        &self.best_cost
    }

    #[must_use]
    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    #[must_use]
    pub fn phase(&self) -> EntryPhase {
        self.phase
    }

    /// Whether a cursor is currently held.
    #[must_use]
    pub fn has_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    #[must_use]
    pub fn pops(&self) -> u64 {
        self.pops
    }

    #[must_use]
    pub fn pulls(&self) -> u64 {
        self.pulls
    }
}

/// A queue item: `(key, seq)` ordering with the target entry and epoch.
///
/// Lower `key` first, then older `seq` (FIFO among equal keys). `seq` is
/// unique per push, so the order is total and reproducible.
#[derive(Debug, Clone)]
pub(crate) struct QueueItem<C> {
    pub(crate) key: C,
    pub(crate) seq: u64,
    pub(crate) id: EntryId,
    pub(crate) epoch: u64,
}

impl<C: Ord> PartialEq for QueueItem<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl<C: Ord> Eq for QueueItem<C> {}

impl<C: Ord> PartialOrd for QueueItem<C> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for QueueItem<C> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key).then(self.seq.cmp(&other.seq))
    }
}
