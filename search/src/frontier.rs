//! Frontier manager: node registry, resumable cursors and a lazily-deleted
//! priority queue.
//!
//! `BinaryHeap` has no decrease-key. Re-queueing pushes a fresh item and bumps
//! the entry's epoch; older items for the same entry become stale and are
//! dropped when they surface at the top of the heap.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use crate::contract::{NeighborCursor, Pull};
use crate::node::{EntryId, EntryPhase, QueueItem, SearchEntry};
use crate::policy::DedupPolicy;

/// What [`FrontierManager::discover`] did with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    /// First sighting; a new entry was created and queued.
    Created(EntryId),
    /// Strictly cheaper than the known cost; the entry was updated and
    /// re-queued. `reopened` is set when the entry had already been checked
    /// (open, retired or settled) and goes back to pending.
    Relaxed { id: EntryId, reopened: bool },
    /// Not an improvement; nothing changed.
    Pruned(EntryId),
}

impl Discovery {
    /// The entry the candidate was matched to.
    #[must_use]
    pub fn id(self) -> EntryId {
        match self {
            Self::Created(id) | Self::Relaxed { id, .. } | Self::Pruned(id) => id,
        }
    }
}

/// Registry of [`SearchEntry`] values plus the ordering over open ones.
///
/// Maintains:
/// - an arena `Vec<SearchEntry>` indexed by [`EntryId`] (discovery order)
/// - a `HashMap<N, EntryId>` index (absent under [`DedupPolicy::Off`])
/// - a `BinaryHeap` of `Reverse<QueueItem>` for O(log n) pop of the best item
pub struct FrontierManager<N, C, K> {
    entries: Vec<SearchEntry<N, C, K>>,
    index: Option<HashMap<N, EntryId>>,
    heap: BinaryHeap<Reverse<QueueItem<C>>>,
    next_seq: u64,
    high_water: u64,
    stale_pops: u64,
}

impl<N, C, K> FrontierManager<N, C, K>
where
    N: Clone + Eq + Hash,
    C: Clone + Ord,
{
    /// Create an empty frontier.
    #[must_use]
    pub fn new(dedup: DedupPolicy) -> Self {
        let index = match dedup {
            DedupPolicy::BestKnownCost => Some(HashMap::new()),
            DedupPolicy::Off => None,
        };
        Self {
            entries: Vec::new(),
            index,
            heap: BinaryHeap::new(),
            next_seq: 0,
            high_water: 0,
            stale_pops: 0,
        }
    }

    /// Offer `node` at `cost` reached from `parent`.
    ///
    /// Unseen nodes get a new pending entry. A seen node is relaxed only when
    /// `cost` is strictly lower than its best-known cost; equal or higher
    /// costs are pruned so redundant paths never grow the queue.
    pub fn discover(&mut self, node: N, cost: C, parent: Option<EntryId>) -> Discovery {
        let existing = self.index.as_ref().and_then(|index| index.get(&node).copied());

        let Some(id) = existing else {
            let id = EntryId(self.entries.len());
            if let Some(index) = self.index.as_mut() {
                index.insert(node.clone(), id);
            }
            self.entries.push(SearchEntry::new(node, cost.clone(), parent));
            self.push(id, cost);
            return Discovery::Created(id);
        };

        let entry = &mut self.entries[id.index()];
        if cost >= entry.best_cost {
            return Discovery::Pruned(id);
        }

        let reopened = entry.phase != EntryPhase::Pending;
        entry.best_cost = cost.clone();
        entry.parent = parent;
        entry.phase = EntryPhase::Pending;
        // A cursor opened at the old cost produced candidates priced from
        // that cost; the next expansion starts a fresh one.
        entry.cursor = None;
        entry.epoch += 1;
        self.push(id, cost);
        Discovery::Relaxed { id, reopened }
    }

    /// Pop the live item with the lowest key, skipping stale ones.
    ///
    /// Returns `None` once nothing open remains (the search is exhausted).
    pub fn pop_best(&mut self) -> Option<EntryId> {
        while let Some(Reverse(item)) = self.heap.pop() {
            let entry = &mut self.entries[item.id.index()];
            let live = item.epoch == entry.epoch
                && matches!(entry.phase, EntryPhase::Pending | EntryPhase::Open);
            if !live {
                self.stale_pops += 1;
                continue;
            }
            entry.pops += 1;
            return Some(item.id);
        }
        None
    }

    /// Install a fresh cursor on a checked entry and mark it open.
    ///
    /// The entry is not queued here; the driver pulls from it in the same
    /// step and re-queues it with the resulting bound.
    pub fn open_cursor(&mut self, id: EntryId, cursor: K) {
        let entry = &mut self.entries[id.index()];
        entry.cursor = Some(cursor);
        entry.phase = EntryPhase::Open;
    }

    /// Pull the next candidate from an entry's cursor.
    ///
    /// On `Pull::Done` (or if the entry holds no cursor) the entry is retired:
    /// its cursor is dropped and it leaves the open set, but stays in the
    /// registry for relaxation and path reconstruction.
    ///
    /// # Errors
    ///
    /// Propagates the cursor's fault unchanged. The entry is left as it was.
    pub fn advance_cursor<E>(&mut self, id: EntryId) -> Result<Pull<N, C>, E>
    where
        K: NeighborCursor<N, C, Error = E>,
    {
        let entry = &mut self.entries[id.index()];
        let pulled = match entry.cursor.as_mut() {
            Some(cursor) => {
                entry.pulls += 1;
                cursor.pull()?
            }
            None => Pull::Done,
        };
        if pulled.is_done() {
            self.retire(id);
        }
        Ok(pulled)
    }

    /// Queue an open entry again, keyed by `key`.
    ///
    /// Any item already queued for the entry becomes stale.
    pub fn requeue(&mut self, id: EntryId, key: C) {
        let entry = &mut self.entries[id.index()];
        entry.epoch += 1;
        self.push(id, key);
    }

    /// Mark an entry as an accepted solution. It is never expanded, though
    /// a strictly cheaper discovery would still reopen it.
    pub fn settle(&mut self, id: EntryId) {
        let entry = &mut self.entries[id.index()];
        entry.phase = EntryPhase::Settled;
        entry.cursor = None;
        entry.epoch += 1;
    }

    fn retire(&mut self, id: EntryId) {
        let entry = &mut self.entries[id.index()];
        entry.phase = EntryPhase::Retired;
        entry.cursor = None;
        entry.epoch += 1;
    }

    fn push(&mut self, id: EntryId, key: C) {
        let epoch = self.entries[id.index()].epoch;
        self.heap.push(Reverse(QueueItem {
            key,
            seq: self.next_seq,
            id,
            epoch,
        }));
        self.next_seq += 1;
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Borrow an entry.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this frontier.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> &SearchEntry<N, C, K> {
        &self.entries[id.index()]
    }

    /// Entry currently registered for `node`. Always `None` under
    /// [`DedupPolicy::Off`].
    #[must_use]
    pub fn lookup(&self, node: &N) -> Option<EntryId> {
        self.index.as_ref().and_then(|index| index.get(node).copied())
    }

    /// All entries in discovery order.
    pub fn entries(&self) -> impl Iterator<Item = (EntryId, &SearchEntry<N, C, K>)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (EntryId(i), entry))
    }

    /// Nodes from the root of `id`'s parent chain down to `id`.
    #[must_use]
    pub fn path_to(&self, id: EntryId) -> Vec<N> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(at) = current {
            let entry = &self.entries[at.index()];
            path.push(entry.node.clone());
            current = entry.parent;
        }
        path.reverse();
        path
    }

    /// Queue length, stale items included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue holds no items at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of distinct entries ever discovered.
    #[must_use]
    pub fn registry_len(&self) -> usize {
        self.entries.len()
    }

    /// High-water mark of queue length.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Items discarded by lazy deletion so far.
    #[must_use]
    pub fn stale_pops(&self) -> u64 {
        self.stale_pops
    }
}
