//! Peer map reconciliation.
//!
//! The server sends either a full peer snapshot or a delta against what
//! the client already holds. [`Reconciler::reconcile`] merges one update
//! into the previous peer set and returns the new authoritative set. It is
//! total: malformed or stale references in delta fields (ids the client
//! has already pruned) are benign no-ops, never errors, since transient
//! client/server skew is expected in an eventually-consistent protocol.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use wiremesh_core::{Clock, MapUpdate, Node, NodeId, PeerSet, SystemClock};

/// Merges server map updates into the client's peer set.
///
/// Stateless apart from its time source, which stamps `last_seen` on
/// seen-change entries. Safe to call from any thread.
pub struct Reconciler {
    clock: Arc<dyn Clock>,
}

impl Reconciler {
    /// Reconciler using the real system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Reconciler with an explicit time source (useful for testing)
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Merge `update` into `prev`, returning the new peer set.
    ///
    /// `prev` is not modified; the result is a fresh set, sorted ascending
    /// by id with no duplicates. A full snapshot in `update` wins outright
    /// and any delta fields alongside it are ignored.
    #[must_use]
    pub fn reconcile(&self, update: &MapUpdate, prev: &[Node]) -> PeerSet {
        if let Some(peers) = &update.peers {
            debug!(peers = peers.len(), "full peer snapshot");
            let mut full = peers.clone();
            full.sort_by_key(|n| n.id);
            return full;
        }

        let mut working: BTreeMap<NodeId, Node> =
            prev.iter().map(|n| (n.id, n.clone())).collect();

        // Upserts replace the whole node; no field-level merge.
        for node in &update.peers_changed {
            working.insert(node.id, node.clone());
        }

        // Removals run after upserts, so an id in both lists ends up gone.
        for id in &update.peers_removed {
            working.remove(id);
        }

        for (id, online) in &update.online_change {
            if let Some(node) = working.get_mut(id) {
                node.online = Some(*online);
            }
        }

        for (id, seen) in &update.peer_seen_change {
            if let Some(node) = working.get_mut(id) {
                node.last_seen = if *seen { Some(self.clock.now()) } else { None };
            }
        }

        debug!(
            changed = update.peers_changed.len(),
            removed = update.peers_removed.len(),
            peers = working.len(),
            "applied peer delta"
        );
        working.into_values().collect()
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wiremesh_core::FixedClock;

    fn n(id: u64, name: &str) -> Node {
        Node::new(id, name)
    }

    fn online(mut node: Node, v: bool) -> Node {
        node.online = Some(v);
        node
    }

    fn seen_at(mut node: Node, secs: i64) -> Node {
        node.last_seen = Utc.timestamp_opt(secs, 0).single();
        node
    }

    fn reconciler_at(secs: i64) -> Reconciler {
        Reconciler::with_clock(Arc::new(FixedClock::at_unix(secs)))
    }

    #[test]
    fn test_full_snapshot() {
        let update = MapUpdate::full(vec![n(1, "foo"), n(2, "bar")]);
        let got = Reconciler::new().reconcile(&update, &[]);
        assert_eq!(got, vec![n(1, "foo"), n(2, "bar")]);
    }

    #[test]
    fn test_full_snapshot_ignores_deltas() {
        let update = MapUpdate {
            peers_removed: vec![NodeId(2)],
            ..MapUpdate::full(vec![n(1, "foo"), n(2, "bar")])
        };
        let got = Reconciler::new().reconcile(&update, &[]);
        assert_eq!(got, vec![n(1, "foo"), n(2, "bar")]);
    }

    #[test]
    fn test_empty_full_snapshot_clears_peers() {
        let prev = vec![n(1, "foo")];
        let got = Reconciler::new().reconcile(&MapUpdate::full(vec![]), &prev);
        assert!(got.is_empty());
    }

    #[test]
    fn test_add_and_update() {
        let prev = vec![n(1, "foo"), n(2, "bar")];
        let update = MapUpdate {
            peers_changed: vec![n(0, "zero"), n(2, "bar2"), n(3, "three")],
            ..MapUpdate::default()
        };
        let got = Reconciler::new().reconcile(&update, &prev);
        assert_eq!(got, vec![n(0, "zero"), n(1, "foo"), n(2, "bar2"), n(3, "three")]);
    }

    #[test]
    fn test_upsert_replaces_whole_node() {
        // A changed node carries no online/last_seen; the replacement must
        // not inherit them from the old entry.
        let prev = vec![seen_at(online(n(1, "foo"), true), 99)];
        let update = MapUpdate {
            peers_changed: vec![n(1, "foo2")],
            ..MapUpdate::default()
        };
        let got = Reconciler::new().reconcile(&update, &prev);
        assert_eq!(got, vec![n(1, "foo2")]);
    }

    #[test]
    fn test_remove() {
        let prev = vec![n(1, "foo"), n(2, "bar")];
        let update = MapUpdate {
            peers_removed: vec![NodeId(1)],
            ..MapUpdate::default()
        };
        let got = Reconciler::new().reconcile(&update, &prev);
        assert_eq!(got, vec![n(2, "bar")]);
    }

    #[test]
    fn test_add_and_remove_same_id_removes() {
        let prev = vec![n(1, "foo"), n(2, "bar")];
        let update = MapUpdate {
            peers_changed: vec![n(1, "foo2"), n(2, "bar2")],
            peers_removed: vec![NodeId(2)],
            ..MapUpdate::default()
        };
        let got = Reconciler::new().reconcile(&update, &prev);
        assert_eq!(got, vec![n(1, "foo2")]);
    }

    #[test]
    fn test_empty_delta_is_noop() {
        let prev = vec![n(1, "foo"), n(2, "bar")];
        let got = Reconciler::new().reconcile(&MapUpdate::default(), &prev);
        assert_eq!(got, prev);
    }

    #[test]
    fn test_prev_is_not_mutated() {
        let prev = vec![n(1, "foo"), n(2, "bar")];
        let before = prev.clone();
        let update = MapUpdate {
            peers_changed: vec![n(1, "foo2")],
            peers_removed: vec![NodeId(2)],
            ..MapUpdate::default()
        };
        let _ = Reconciler::new().reconcile(&update, &prev);
        assert_eq!(prev, before);
    }

    #[test]
    fn test_online_change() {
        let prev = vec![n(1, "foo"), n(2, "bar")];
        let update = MapUpdate {
            online_change: [(NodeId(1), true)].into(),
            ..MapUpdate::default()
        };
        let got = Reconciler::new().reconcile(&update, &prev);
        assert_eq!(got, vec![online(n(1, "foo"), true), n(2, "bar")]);
    }

    #[test]
    fn test_online_change_offline() {
        let prev = vec![n(1, "foo"), n(2, "bar")];
        let update = MapUpdate {
            online_change: [(NodeId(1), false), (NodeId(2), true)].into(),
            ..MapUpdate::default()
        };
        let got = Reconciler::new().reconcile(&update, &prev);
        assert_eq!(got, vec![online(n(1, "foo"), false), online(n(2, "bar"), true)]);
    }

    #[test]
    fn test_peer_seen_change() {
        let prev = vec![seen_at(n(1, "foo"), 111), n(2, "bar")];
        let update = MapUpdate {
            peer_seen_change: [(NodeId(1), false), (NodeId(2), true)].into(),
            ..MapUpdate::default()
        };
        let got = reconciler_at(123).reconcile(&update, &prev);
        assert_eq!(got, vec![n(1, "foo"), seen_at(n(2, "bar"), 123)]);
    }

    #[test]
    fn test_unknown_ids_in_deltas_are_ignored() {
        let prev = vec![n(1, "foo")];
        let update = MapUpdate {
            peers_removed: vec![NodeId(9)],
            online_change: [(NodeId(8), true)].into(),
            peer_seen_change: [(NodeId(7), true)].into(),
            ..MapUpdate::default()
        };
        let got = reconciler_at(123).reconcile(&update, &prev);
        assert_eq!(got, prev);
    }

    #[test]
    fn test_output_sorted_with_no_duplicates() {
        let prev = vec![n(5, "e"), n(1, "a")];
        let update = MapUpdate {
            peers_changed: vec![n(3, "c"), n(1, "a2"), n(3, "c2")],
            ..MapUpdate::default()
        };
        let got = Reconciler::new().reconcile(&update, &prev);
        let ids: Vec<u64> = got.iter().map(|node| node.id.0).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert_eq!(got[0].name, "a2");
        assert_eq!(got[1].name, "c2");
    }

    #[test]
    fn test_unsorted_full_snapshot_is_sorted() {
        let update = MapUpdate::full(vec![n(2, "bar"), n(1, "foo")]);
        let got = Reconciler::new().reconcile(&update, &[]);
        assert_eq!(got, vec![n(1, "foo"), n(2, "bar")]);
    }
}
