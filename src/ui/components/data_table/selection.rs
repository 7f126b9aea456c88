//! Selection tracker keyed by record identity.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identity of a shared record: the address of its `Arc` allocation.
///
/// Stable for as long as any clone of the `Arc` is alive, which the selection
/// guarantees for its own members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(usize);

impl RecordId {
    pub fn of<R>(record: &Arc<R>) -> Self {
        Self(Arc::as_ptr(record).addr())
    }
}

/// What happens to selected records that disappear when the collection is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcilePolicy {
    /// Stale records stay selected and still count toward "all selected".
    #[default]
    Keep,
    /// Stale records are dropped from the selection.
    Prune,
}

type Listener<R> = Box<dyn FnMut(&[Arc<R>])>;

/// Set of selected records with a change listener.
///
/// Every mutating call notifies the listener exactly once with the full
/// resulting selection, in insertion order.
pub struct Selection<R> {
    members: Vec<Arc<R>>,
    ids: HashSet<RecordId>,
    listener: Option<Listener<R>>,
}

impl<R> Default for Selection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Selection<R> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            ids: HashSet::new(),
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: impl FnMut(&[Arc<R>]) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn contains(&self, record: &Arc<R>) -> bool {
        self.ids.contains(&RecordId::of(record))
    }

    pub fn members(&self) -> &[Arc<R>] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Remove `record` if selected, otherwise add it.
    pub fn toggle(&mut self, record: &Arc<R>) -> &[Arc<R>] {
        let id = RecordId::of(record);
        if self.ids.remove(&id) {
            self.members.retain(|member| RecordId::of(member) != id);
        } else {
            self.ids.insert(id);
            self.members.push(Arc::clone(record));
        }
        self.notify();
        &self.members
    }

    /// Clear when the selection is as large as `records`, otherwise select all of them.
    ///
    /// An empty collection counts as fully selected, so the selection is cleared.
    pub fn toggle_all(&mut self, records: &[Arc<R>]) -> &[Arc<R>] {
        if self.members.len() == records.len() {
            self.members.clear();
            self.ids.clear();
        } else {
            self.members = records.to_vec();
            self.ids = records.iter().map(RecordId::of).collect();
        }
        self.notify();
        &self.members
    }

    pub fn clear(&mut self) -> &[Arc<R>] {
        self.members.clear();
        self.ids.clear();
        self.notify();
        &self.members
    }

    /// Drop members that are not part of `records`.
    ///
    /// Notifies only when something was removed. Returns whether it did.
    pub fn retain_in(&mut self, records: &[Arc<R>]) -> bool {
        let current: HashSet<RecordId> = records.iter().map(RecordId::of).collect();
        let before = self.members.len();
        self.members
            .retain(|member| current.contains(&RecordId::of(member)));
        if self.members.len() == before {
            return false;
        }
        self.ids.retain(|id| current.contains(id));
        self.notify();
        true
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.members);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(u32);

    fn items(n: u32) -> Vec<Arc<Item>> {
        (0..n).map(|i| Arc::new(Item(i))).collect()
    }

    fn recorded(selection: &mut Selection<Item>) -> Rc<RefCell<Vec<Vec<u32>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        selection.set_listener(move |members| {
            sink.borrow_mut()
                .push(members.iter().map(|m| m.0).collect());
        });
        log
    }

    #[test]
    fn test_toggle_row_twice() {
        let records = items(3);
        let mut selection = Selection::new();
        let log = recorded(&mut selection);

        selection.toggle(&records[0]);
        assert!(selection.contains(&records[0]));
        selection.toggle(&records[0]);
        assert!(selection.is_empty());

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], vec![0_u32]);
        assert!(log[1].is_empty());
    }

    #[test]
    fn test_toggle_all_twice_returns_to_empty() {
        let records = items(4);
        let mut selection = Selection::new();
        let log = recorded(&mut selection);

        assert_eq!(selection.toggle_all(&records).len(), 4);
        assert!(selection.toggle_all(&records).is_empty());
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_toggle_all_replaces_partial_selection() {
        let records = items(3);
        let mut selection = Selection::new();
        selection.toggle(&records[2]);
        selection.toggle_all(&records);
        assert_eq!(selection.len(), 3);
        assert!(records.iter().all(|r| selection.contains(r)));
    }

    #[test]
    fn test_toggle_all_on_empty_collection() {
        let mut selection: Selection<Item> = Selection::new();
        let log = recorded(&mut selection);

        assert!(selection.toggle_all(&[]).is_empty());
        assert_eq!(log.borrow().len(), 1);
        assert!(log.borrow()[0].is_empty());
    }

    #[test]
    fn test_identity_not_equality() {
        let a = Arc::new(Item(1));
        let b = Arc::new(Item(1));
        assert_eq!(a, b);

        let mut selection = Selection::new();
        selection.toggle(&a);
        assert!(selection.contains(&a));
        assert!(!selection.contains(&b));
        assert!(selection.contains(&Arc::clone(&a)));
    }

    #[test]
    fn test_clear_notifies() {
        let records = items(2);
        let mut selection = Selection::new();
        let log = recorded(&mut selection);
        selection.toggle(&records[1]);
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_retain_in_drops_stale_members() {
        let old = items(3);
        let mut selection = Selection::new();
        selection.toggle(&old[0]);
        selection.toggle(&old[1]);
        let log = recorded(&mut selection);

        let replaced = vec![Arc::clone(&old[1]), Arc::new(Item(9))];
        assert!(selection.retain_in(&replaced));
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(&old[1]));
        assert!(!selection.contains(&old[0]));
        assert_eq!(log.borrow().as_slice(), &[vec![1_u32]]);

        assert!(!selection.retain_in(&replaced));
        assert_eq!(log.borrow().len(), 1);
    }
}
