//! "Show more" stash: a goal counter plus the items held back past it.
//!
//! The goal is the number of items the wall still wants. Each admitted item
//! consumes one unit of goal; once the goal reaches zero, arrivals queue in
//! the stash in arrival order until "show more" raises the goal again.

use crate::model::{ContentId, ContentItem};
use std::collections::VecDeque;

/// Goal counter and held items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoreStash {
    goal: usize,
    held: VecDeque<ContentItem>,
}

impl MoreStash {
    /// Empty stash wanting `goal` items.
    pub fn new(goal: usize) -> Self {
        Self {
            goal,
            held: VecDeque::new(),
        }
    }

    /// Items the wall still wants.
    pub fn goal(&self) -> usize {
        self.goal
    }

    /// Want `amount` more items.
    pub fn raise_goal(&mut self, amount: usize) {
        self.goal = self.goal.saturating_add(amount);
    }

    /// Consume one unit of goal for a new arrival.
    ///
    /// Returns `false` when the goal is exhausted; the caller should then
    /// [`hold`](MoreStash::hold) the item.
    pub fn admit(&mut self) -> bool {
        if self.goal == 0 {
            return false;
        }
        self.goal -= 1;
        true
    }

    /// Hold an item until the goal is raised.
    pub fn hold(&mut self, item: ContentItem) {
        self.held.push_back(item);
    }

    /// Next held item, if the goal allows one more.
    pub fn release(&mut self) -> Option<ContentItem> {
        if self.goal == 0 {
            return None;
        }
        let item = self.held.pop_front()?;
        self.goal -= 1;
        Some(item)
    }

    /// Drop the held item for `id`.
    pub fn remove(&mut self, id: &ContentId) -> Option<ContentItem> {
        let index = self.held.iter().position(|item| &item.id == id)?;
        self.held.remove(index)
    }

    /// Whether `id` is held.
    pub fn contains(&self, id: &ContentId) -> bool {
        self.held.iter().any(|item| &item.id == id)
    }

    /// Mutable access to the held item for `id`.
    pub fn get_mut(&mut self, id: &ContentId) -> Option<&mut ContentItem> {
        self.held.iter_mut().find(|item| &item.id == id)
    }

    /// Number of held items.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Held items in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.held.iter()
    }

    /// Drop every held item and zero the goal.
    pub fn clear(&mut self) {
        self.held.clear();
        self.goal = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ContentItem {
        ContentItem::text(ContentId::new(id).unwrap(), id)
    }

    #[test]
    fn admits_until_goal_exhausted() {
        let mut stash = MoreStash::new(2);
        assert!(stash.admit());
        assert!(stash.admit());
        assert!(!stash.admit());
        assert_eq!(stash.goal(), 0);
    }

    #[test]
    fn release_follows_arrival_order_and_goal() {
        let mut stash = MoreStash::new(0);
        stash.hold(item("a"));
        stash.hold(item("b"));
        stash.hold(item("c"));
        assert_eq!(stash.release(), None);

        stash.raise_goal(2);
        let released: Vec<_> = std::iter::from_fn(|| stash.release())
            .map(|i| i.id.to_string())
            .collect();
        assert_eq!(released, vec!["a", "b"]);
        assert_eq!(stash.len(), 1);
        assert_eq!(stash.goal(), 0);
    }

    #[test]
    fn leftover_goal_admits_later_arrivals() {
        let mut stash = MoreStash::new(0);
        stash.hold(item("a"));
        stash.raise_goal(3);
        assert!(stash.release().is_some());
        assert!(stash.release().is_none());
        assert_eq!(stash.goal(), 2);
        assert!(stash.admit());
    }

    #[test]
    fn remove_and_lookup_by_id() {
        let mut stash = MoreStash::new(0);
        stash.hold(item("a"));
        stash.hold(item("b"));
        let id = ContentId::new("a").unwrap();
        assert!(stash.contains(&id));
        stash.get_mut(&id).unwrap().height = Some(90);
        assert_eq!(stash.remove(&id).unwrap().height, Some(90));
        assert!(!stash.contains(&id));
        assert_eq!(stash.len(), 1);
    }

    #[test]
    fn clear_drops_items_and_goal() {
        let mut stash = MoreStash::new(5);
        stash.hold(item("a"));
        stash.clear();
        assert!(stash.is_empty());
        assert_eq!(stash.goal(), 0);
    }
}
