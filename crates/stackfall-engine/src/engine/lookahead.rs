use std::sync::Arc;

use crate::ShapeDefinition;

/// Two-slot preview of upcoming shapes.
///
/// Slot 0 holds the shape that spawns next, slot 1 the one after it.
/// [`advance`](Self::advance) pops slot 0, shifts slot 1 forward and puts the
/// fresh template in slot 1, so both slots are always occupied.
#[derive(Debug, Clone)]
pub struct LookaheadQueue {
    slots: [Arc<ShapeDefinition>; 2],
}

impl LookaheadQueue {
    #[must_use]
    pub fn new(head: Arc<ShapeDefinition>, tail: Arc<ShapeDefinition>) -> Self {
        Self {
            slots: [head, tail],
        }
    }

    #[must_use]
    pub fn head(&self) -> &Arc<ShapeDefinition> {
        &self.slots[0]
    }

    #[must_use]
    pub fn slots(&self) -> &[Arc<ShapeDefinition>; 2] {
        &self.slots
    }

    /// Returns slot 0 and rotates `fresh` in behind slot 1.
    pub fn advance(&mut self, fresh: Arc<ShapeDefinition>) -> Arc<ShapeDefinition> {
        let [head, tail] = &mut self.slots;
        let tail = std::mem::replace(tail, fresh);
        std::mem::replace(head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str) -> Arc<ShapeDefinition> {
        Arc::new(ShapeDefinition::from_rows(name, &[&[1]]).unwrap())
    }

    #[test]
    fn test_advance_rotates_slots() {
        let (a, b, c, d) = (def("a"), def("b"), def("c"), def("d"));
        let mut queue = LookaheadQueue::new(Arc::clone(&a), Arc::clone(&b));

        let out = queue.advance(Arc::clone(&c));
        assert!(Arc::ptr_eq(&out, &a));
        assert!(Arc::ptr_eq(queue.head(), &b));
        assert!(Arc::ptr_eq(&queue.slots()[1], &c));

        let out = queue.advance(Arc::clone(&d));
        assert!(Arc::ptr_eq(&out, &b));
        assert_eq!(queue.head().name(), "c");
        assert_eq!(queue.slots()[1].name(), "d");
    }
}
