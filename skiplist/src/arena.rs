use std::ops::{Index, IndexMut};

/// Slot index of a node in the arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NodeId(u32);

/// One node on one level. Sentinels are plain nodes carrying the
/// out-of-range bound values; `left`/`right` chain a level together and
/// `up`/`down` chain a key's tower across levels.
pub struct Node {
    pub value: i64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub up: Option<NodeId>,
    pub down: Option<NodeId>,
}

impl Node {
    fn new(value: i64) -> Node {
        Node {
            value: value,
            left: None,
            right: None,
            up: None,
            down: None,
        }
    }
}

/// Owns every node of every level. Nodes address each other by `NodeId`;
/// freeing a node vacates its slot in O(1) and recycles the id for later
/// allocations. Sentinel slots are allocated once and never freed.
pub struct Arena {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
}

impl Arena {
    pub fn new() -> Arena {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live nodes. Only the integrity checks count nodes this
    /// way; the list tracks its own key count.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn alloc(&mut self, value: i64) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0 as usize] = Some(Node::new(value));
                id
            }
            None => {
                self.slots.push(Some(Node::new(value)));
                NodeId(self.slots.len() as u32 - 1)
            }
        }
    }

    /// Vacates a slot. The id must not be dereferenced again until `alloc`
    /// hands it back out.
    pub fn free(&mut self, id: NodeId) {
        debug_assert!(self.slots[id.0 as usize].is_some());
        self.slots[id.0 as usize] = None;
        self.free.push(id);
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match self.slots[id.0 as usize] {
            Some(ref node) => node,
            None => panic!("vacant node id {:?}", id),
        }
    }
}

impl IndexMut<NodeId> for Arena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots[id.0 as usize] {
            Some(ref mut node) => node,
            None => panic!("vacant node id {:?}", id),
        }
    }
}
