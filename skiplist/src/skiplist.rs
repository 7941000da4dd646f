use std::fmt;

use rand::Rng;

use arena::{Arena, NodeId};
use error::OperationError;

/// Value of the head sentinel on every level. Smaller than any legal key.
pub const NEG_INF: i64 = -100_000_000;
/// Value of the tail sentinel on every level. Greater than any legal key.
pub const POS_INF: i64 = 100_000_000;

fn in_range(key: i64) -> bool {
    key > NEG_INF && key < POS_INF
}

// /////////////////////////////////////////////////////////////////////////////////////////////////
// SkipList
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// An ordered set of unique `i64` keys strictly between `NEG_INF` and
/// `POS_INF`. Every level is a doubly linked chain bounded by a sentinel
/// pair, and every key occupies a vertical tower reaching from the bottom
/// level up to wherever its promotion coin stopped. The structure never
/// draws randomness on its own; `insert` consumes one draw per promotion
/// attempt from the generator handed in by the caller, so a caller with a
/// fixed seed gets a reproducible shape.
pub struct SkipList {
    arena: Arena,
    /// Head sentinel of the topmost level.
    top_head: NodeId,
    /// Tail sentinel of the topmost level.
    top_tail: NodeId,
    /// Number of levels, bottom included. Grows lazily, never shrinks.
    levels: usize,
    /// Number of distinct keys.
    len: usize,
}

/// One key's vertical extent, reported by `snapshot`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tower {
    pub key: i64,
    /// Number of levels the key occupies, at least 1.
    pub height: usize,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl SkipList {
    /// Creates an empty list: a single level holding only its sentinel
    /// pair.
    ///
    /// # Examples
    ///
    /// ```
    /// # use skiplist::SkipList;
    /// #
    /// let list = SkipList::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.levels(), 1);
    /// ```
    pub fn new() -> SkipList {
        let mut arena = Arena::new();
        let head = arena.alloc(NEG_INF);
        let tail = arena.alloc(POS_INF);
        arena[head].right = Some(tail);
        arena[tail].left = Some(head);
        SkipList {
            arena: arena,
            top_head: head,
            top_tail: tail,
            levels: 1,
            len: 0,
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels, bottom included. At least 1, and monotonically
    /// non-decreasing over the life of the list.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Whether `key` is present. Keys at or beyond the sentinel values are
    /// never present.
    ///
    /// # Examples
    ///
    /// ```
    /// # extern crate rand;
    /// # extern crate skiplist;
    /// # use rand::{SeedableRng, StdRng};
    /// # use skiplist::SkipList;
    /// #
    /// # fn main() {
    /// # let seed: &[_] = &[42usize];
    /// # let mut rng: StdRng = SeedableRng::from_seed(seed);
    /// let mut list = SkipList::new();
    /// list.insert(24, &mut rng).unwrap();
    /// assert!(list.contains(24));
    /// assert!(!list.contains(25));
    /// # }
    /// ```
    pub fn contains(&self, key: i64) -> bool {
        if !in_range(key) {
            return false;
        }
        self.arena[self.locate(key)].value == key
    }

    /// Inserts `key`, drawing one coin from `rng` per promotion attempt:
    /// the key climbs one level for every odd draw and settles on the
    /// first even one. Returns whether the key set changed; inserting a
    /// key that is already present changes nothing. Keys at or beyond the
    /// sentinel values are rejected, never stored.
    pub fn insert<R: Rng>(&mut self, key: i64, rng: &mut R) -> Result<bool, OperationError> {
        if !in_range(key) {
            return Err(OperationError::KeyOutOfRange(key));
        }
        let path = self.locate_path(key);
        if self.arena[path[0]].value == key {
            return Ok(false);
        }
        let mut node = self.splice_after(path[0], key);
        let mut height = 1;
        while rng.next_u32() % 2 == 1 {
            if height >= self.levels {
                self.add_level();
            }
            // levels above the ones the path recorded were created empty
            // just now, so the fresh head sentinel is the predecessor there
            let pred = if height < path.len() {
                path[height]
            } else {
                self.top_head
            };
            let upper = self.splice_after(pred, key);
            self.arena[upper].down = Some(node);
            self.arena[node].up = Some(upper);
            node = upper;
            height += 1;
        }
        self.len += 1;
        Ok(true)
    }

    /// Removes `key` and its whole tower. Returns whether the key was
    /// present; removing an absent or out-of-range key changes nothing.
    /// The levels the tower occupied stay, even if nothing else lives on
    /// them.
    pub fn remove(&mut self, key: i64) -> bool {
        if !in_range(key) {
            return false;
        }
        let node = self.locate(key);
        if self.arena[node].value != key {
            return false;
        }
        // unlink bottom to top; each slot goes back to the free list
        let mut tower = Some(node);
        while let Some(id) = tower {
            let (left, right, up) = {
                let n = &self.arena[id];
                (n.left, n.right, n.up)
            };
            if let Some(left) = left {
                self.arena[left].right = right;
            }
            if let Some(right) = right {
                self.arena[right].left = left;
            }
            self.arena.free(id);
            tower = up;
        }
        self.len -= 1;
        true
    }

    /// Ordered dump: one `Tower` per key, ascending.
    pub fn snapshot(&self) -> Vec<Tower> {
        let mut report = Vec::with_capacity(self.len);
        let mut node = self.arena[self.bottom_head()].right;
        while let Some(id) = node {
            let n = &self.arena[id];
            if n.value == POS_INF {
                break;
            }
            report.push(Tower {
                key: n.value,
                height: self.tower_height(id),
            });
            node = n.right;
        }
        report
    }

    /// Iterator over the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # extern crate rand;
    /// # extern crate skiplist;
    /// # use rand::{SeedableRng, StdRng};
    /// # use skiplist::SkipList;
    /// #
    /// # fn main() {
    /// # let seed: &[_] = &[42usize];
    /// # let mut rng: StdRng = SeedableRng::from_seed(seed);
    /// let mut list = SkipList::new();
    /// for key in &[24, 5, 12] {
    ///     list.insert(*key, &mut rng).unwrap();
    /// }
    /// assert_eq!(list.iter().collect::<Vec<_>>(), vec![5, 12, 24]);
    /// # }
    /// ```
    pub fn iter(&self) -> Iter {
        Iter {
            arena: &self.arena,
            node: self.arena[self.bottom_head()].right,
        }
    }

    /// Keys present at `level` (0 is the bottom), ascending, sentinels
    /// excluded. Empty when `level` is at or above `levels()`.
    pub fn level_keys(&self, level: usize) -> Vec<i64> {
        if level >= self.levels {
            return Vec::new();
        }
        let mut head = self.top_head;
        for _ in 0..self.levels - 1 - level {
            head = self.arena[head]
                .down
                .expect("sentinel tower shorter than the level count");
        }
        let mut keys = Vec::new();
        let mut node = self.arena[head].right;
        while let Some(id) = node {
            let n = &self.arena[id];
            if n.value == POS_INF {
                break;
            }
            keys.push(n.value);
            node = n.right;
        }
        keys
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl SkipList {
    /// Rightmost bottom-level node with value at most `key`; the bottom
    /// head sentinel when every key is greater. The walk stops short of
    /// tail sentinels, so their value is never a candidate.
    fn locate(&self, key: i64) -> NodeId {
        let mut node = self.top_head;
        loop {
            node = self.advance(node, key);
            match self.arena[node].down {
                Some(down) => node = down,
                None => return node,
            }
        }
    }

    /// Like `locate`, but records where the walk stopped on every level:
    /// the per-level predecessor `insert` splices promotions after. Index
    /// 0 is the bottom level.
    fn locate_path(&self, key: i64) -> Vec<NodeId> {
        let mut path = Vec::with_capacity(self.levels);
        let mut node = self.top_head;
        loop {
            node = self.advance(node, key);
            path.push(node);
            match self.arena[node].down {
                Some(down) => node = down,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Walks right from `node` while the next node is not a tail sentinel
    /// and its value does not exceed `key`.
    fn advance(&self, mut node: NodeId, key: i64) -> NodeId {
        while let Some(right) = self.arena[node].right {
            let value = self.arena[right].value;
            if value == POS_INF || value > key {
                break;
            }
            node = right;
        }
        node
    }

    /// Splices a new node carrying `value` immediately to the right of
    /// `left`, which must not be a tail sentinel.
    fn splice_after(&mut self, left: NodeId, value: i64) -> NodeId {
        let right = self.arena[left]
            .right
            .expect("splice to the right of a tail sentinel");
        let id = self.arena.alloc(value);
        self.arena[id].left = Some(left);
        self.arena[id].right = Some(right);
        self.arena[left].right = Some(id);
        self.arena[right].left = Some(id);
        id
    }

    /// Stacks a fresh empty level on top: a new sentinel pair chained to
    /// each other horizontally and to the old top sentinels vertically.
    fn add_level(&mut self) {
        let head = self.arena.alloc(NEG_INF);
        let tail = self.arena.alloc(POS_INF);
        self.arena[head].right = Some(tail);
        self.arena[head].down = Some(self.top_head);
        self.arena[tail].left = Some(head);
        self.arena[tail].down = Some(self.top_tail);
        self.arena[self.top_head].up = Some(head);
        self.arena[self.top_tail].up = Some(tail);
        self.top_head = head;
        self.top_tail = tail;
        self.levels += 1;
    }

    fn bottom_head(&self) -> NodeId {
        let mut node = self.top_head;
        while let Some(down) = self.arena[node].down {
            node = down;
        }
        node
    }

    fn tower_height(&self, mut id: NodeId) -> usize {
        let mut height = 1;
        while let Some(up) = self.arena[id].up {
            height += 1;
            id = up;
        }
        height
    }
}

impl fmt::Debug for SkipList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for level in (0..self.levels).rev() {
            write!(f, "L{}:", level)?;
            for key in self.level_keys(level) {
                write!(f, " {}", key)?;
            }
            write!(f, "\n")?;
        }
        Ok(())
    }
}

// ///////////////////////////////////////////////
// Iterators
// ///////////////////////////////////////////////

/// Bottom-level walk over the keys in ascending order.
pub struct Iter<'a> {
    arena: &'a Arena,
    node: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let id = match self.node {
            Some(id) => id,
            None => return None,
        };
        let node = &self.arena[id];
        if node.value == POS_INF {
            self.node = None;
            return None;
        }
        self.node = node.right;
        Some(node.value)
    }
}

// ///////////////////////////////////////////////
// Integrity checking
// ///////////////////////////////////////////////

#[cfg(test)]
impl SkipList {
    /// Walks the whole structure and asserts every invariant: sentinel
    /// bounds on each level, strict ordering, link symmetry, tower
    /// contiguity, and the key count.
    fn check(&self) {
        assert!(self.levels >= 1);
        let mut live = 0;
        let mut head = self.top_head;
        let mut level = self.levels;
        loop {
            level -= 1;
            live += 2;
            assert_eq!(self.arena[head].value, NEG_INF);
            assert!(self.arena[head].left.is_none());
            let mut prev = NEG_INF;
            let mut node = self.arena[head].right;
            let mut closed = false;
            while let Some(id) = node {
                let n = &self.arena[id];
                if let Some(right) = n.right {
                    assert_eq!(self.arena[right].left, Some(id));
                }
                if n.value == POS_INF {
                    assert!(n.right.is_none());
                    closed = true;
                    break;
                }
                live += 1;
                assert!(n.value > prev, "level {} out of order:\n{:?}", level, self);
                prev = n.value;
                if level > 0 {
                    let down = n.down.expect("key node above the bottom has no down link");
                    assert_eq!(self.arena[down].value, n.value);
                    assert_eq!(self.arena[down].up, Some(id));
                } else {
                    assert!(n.down.is_none());
                }
                node = n.right;
            }
            assert!(closed, "level {} lost its tail sentinel", level);
            match self.arena[head].down {
                Some(down) => head = down,
                None => break,
            }
        }
        assert_eq!(level, 0);
        assert_eq!(self.len, self.level_keys(0).len());
        assert_eq!(self.arena.len(), live);
    }
}

// /////////////////////////////////////////////////////////////////////////////////////////////////
// Tests
// /////////////////////////////////////////////////////////////////////////////////////////////////
