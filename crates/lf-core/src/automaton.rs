//! Aho-Corasick Automaton
//!
//! A trie of fixed patterns with failure links, generic over the key
//! alphabet. The keyword filter instantiates it over `char`; the suffix index
//! instantiates it over domain labels.
//!
//! Nodes live in a single arena and refer to each other by [`NodeId`], so a
//! fail link is purely navigational and never owns its target.
//!
//! # Usage
//!
//! Insert every pattern first, then call [`Automaton::build`] once. Inserting
//! after a build marks the automaton stale until `build` is called again.

use std::borrow::Borrow;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

// =============================================================================
// Identifiers
// =============================================================================

/// Index of a node in the automaton arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node. Always present, never terminal.
    pub const ROOT: NodeId = NodeId(0);

    /// Id for arena slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`.
    #[inline]
    fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(raw) => NodeId(raw),
            Err(_) => panic!("automaton arena exceeds {} nodes", u32::MAX),
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifier of an inserted pattern, assigned in insertion order.
/// Re-inserting an existing pattern returns its original id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternId(u32);

impl PatternId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// Node
// =============================================================================

/// One key position in the trie.
#[derive(Debug, Clone)]
pub struct Node<K> {
    /// Key on the edge leading into this node (`None` for the root).
    key: Option<K>,
    /// Distance from the root.
    depth: u32,
    /// Set when some inserted pattern ends here.
    pattern: Option<PatternId>,
    children: HashMap<K, NodeId>,
    /// Aho-Corasick fail pointer. `None` for the root and for any node added
    /// since the last build.
    fail: Option<NodeId>,
    /// Nearest terminal node reachable through the fail chain (dictionary link).
    output: Option<NodeId>,
    /// Number of inserted patterns passing through this node.
    occurrences: u32,
}

impl<K> Node<K> {
    fn new(key: Option<K>, depth: u32) -> Self {
        Self {
            key,
            depth,
            pattern: None,
            children: HashMap::new(),
            fail: None,
            output: None,
            occurrences: 0,
        }
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn pattern(&self) -> Option<PatternId> {
        self.pattern
    }

    pub fn fail(&self) -> Option<NodeId> {
        self.fail
    }

    pub fn occurrences(&self) -> u32 {
        self.occurrences
    }
}

// =============================================================================
// Automaton
// =============================================================================

/// Multi-pattern automaton over keys of type `K`.
#[derive(Debug, Clone)]
pub struct Automaton<K> {
    nodes: Vec<Node<K>>,
    pattern_count: u32,
    built: bool,
}

impl<K: Eq + Hash + Clone> Default for Automaton<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> Automaton<K> {
    /// Create an automaton containing only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, 0)],
            pattern_count: 0,
            // An empty trie needs no fail links.
            built: true,
        }
    }

    /// Add a pattern, creating nodes as needed.
    ///
    /// Returns `None` for an empty pattern, which is never stored: an empty
    /// needle would match every text, including the empty one.
    ///
    /// # Panics
    ///
    /// Panics if the arena would grow past `u32::MAX` nodes. Pattern ids never
    /// outnumber nodes, so they share the same bound.
    pub fn insert<I>(&mut self, pattern: I) -> Option<PatternId>
    where
        I: IntoIterator<Item = K>,
    {
        let mut current = NodeId::ROOT;
        let mut inserted_any = false;

        for key in pattern {
            inserted_any = true;
            current = match self.nodes[current.index()].children.get(&key) {
                Some(&next) => next,
                None => {
                    let depth = self.nodes[current.index()].depth + 1;
                    let next = NodeId::from_index(self.nodes.len());
                    self.nodes.push(Node::new(Some(key.clone()), depth));
                    self.nodes[current.index()].children.insert(key, next);
                    self.built = false;
                    next
                }
            };
            let node = &mut self.nodes[current.index()];
            node.occurrences = node.occurrences.saturating_add(1);
        }

        if !inserted_any {
            return None;
        }

        let node = &mut self.nodes[current.index()];
        if let Some(existing) = node.pattern {
            return Some(existing);
        }

        let id = PatternId(self.pattern_count);
        self.pattern_count = self
            .pattern_count
            .checked_add(1)
            .unwrap_or_else(|| panic!("automaton holds more than {} patterns", u32::MAX));
        node.pattern = Some(id);
        self.built = false;
        Some(id)
    }

    /// Compute fail and dictionary links for every node.
    ///
    /// Breadth-first from the root: the fail link of child `c` of node `n` is
    /// the deepest node on `n`'s fail chain with a `c` child, or the root.
    /// Safe to call repeatedly; the result only depends on the trie shape.
    pub fn build(&mut self) {
        let mut queue = VecDeque::with_capacity(self.nodes.len());
        self.nodes[NodeId::ROOT.index()].fail = None;
        self.nodes[NodeId::ROOT.index()].output = None;
        queue.push_back(NodeId::ROOT);

        while let Some(parent) = queue.pop_front() {
            let children: Vec<NodeId> = self.nodes[parent.index()].children.values().copied().collect();

            for child in children {
                let fail = match self.nodes[child.index()].key.as_ref() {
                    Some(key) => self.fail_target(parent, key),
                    None => NodeId::ROOT,
                };

                let target = &self.nodes[fail.index()];
                let output = if target.is_terminal() { Some(fail) } else { target.output };

                let node = &mut self.nodes[child.index()];
                node.fail = Some(fail);
                node.output = output;
                queue.push_back(child);
            }
        }

        self.built = true;
    }

    /// Walk `parent`'s fail chain looking for a node with a `key` child.
    fn fail_target(&self, parent: NodeId, key: &K) -> NodeId {
        let mut probe = self.nodes[parent.index()].fail;
        while let Some(node) = probe {
            if let Some(&next) = self.nodes[node.index()].children.get(key) {
                return next;
            }
            probe = self.nodes[node.index()].fail;
        }
        NodeId::ROOT
    }

    /// Whether fail links reflect every inserted pattern.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Number of distinct patterns inserted.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count as usize
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.index()]
    }

    /// Direct trie edge lookup; does not follow fail links.
    #[inline]
    pub fn child<Q>(&self, id: NodeId, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.nodes[id.index()].children.get(key).copied()
    }

    /// Transition function: follow the trie edge for `key`, falling back
    /// along fail links on mismatch. The root's missing fail link ends the walk.
    #[inline]
    fn next_state<Q>(&self, mut state: NodeId, key: &Q) -> NodeId
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        loop {
            if let Some(next) = self.child(state, key) {
                return next;
            }
            match self.nodes[state.index()].fail {
                Some(fail) => state = fail,
                None => return NodeId::ROOT,
            }
        }
    }

    /// First pattern found while scanning `text`, by end position.
    ///
    /// Stops at the first position where any pattern ends, so the cost is
    /// bounded by the text length and not by the number of patterns.
    pub fn find_first<I>(&self, text: I) -> Option<PatternId>
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        debug_assert!(self.built, "automaton searched before build()");
        if self.is_empty() {
            return None;
        }

        let mut state = NodeId::ROOT;
        for key in text {
            let key: &K = key.borrow();
            state = self.next_state(state, key);
            let node = &self.nodes[state.index()];
            if let Some(pattern) = node.pattern {
                return Some(pattern);
            }
            if let Some(output) = node.output {
                return self.nodes[output.index()].pattern;
            }
        }
        None
    }

    /// True if any inserted pattern occurs in `text`.
    #[inline]
    pub fn search<I>(&self, text: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        self.find_first(text).is_some()
    }
}
