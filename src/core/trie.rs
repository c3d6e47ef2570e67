// File: src/core/trie.rs
use std::collections::BTreeMap;

const ROOT: usize = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TrieNode {
    /// Children keyed by edge character; BTreeMap keeps them in sorted order.
    pub(crate) children: BTreeMap<char, usize>,
    pub(crate) terminal: bool,
}

/// A prefix tree over vocabulary words, stored as an arena of nodes.
///
/// Node 0 is the root. Each node has at most one child per character, and
/// the path from the root to a node spells a unique prefix. Built once, then
/// shared read-only across suggestion queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie {
    pub(crate) nodes: Vec<TrieNode>,
    words: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::default()], words: 0 }
    }

    /// Builds a trie from a raw token stream. Repeated tokens are harmless.
    pub fn build_from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut trie = Self::new();
        for token in tokens {
            trie.insert(token.as_ref());
        }
        trie
    }

    /// Rebuilds a trie from an already validated node arena.
    pub(crate) fn from_nodes(nodes: Vec<TrieNode>) -> Self {
        let words = nodes.iter().filter(|n| n.terminal).count();
        Self { nodes, words }
    }

    /// Inserts a word. O(len(word)); inserting the same word again is a no-op.
    pub fn insert(&mut self, word: &str) {
        let mut node_idx = ROOT;
        for ch in word.chars() {
            node_idx = match self.nodes[node_idx].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let new_node_id = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node_idx].children.insert(ch, new_node_id);
                    new_node_id
                }
            };
        }
        if !self.nodes[node_idx].terminal {
            self.nodes[node_idx].terminal = true;
            self.words += 1;
        }
    }

    fn find(&self, prefix: &str) -> Option<usize> {
        prefix
            .chars()
            .try_fold(ROOT, |idx, ch| self.nodes[idx].children.get(&ch).copied())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some_and(|idx| self.nodes[idx].terminal)
    }

    /// Returns up to `max_results` words starting with `prefix`, in
    /// lexicographic order.
    ///
    /// The walk stops as soon as the cap is reached, so the cost is bounded
    /// by the output size rather than the size of the prefix's subtree.
    pub fn suggest(&self, prefix: &str, max_results: usize) -> Vec<String> {
        let mut results = Vec::new();
        if max_results == 0 {
            return results;
        }
        let Some(node_idx) = self.find(prefix) else {
            return results;
        };

        let mut path = prefix.to_string();
        self.dfs_collect(node_idx, &mut path, max_results, &mut results);
        results
    }

    /// Pre-order DFS over sorted children. Returns true once the cap is hit.
    fn dfs_collect(&self, node_idx: usize, path: &mut String, cap: usize, out: &mut Vec<String>) -> bool {
        let node = &self.nodes[node_idx];
        if node.terminal {
            out.push(path.clone());
            if out.len() >= cap {
                return true;
            }
        }

        for (&ch, &child_idx) in &node.children {
            path.push(ch);
            let full = self.dfs_collect(child_idx, path, cap, out);
            path.pop();
            if full {
                return true;
            }
        }
        false
    }

    /// Number of distinct words.
    pub fn word_count(&self) -> usize {
        self.words
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }
}
