//! Word co-occurrence graph
//!
//! Nodes are lower-cased words; an undirected edge links two words each
//! time they appear in the same candidate phrase. The graph backs RAKE
//! scoring, where a word's degree is its frequency plus the weight of all
//! its edges.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// A word node
#[derive(Debug, Clone)]
pub struct WordNode {
    pub word: String,
    /// Occurrences across all phrases
    pub frequency: usize,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl WordNode {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            frequency: 0,
            edges: FxHashMap::default(),
        }
    }

    /// Frequency plus the weight of every incident edge
    pub fn degree(&self) -> f64 {
        self.frequency as f64 + self.edges.values().sum::<f64>()
    }
}

/// Mutable co-occurrence graph with O(1) node lookup
#[derive(Debug, Default)]
pub struct CooccurrenceGraph {
    word_to_id: FxHashMap<String, u32>,
    nodes: Vec<WordNode>,
}

impl CooccurrenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            word_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create the node for `word`, returning its ID
    pub fn get_or_create_node(&mut self, word: &str) -> u32 {
        if let Some(&id) = self.word_to_id.get(word) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.word_to_id.insert(word.to_string(), id);
        self.nodes.push(WordNode::new(word));
        id
    }

    /// Add `weight` to the undirected edge between two nodes.
    ///
    /// Self-loops are ignored.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return;
        }
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Record one phrase occurrence: bump each word's frequency and link
    /// every pair of positions in the phrase.
    pub fn add_phrase<S: AsRef<str>>(&mut self, words: &[S]) {
        let ids: Vec<u32> = words
            .iter()
            .map(|w| self.get_or_create_node(w.as_ref()))
            .collect();
        for &id in &ids {
            self.nodes[id as usize].frequency += 1;
        }
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                self.increment_edge(ids[i], ids[j], 1.0);
            }
        }
    }

    /// Build the graph from many phrases at once.
    ///
    /// Large inputs count pairs on the rayon pool and merge afterwards;
    /// weights are whole numbers, so the result does not depend on merge
    /// order.
    pub fn from_phrases(phrases: &[Vec<String>]) -> Self {
        if phrases.len() < 1000 {
            let mut graph = Self::with_capacity(phrases.len());
            for phrase in phrases {
                graph.add_phrase(phrase);
            }
            return graph;
        }

        let partials: Vec<(FxHashMap<&str, usize>, FxHashMap<(&str, &str), f64>)> = phrases
            .par_chunks(256)
            .map(|chunk| {
                let mut freq: FxHashMap<&str, usize> = FxHashMap::default();
                let mut edges: FxHashMap<(&str, &str), f64> = FxHashMap::default();
                for phrase in chunk {
                    for w in phrase {
                        *freq.entry(w.as_str()).or_insert(0) += 1;
                    }
                    for i in 0..phrase.len() {
                        for j in (i + 1)..phrase.len() {
                            let (a, b) = if phrase[i] <= phrase[j] {
                                (phrase[i].as_str(), phrase[j].as_str())
                            } else {
                                (phrase[j].as_str(), phrase[i].as_str())
                            };
                            if a != b {
                                *edges.entry((a, b)).or_insert(0.0) += 1.0;
                            }
                        }
                    }
                }
                (freq, edges)
            })
            .collect();

        // Node IDs follow first appearance, same as the sequential path.
        let mut graph = Self::with_capacity(phrases.len());
        for phrase in phrases {
            for w in phrase {
                graph.get_or_create_node(w);
            }
        }
        for (freq, edges) in partials {
            for (word, n) in freq {
                let id = graph.get_or_create_node(word);
                graph.nodes[id as usize].frequency += n;
            }
            for ((a, b), weight) in edges {
                let id_a = graph.get_or_create_node(a);
                let id_b = graph.get_or_create_node(b);
                graph.increment_edge(id_a, id_b, weight);
            }
        }
        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    pub fn get_node(&self, id: u32) -> Option<&WordNode> {
        self.nodes.get(id as usize)
    }

    pub fn get_node_id(&self, word: &str) -> Option<u32> {
        self.word_to_id.get(word).copied()
    }

    /// RAKE word score: degree divided by frequency
    pub fn word_score(&self, word: &str) -> f64 {
        self.get_node_id(word)
            .and_then(|id| self.get_node(id))
            .filter(|n| n.frequency > 0)
            .map_or(0.0, |n| n.degree() / n.frequency as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
