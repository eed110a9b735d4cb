use std::cmp::{Ord, Ordering};
use std::collections::{BinaryHeap, HashSet};
use std::hash::Hash;
use std::ops::Add;

/// Use uniform-cost search (Dijkstra's algorithm) to find the cheapest path
/// from a set of starting nodes to every node reachable from them.
///
/// Return an iterator over the nodes of the graph defined by the `neighbors`
/// function, each paired with the total weight of the cheapest path that
/// reaches it from any of the `seeds`. Nodes are produced in order of
/// non-decreasing weight, and each reachable node is produced exactly once.
///
/// Each seed is a pair `(node, weight)`, giving a starting node and the weight
/// already accumulated on arrival there. Usually that's zero, but giving
/// several seeds lets you search backwards from a goal that can be reached in
/// more than one way.
///
/// Given any node `n`, the `neighbors` function must return an iterator over
/// pairs `(neighbor, weight)`, where `neighbor` is a node directly reachable
/// from `n`, and `weight` is the cost of that edge. Weights must never be
/// negative, or the produced weights are not the cheapest.
///
/// The pending set may hold several entries for the same node, arriving along
/// different paths. Only the first one popped counts; the rest are dropped when
/// they reach the front of the queue.
pub fn uniform_cost<N, S, F, I, W>(seeds: S, neighbors: F) -> UniformCost<N, F, W>
where
    N: Clone + Eq + Hash,
    S: IntoIterator<Item = (N, W)>,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, W)>,
    W: Add<Output = W> + Clone + Ord,
{
    let pending = seeds
        .into_iter()
        .map(|(node, weight)| Settled { node, weight })
        .collect();

    UniformCost {
        settled: HashSet::new(),
        pending,
        neighbors,
    }
}

/// A node whose cheapest path weight is known.
#[derive(Clone, Debug)]
pub struct Settled<N, W> {
    pub node: N,

    /// The total weight of the cheapest path from any seed to `node`.
    pub weight: W,
}

pub struct UniformCost<N, F, W> {
    settled: HashSet<N>,
    pending: BinaryHeap<Settled<N, W>>,
    neighbors: F,
}

impl<N, F, W> UniformCost<N, F, W> {
    /// The number of entries waiting in the queue, stale duplicates included.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl<N, F, I, W> Iterator for UniformCost<N, F, W>
where
    N: Clone + Eq + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = (N, W)>,
    W: Add<Output = W> + Clone + Ord,
{
    type Item = Settled<N, W>;

    fn next(&mut self) -> Option<Settled<N, W>> {
        while let Some(entry) = self.pending.pop() {
            if !self.settled.insert(entry.node.clone()) {
                continue;
            }
            for (neighbor, weight) in (self.neighbors)(&entry.node) {
                if self.settled.contains(&neighbor) {
                    continue;
                }
                self.pending.push(Settled {
                    node: neighbor,
                    weight: entry.weight.clone() + weight,
                });
            }
            return Some(entry);
        }
        None
    }
}

// `BinaryHeap` is a max-heap, so we order entries backwards: A is 'greater
// than' B if A's weight is *lower* than B's, meaning A should be popped first.
impl<N, W: Ord> PartialEq for Settled<N, W> {
    fn eq(&self, other: &Settled<N, W>) -> bool {
        self.weight == other.weight
    }
}

impl<N, W: Ord> Eq for Settled<N, W> {}

impl<N, W: Ord> Ord for Settled<N, W> {
    fn cmp(&self, other: &Settled<N, W>) -> Ordering {
        other.weight.cmp(&self.weight)
    }
}

impl<N, W: Ord> PartialOrd for Settled<N, W> {
    fn partial_cmp(&self, other: &Settled<N, W>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct EdgeList(Vec<(i32, i32, usize)>);

    impl EdgeList {
        fn neighbors<'a>(&'a self, node: i32) -> impl Iterator<Item = (i32, usize)> + 'a {
            self.0.iter().filter_map(move |&(from, to, weight)| {
                if from == node {
                    Some((to, weight))
                } else {
                    None
                }
            })
        }

        fn collect_settled(&self, seeds: &[i32]) -> Vec<(i32, usize)> {
            uniform_cost(seeds.iter().map(|&s| (s, 0)), |n| self.neighbors(*n))
                .map(|s| (s.node, s.weight))
                .collect::<Vec<_>>()
        }
    }

    #[test]
    #[rustfmt::skip]
    fn test_uniform_cost() {
        let graph = EdgeList(vec![(0,1,2), (0,1,3), (0,1,1)]);
        assert_eq!(graph.collect_settled(&[0]),
                   vec![(0,0), (1,1)]);

        let graph = EdgeList(vec![(0, 1, 2), (1, 3, 1),
                                  (0, 2, 1), (2, 3, 3)]);
        assert_eq!(graph.collect_settled(&[0]),
                   vec![(0,0), (2,1), (1,2), (3,3)]);

        let graph = EdgeList(vec![(0, 1, 2), (1, 2, 2), (2, 3, 1), (3, 10, 1),
                                  (0, 4, 1), (4, 10, 7),
                                  (0, 5, 3), (5, 10, 4)]);
        assert_eq!(graph.collect_settled(&[0]),
                   vec![(0,0), (4,1), (1,2), (5,3), (2,4), (3,5), (10,6)]);
    }

    #[test]
    #[rustfmt::skip]
    fn test_several_seeds() {
        // 10 is reachable from both seeds; the closer one wins.
        // The two seeds tie, so their relative order is unspecified.
        let graph = EdgeList(vec![(0, 10, 5), (1, 10, 2), (10, 11, 1)]);
        let mut settled = graph.collect_settled(&[0, 1]);
        settled[..2].sort();
        assert_eq!(settled,
                   vec![(0,0), (1,0), (10,2), (11,3)]);

        // Nodes unreachable from any seed never appear.
        let graph = EdgeList(vec![(0, 1, 1), (2, 3, 1)]);
        assert_eq!(graph.collect_settled(&[0]),
                   vec![(0,0), (1,1)]);
    }

    #[test]
    fn test_cycles_terminate() {
        let graph = EdgeList(vec![(0, 1, 1), (1, 0, 1), (1, 2, 1), (2, 0, 1), (2, 2, 0)]);
        assert_eq!(graph.collect_settled(&[0]), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_stale_entries_dropped() {
        // Two routes into 3; the expensive entry is still queued when 3 is
        // settled, and must not be produced a second time.
        let graph = EdgeList(vec![(0, 1, 1), (0, 3, 5), (1, 3, 1)]);
        let mut search = uniform_cost(vec![(0, 0)], |n: &i32| graph.neighbors(*n));
        let order = search.by_ref().map(|s| (s.node, s.weight)).collect::<Vec<_>>();
        assert_eq!(order, vec![(0, 0), (1, 1), (3, 2)]);
        assert_eq!(search.pending_len(), 0);
    }
}
