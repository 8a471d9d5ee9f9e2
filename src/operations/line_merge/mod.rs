mod walk;

use std::collections::HashSet;

use tracing::debug;

use crate::config::GraphConfig;
use crate::error::{ConfigError, Result};
use crate::geometry::LineString;
use crate::topology::{EdgeId, Graph, NodeId, OrientedEdge};

use walk::Chain;

/// Merges lines into maximal runs.
///
/// Lines meeting end to end at a node shared by exactly two lines are
/// joined into one. Nodes where one or three or more lines meet are left
/// as they are. The graph remembers whether it has changed since the last
/// merge, so asking for the merged lines again without adding or removing
/// anything does no work.
#[derive(Debug)]
pub struct LineMerger {
    graph: Graph,
    tolerance: f64,
    dirty: bool,
}

impl Default for LineMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl LineMerger {
    /// Creates an empty merger with exact node matching.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            tolerance: 0.0,
            dirty: false,
        }
    }

    /// Creates an empty merger that matches nodes within the configured
    /// node tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration holds an invalid tolerance.
    pub fn with_config(config: &GraphConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            graph: Graph::with_config(config)?,
            tolerance: config.node_tolerance,
            dirty: false,
        })
    }

    /// Creates a merger holding `lines`.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = LineString>) -> Self {
        let mut merger = Self::new();
        merger.add_all(lines);
        merger
    }

    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns `true` if lines were added or removed since the last merge.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Adds a line. Returns `false` if the line was degenerate or is
    /// already present, in which case nothing changes.
    pub fn add(&mut self, line: LineString) -> bool {
        let slots = self.graph.edge_slots();
        let added = self.graph.add_edge(line).is_some() && self.graph.edge_slots() != slots;
        self.dirty |= added;
        added
    }

    /// Adds each line and returns how many were new.
    pub fn add_all(&mut self, lines: impl IntoIterator<Item = LineString>) -> usize {
        let mut added = 0;
        for line in lines {
            if self.add(line) {
                added += 1;
            }
        }
        added
    }

    /// Removes a line, matching it in either direction.
    pub fn remove(&mut self, line: &LineString) -> bool {
        let removed = self.graph.remove_line(line);
        self.dirty |= removed;
        removed
    }

    /// Removes each line and returns how many were found.
    pub fn remove_all(&mut self, lines: &[LineString]) -> usize {
        lines.iter().filter(|line| self.remove(line)).count()
    }

    /// Joins every chain of lines through nodes of degree 2.
    ///
    /// Chains are walked from the nodes whose degree is not 2. Closed rings
    /// with no such node are then merged starting from their lowest node,
    /// by `x` and then `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph bookkeeping is inconsistent.
    pub fn merge(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let mut consumed: HashSet<EdgeId> = HashSet::new();
        let mut chains = 0;
        for seed in self
            .graph
            .nodes_matching(|node| !node.removed && node.degree() != 2)
        {
            while let Some(first) = self.next_edge(seed, &consumed)? {
                let chain = walk::walk(&self.graph, seed, first, &consumed)?;
                chains += usize::from(self.collapse(&chain, &mut consumed)?);
            }
        }

        let mut rings = 0;
        while let Some((seed, first)) = self.ring_seed(&consumed)? {
            let chain = walk::walk(&self.graph, seed, first, &consumed)?;
            rings += usize::from(self.collapse(&chain, &mut consumed)?);
        }

        self.dirty = false;
        debug!(chains, rings, edges = self.graph.edge_count(), "merged lines");
        debug_assert!(self.graph.validate().is_ok());
        Ok(())
    }

    /// Merges if needed and returns the resulting lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph bookkeeping is inconsistent.
    pub fn merged_line_strings(&mut self) -> Result<Vec<LineString>> {
        self.merge()?;
        Ok(self.graph.lines())
    }

    /// The current lines, without merging.
    #[must_use]
    pub fn lines(&self) -> Vec<LineString> {
        self.graph.lines()
    }

    /// Lowest-index unconsumed edge at a live node.
    fn next_edge(
        &self,
        node: NodeId,
        consumed: &HashSet<EdgeId>,
    ) -> Result<Option<EdgeId>> {
        let data = self.graph.node(node)?;
        if data.removed {
            return Ok(None);
        }
        let mut best: Option<(EdgeId, &[usize])> = None;
        for &id in &data.edges {
            if consumed.contains(&id) {
                continue;
            }
            let index = self.graph.edge(id)?.index.as_slice();
            match best {
                Some((_, lowest)) if lowest <= index => {}
                _ => best = Some((id, index)),
            }
        }
        Ok(best.map(|(id, _)| id))
    }

    /// Start of a ring that no boundary node reaches: the lowest node of
    /// degree 2 that still has an unconsumed edge.
    fn ring_seed(&self, consumed: &HashSet<EdgeId>) -> Result<Option<(NodeId, EdgeId)>> {
        let lowest = self
            .graph
            .nodes()
            .filter(|(_, node)| {
                node.degree() == 2 && node.edges.iter().any(|e| !consumed.contains(e))
            })
            .min_by(|a, b| {
                let (p, q) = (&a.1.point, &b.1.point);
                p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y))
            })
            .map(|(id, _)| id);
        let Some(seed) = lowest else {
            return Ok(None);
        };
        Ok(self.next_edge(seed, consumed)?.map(|edge| (seed, edge)))
    }

    /// Replaces a chain of two or more edges with one merged edge. Every
    /// edge of the chain is marked consumed either way.
    ///
    /// Returns `true` if a merged edge was made.
    fn collapse(&mut self, chain: &Chain, consumed: &mut HashSet<EdgeId>) -> Result<bool> {
        consumed.extend(chain.edges.iter().map(|o| o.edge));
        if chain.edges.len() < 2 {
            return Ok(false);
        }

        let forwards = chain.is_forwards();
        let mut merged: Option<LineString> = None;
        for oriented in &chain.edges {
            let data = self.graph.live_edge(oriented.edge)?;
            let component =
                OrientedEdge::new(oriented.edge, oriented.forward == forwards).oriented_line(data);
            merged = Some(match merged {
                None => component,
                Some(acc) if forwards => acc.merge(&component, self.tolerance)?,
                Some(acc) => component.merge(&acc, self.tolerance)?,
            });
        }
        let Some(merged) = merged else {
            return Ok(false);
        };

        if let Some(id) = self.graph.add_edge(merged) {
            consumed.insert(id);
        }
        for oriented in &chain.edges {
            self.graph.remove_edge(oriented.edge);
        }
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::LineStringGraph;

    fn line(coords: &[(f64, f64)]) -> LineString {
        LineString::from_xy(coords).unwrap()
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn assert_no_interior_degree_two(merger: &LineMerger) {
        for (_, node) in merger.graph().nodes() {
            let on_ring = node
                .edges
                .iter()
                .all(|&e| merger.graph().edge(e).unwrap().is_loop());
            assert!(node.degree() != 2 || on_ring, "degree 2 node at {:?}", node.point);
        }
    }

    #[test]
    fn joins_a_simple_chain() {
        init_tracing();
        let mut merger = LineMerger::from_lines([
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(1.0, 0.0), (2.0, 0.0)]),
            line(&[(2.0, 0.0), (2.0, 1.0)]),
        ]);
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(
            merged,
            vec![line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0)])]
        );
    }

    #[test]
    fn longer_reverse_run_wins() {
        let mut merger = LineMerger::from_lines([
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(5.0, 0.0), (1.0, 0.0)]),
        ]);
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(merged, vec![line(&[(5.0, 0.0), (1.0, 0.0), (0.0, 0.0)])]);
    }

    #[test]
    fn equal_runs_go_forwards() {
        let mut merger = LineMerger::from_lines([
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(2.0, 0.0), (1.0, 0.0)]),
        ]);
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(merged, vec![line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])]);
    }

    #[test]
    fn branches_are_kept() {
        let mut merger = LineMerger::from_lines([
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(1.0, 0.0), (2.0, 0.0)]),
            line(&[(2.0, 0.0), (3.0, 0.0)]),
            line(&[(2.0, 0.0), (2.0, 1.0)]),
            line(&[(2.0, 1.0), (2.0, 2.0)]),
        ]);
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(merged.len(), 3);
        assert!(merged.contains(&line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])));
        assert!(merged.contains(&line(&[(2.0, 0.0), (3.0, 0.0)])));
        assert!(merged.contains(&line(&[(2.0, 0.0), (2.0, 1.0), (2.0, 2.0)])));
        assert_no_interior_degree_two(&merger);
        assert!(merger.graph().validate().is_ok());
    }

    #[test]
    fn merging_twice_is_idempotent() {
        let mut merger = LineMerger::from_lines([
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(1.0, 1.0), (1.0, 0.0)]),
            line(&[(1.0, 1.0), (0.0, 2.0)]),
        ]);
        let first = merger.merged_line_strings().unwrap();
        assert!(!merger.is_dirty());
        let second = merger.merged_line_strings().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn simple_line_round_trips() {
        let original = line(&[(0.0, 0.0), (3.0, 1.0), (4.0, 4.0), (8.0, 2.0), (9.0, 9.0)]);
        let mut merger = LineMerger::from_lines(
            original
                .segments()
                .map(|(a, b)| LineString::segment(*a, *b, false)),
        );
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(merged.len(), 1);
        assert!(merged[0].equals_either_direction(&original, 0.0));
    }

    #[test]
    fn ring_starts_at_lowest_node() {
        let mut merger = LineMerger::from_lines([
            line(&[(1.0, 1.0), (0.0, 1.0)]),
            line(&[(0.0, 1.0), (0.0, 0.0)]),
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(1.0, 0.0), (1.0, 1.0)]),
        ]);
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(
            merged,
            vec![line(&[
                (0.0, 0.0),
                (1.0, 0.0),
                (1.0, 1.0),
                (0.0, 1.0),
                (0.0, 0.0)
            ])]
        );
        assert_no_interior_degree_two(&merger);
        assert!(merger.graph().validate().is_ok());
    }

    #[test]
    fn ring_walked_mostly_backwards_is_reversed() {
        let mut merger = LineMerger::from_lines([
            line(&[(0.0, 0.0), (10.0, 0.0)]),
            line(&[(10.0, 10.0), (10.0, 0.0)]),
            line(&[(0.0, 10.0), (10.0, 10.0)]),
            line(&[(0.0, 0.0), (0.0, 10.0)]),
        ]);
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(
            merged,
            vec![line(&[
                (0.0, 0.0),
                (0.0, 10.0),
                (10.0, 10.0),
                (10.0, 0.0),
                (0.0, 0.0)
            ])]
        );
        assert_eq!(merger.graph().node_count(), 1);
        assert!(merger.graph().validate().is_ok());
    }

    #[test]
    fn cleaned_figure_eight_merges_into_two_loops() {
        init_tracing();
        let source: LineString = "LINESTRING(0 0,10 10,10 0,0 10,0 0)".parse().unwrap();
        let mut cleaned = LineStringGraph::new(&source);
        assert_eq!(cleaned.split_crossing_edges().unwrap(), 1);

        let mut merger = LineMerger::from_lines(cleaned.lines());
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(
            merged,
            vec![
                line(&[(5.0, 5.0), (10.0, 10.0), (10.0, 0.0), (5.0, 5.0)]),
                line(&[(5.0, 5.0), (0.0, 10.0), (0.0, 0.0), (5.0, 5.0)]),
            ]
        );
        let centre = merger.graph().node_at(&Point3::new(5.0, 5.0, 0.0)).unwrap();
        assert_eq!(merger.graph().degree(centre).unwrap(), 4);
        assert_eq!(merger.graph().node_count(), 1);
        assert!(merger.graph().validate().is_ok());
    }

    #[test]
    fn loop_hanging_off_a_branch() {
        let mut merger = LineMerger::from_lines([
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(1.0, 0.0), (2.0, 1.0)]),
            line(&[(2.0, 1.0), (2.0, -1.0)]),
            line(&[(2.0, -1.0), (1.0, 0.0)]),
        ]);
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(
            merged,
            vec![
                line(&[(0.0, 0.0), (1.0, 0.0)]),
                line(&[(1.0, 0.0), (2.0, 1.0), (2.0, -1.0), (1.0, 0.0)]),
            ]
        );
        let branch = merger.graph().node_at(&Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(merger.graph().degree(branch).unwrap(), 3);
    }

    #[test]
    fn closed_line_is_left_alone() {
        let ring = line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let mut merger = LineMerger::from_lines([ring.clone()]);
        assert_eq!(merger.merged_line_strings().unwrap(), vec![ring]);
    }

    #[test]
    fn dirty_only_on_change() {
        let mut merger = LineMerger::new();
        assert!(!merger.is_dirty());
        assert!(!merger.add(line(&[(1.0, 1.0), (1.0, 1.0)])));
        assert!(!merger.is_dirty());

        assert!(merger.add(line(&[(0.0, 0.0), (1.0, 0.0)])));
        assert!(merger.is_dirty());
        merger.merge().unwrap();
        assert!(!merger.is_dirty());

        assert!(!merger.add(line(&[(1.0, 0.0), (0.0, 0.0)])));
        assert!(!merger.is_dirty());
        assert!(!merger.remove(&line(&[(5.0, 5.0), (6.0, 6.0)])));
        assert!(!merger.is_dirty());

        assert!(merger.remove(&line(&[(1.0, 0.0), (0.0, 0.0)])));
        assert!(merger.is_dirty());
        assert!(merger.merged_line_strings().unwrap().is_empty());
    }

    #[test]
    fn add_then_remove_before_merge() {
        let a = line(&[(0.0, 0.0), (1.0, 0.0)]);
        let b = line(&[(1.0, 0.0), (2.0, 0.0)]);
        let c = line(&[(2.0, 0.0), (3.0, 0.0)]);
        let mut merger = LineMerger::new();
        assert_eq!(merger.add_all([a.clone(), b.clone(), c]), 3);
        assert_eq!(merger.remove_all(&[b, line(&[(9.0, 9.0), (8.0, 8.0)])]), 1);
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], a);
    }

    #[test]
    fn merging_after_more_lines_are_added() {
        let mut merger = LineMerger::from_lines([
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(1.0, 0.0), (2.0, 0.0)]),
        ]);
        merger.merge().unwrap();
        merger.add(line(&[(2.0, 0.0), (3.0, 0.0)]));
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(
            merged,
            vec![line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])]
        );
    }

    #[test]
    fn near_endpoints_join_under_tolerance() {
        let config = GraphConfig::new().with_node_tolerance(0.01);
        let mut merger = LineMerger::with_config(&config).unwrap();
        merger.add(line(&[(0.0, 0.0), (1.0, 0.0)]));
        merger.add(line(&[(1.004, 0.0), (2.0, 0.0)]));
        let merged = merger.merged_line_strings().unwrap();
        assert_eq!(merged, vec![line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])]);
    }
}
