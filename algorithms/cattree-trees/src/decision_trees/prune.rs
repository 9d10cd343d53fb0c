//! Pruning of fitted trees
//!
//! Both strategies work bottom-up: the children of a node are pruned first and the labels they
//! end up with decide whether the node itself collapses into a leaf. Collapsing drops the
//! children, and with them the whole subtree.
use std::collections::HashMap;

use log::debug;

use super::{DecisionTree, NodeLabel, TreeNode};
use cattree::{error::Result, Dataset};

/// Finds the label occurring most often, with its count
///
/// Returns `None` if several labels share the highest count.
fn dominant_label(labels: &[NodeLabel]) -> Option<(&NodeLabel, usize)> {
    let mut frequencies: HashMap<&NodeLabel, usize> = HashMap::new();
    for label in labels {
        *frequencies.entry(label).or_insert(0) += 1;
    }

    let max = *frequencies.values().max()?;
    let mut winners = frequencies.into_iter().filter(|(_, count)| *count == max);
    let winner = winners.next()?;

    if winners.next().is_some() {
        None
    } else {
        Some(winner)
    }
}

impl TreeNode {
    fn collapse(&mut self, decision: NodeLabel) {
        debug!(
            "collapsing node {} ({} children) into {}",
            self.id,
            self.children.len(),
            decision
        );

        self.label = decision;
        self.children.clear();
    }

    /// Collapse subtrees whose children mostly agree on a decision
    ///
    /// Returns the label of this node after pruning.
    pub(crate) fn prune_by_frequency(&mut self, threshold: f64) -> NodeLabel {
        if self.children.is_empty() {
            return self.label.clone();
        }

        let labels = self
            .children
            .iter_mut()
            .map(|child| child.prune_by_frequency(threshold))
            .collect::<Vec<_>>();

        let collapse_into = dominant_label(&labels).and_then(|(label, count)| {
            let share = count as f64 / labels.len() as f64;
            if label.is_decision() && share >= threshold {
                Some(label.clone())
            } else {
                None
            }
        });

        if let Some(decision) = collapse_into {
            self.collapse(decision);
        }

        self.label.clone()
    }

    /// Collapse subtrees which do not classify the validation rows significantly better than a
    /// single leaf
    ///
    /// The root is never collapsed, but its children are. Returns the label of this node after
    /// pruning.
    pub(crate) fn prune_by_validation(
        &mut self,
        validation: &Dataset,
        is_root: bool,
    ) -> Result<NodeLabel> {
        let attribute = match self.label.attribute() {
            Some(attribute) if !self.children.is_empty() && !validation.is_empty() => {
                attribute.to_string()
            }
            _ => return Ok(self.label.clone()),
        };

        let partitions = validation.partition_by(&attribute)?;

        let mut labels = Vec::with_capacity(self.children.len());
        for child in self.children.iter_mut() {
            let rows = partitions
                .iter()
                .find(|(value, _)| child.edge_value.as_deref() == Some(value.as_str()));

            let label = match rows {
                Some((_, rows)) => child.prune_by_validation(rows, false)?,
                None => child.label.clone(),
            };
            labels.push(label);
        }

        if is_root {
            return Ok(self.label.clone());
        }

        let decision = match dominant_label(&labels) {
            Some((label, _)) if label.is_decision() => label.clone(),
            _ => return Ok(self.label.clone()),
        };

        let n = validation.nsamples() as f64;
        let subtree_error = 1.0 - self.test_subtree(validation);
        let leaf_error = 1.0 - TreeNode::new(decision.clone()).test_subtree(validation);
        let bound = subtree_error + (subtree_error * (1.0 - subtree_error) / n).sqrt();

        if leaf_error <= bound {
            self.collapse(decision);
        }

        Ok(self.label.clone())
    }
}

impl DecisionTree {
    /// Prune the tree without validation data
    ///
    /// Post-order: a node collapses into the decision shared by the largest number of its
    /// (already pruned) children if that decision is unique and its share of the children
    /// reaches `threshold`. Applying this twice gives the same tree as applying it once.
    ///
    /// Returns the label of the root after pruning.
    pub fn prune(&mut self, threshold: f64) -> NodeLabel {
        self.root_node.prune_by_frequency(threshold)
    }

    /// Prune the tree against held-out validation rows
    ///
    /// The validation rows are routed down the tree alongside its edges. A node other than the
    /// root collapses into the dominant decision of its children if the error of that single
    /// leaf on the node's validation rows stays within one standard error of the error of the
    /// whole subtree:
    ///
    /// `leaf_error <= subtree_error + sqrt(subtree_error * (1 - subtree_error) / n)`
    ///
    /// Nodes which receive no validation rows are left unchanged.
    pub fn prune_with_validation(&mut self, validation: &Dataset) -> Result<NodeLabel> {
        self.root_node.prune_by_validation(validation, true)
    }
}
