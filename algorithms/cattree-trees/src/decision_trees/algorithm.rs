//! Categorical decision trees
//!
use std::fmt;

use log::{debug, trace};
use ndarray::Array1;

use super::{select_best_attribute, DecisionTreeValidParams, NodeIter, TextDump};
use cattree::{
    error::{Error, Result},
    metrics::{ConfusionByClass, Metrics},
    traits::*,
    Dataset, Row,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Identifier of a node, unique within its tree
pub type NodeId = usize;

/// The role of a node in the tree
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeLabel {
    /// Placeholder of a node which has not been grown yet
    Unlabeled,
    /// Internal node splitting on the named attribute
    Attribute(String),
    /// Leaf carrying a decision value
    Decision(String),
}

impl NodeLabel {
    pub fn is_decision(&self) -> bool {
        matches!(self, NodeLabel::Decision(_))
    }

    /// Returns the decision value of a leaf label
    pub fn decision(&self) -> Option<&str> {
        match self {
            NodeLabel::Decision(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the attribute name of a splitting label
    pub fn attribute(&self) -> Option<&str> {
        match self {
            NodeLabel::Attribute(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NodeLabel::Unlabeled => write!(f, "node"),
            NodeLabel::Attribute(name) => write!(f, "{}", name),
            NodeLabel::Decision(value) => write!(f, "DECISION: {}", value),
        }
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
/// A node in the decision tree
///
/// Children are owned exclusively by their parent. The parent itself is only referenced by its
/// id, which is assigned when the node becomes part of a [`DecisionTree`].
pub struct TreeNode {
    pub(crate) id: NodeId,
    pub(crate) label: NodeLabel,
    pub(crate) edge_value: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a detached node without children
    pub fn new(label: NodeLabel) -> Self {
        TreeNode {
            id: 0,
            label,
            edge_value: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates a node which still has to be grown
    pub fn unlabeled() -> Self {
        Self::new(NodeLabel::Unlabeled)
    }

    /// Creates a leaf carrying `decision`
    pub fn leaf<S: Into<String>>(decision: S) -> Self {
        Self::new(NodeLabel::Decision(decision.into()))
    }

    /// Sets the value of the parent's attribute leading to this node
    pub fn with_edge_value<S: Into<String>>(mut self, edge_value: S) -> Self {
        self.edge_value = Some(edge_value.into());
        self
    }

    /// Appends children, in order
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &NodeLabel {
        &self.label
    }

    pub fn edge_value(&self) -> Option<&str> {
        self.edge_value.as_deref()
    }

    /// Id of the parent node, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `Some(decision)` for decision nodes and `None` otherwise
    pub fn prediction(&self) -> Option<&str> {
        self.label.decision()
    }

    /// The child reached by following the edge `value`
    pub fn child_by_value(&self, value: &str) -> Option<&TreeNode> {
        self.children
            .iter()
            .find(|child| child.edge_value.as_deref() == Some(value))
    }

    /// Edge values of all children, in order
    pub fn child_values(&self) -> Vec<Option<&str>> {
        self.children.iter().map(|child| child.edge_value()).collect()
    }

    /// Looks up a node of this subtree by id
    pub fn find(&self, id: NodeId) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }

        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of edges on the longest path from this node to a leaf
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Recursively grows the node on `dataset`
    ///
    /// A node which already carries a decision is left untouched. Otherwise the attribute with
    /// the largest gain ratio becomes the label of this node and one child is grown for every
    /// value of that attribute. If no attribute improves the split by more than the stop
    /// threshold, the node becomes a leaf carrying the smallest decision value present.
    pub(crate) fn grow(
        &mut self,
        dataset: &Dataset,
        params: &DecisionTreeValidParams,
    ) -> Result<()> {
        if self.label.is_decision() {
            return Ok(());
        }

        if dataset.is_empty() {
            return Err(Error::DegenerateDataset(
                "cannot grow a node without training rows".into(),
            ));
        }

        let attribute = match select_best_attribute(dataset)? {
            Some((attribute, ratio)) if ratio.abs() > params.stop_threshold() => {
                debug!(
                    "splitting {} rows on {} with gain ratio {:.4}",
                    dataset.nsamples(),
                    attribute,
                    ratio
                );
                attribute
            }
            _ => {
                let decision = dataset.labels().into_iter().next().ok_or_else(|| {
                    Error::DegenerateDataset("no decision values left".into())
                })?;
                trace!("leaf {} on {} rows", decision, dataset.nsamples());

                self.label = NodeLabel::Decision(decision);
                self.children.clear();
                return Ok(());
            }
        };

        let partitions = dataset.partition_by(&attribute)?;
        self.label = NodeLabel::Attribute(attribute);
        self.children.clear();

        for (value, partition) in partitions {
            let mut decisions = partition.labels();
            // pure partitions become leaves right away
            let mut child = if decisions.len() == 1 {
                TreeNode::new(NodeLabel::Decision(decisions.remove(0)))
            } else {
                TreeNode::unlabeled()
            }
            .with_edge_value(value);

            child.grow(&partition, params)?;
            self.children.push(child);
        }

        Ok(())
    }

    /// Classify a row by following the edges matching its attribute values
    ///
    /// Returns `None` if the path leads to a value which was not seen during training, or ends
    /// at a node which was never grown.
    pub fn predict_row<'a>(&'a self, row: &Row) -> Option<&'a str> {
        match &self.label {
            NodeLabel::Decision(value) => Some(value),
            NodeLabel::Attribute(attribute) => {
                let value = row.value(attribute)?;
                self.child_by_value(value)?.predict_row(row)
            }
            NodeLabel::Unlabeled => None,
        }
    }

    /// Fraction of rows classified correctly by this subtree
    ///
    /// A row also counts as a hit if this node's own label already is the row's decision, so a
    /// candidate label can be tested before the subtree is collapsed. Without rows the accuracy
    /// is zero.
    pub fn test_subtree(&self, data: &Dataset) -> f64 {
        if data.is_empty() {
            return 0.0;
        }

        let own = self.label.decision();
        let hits = data
            .rows()
            .filter(|row| {
                let actual = row.target();
                self.predict_row(row) == Some(actual) || own == Some(actual)
            })
            .count();

        hits as f64 / data.nsamples() as f64
    }

    /// Assigns ids in pre-order, starting at `next_id`, and links every child to its parent
    fn assign_ids(&mut self, next_id: &mut NodeId, parent: Option<NodeId>) {
        self.id = *next_id;
        self.parent = parent;
        *next_id += 1;

        let id = self.id;
        for child in self.children.iter_mut() {
            child.assign_ids(next_id, Some(id));
        }
    }
}

/// A fitted decision tree model for categorical classification.
///
/// ### Structure
/// A decision tree is a multi-way tree where:
/// * Each internal node names an attribute and has one child for every value of this attribute
///   observed in its training rows. The value is stored as the child's edge value.
///
/// * leaf nodes carry a decision
///
/// ### Algorithm
///
/// Starting with a single root node, decision trees are trained recursively by applying the following rule to every
/// node considered:
///
/// * Compute the gain ratio of every attribute on the rows belonging to the node;
/// * If the largest gain ratio does not exceed the stop threshold, the node becomes a leaf carrying the
///   lexicographically smallest decision among its rows;
/// * Otherwise the rows are partitioned by the values of the best attribute. Partitions with a single decision
///   become leaves, the others are grown recursively.
///
/// ### Predictions
///
/// To predict the decision of a row, the tree is traversed from the root, following at every internal node the
/// edge matching the row's value of the node's attribute. A row with a value not seen during training is
/// unclassifiable and predicted as `None`.
///
/// ### Example
///
/// ```rust
/// use cattree::prelude::*;
/// use cattree_trees::DecisionTree;
///
/// let dataset = Dataset::from_rows(&[
///     ["low", "yes"],
///     ["low", "yes"],
///     ["high", "no"],
///     ["high", "no"],
/// ])
/// .unwrap();
///
/// // Fit the tree
/// let tree = DecisionTree::params().fit(&dataset).unwrap();
/// // Get accuracy on training set
/// let metrics = tree.evaluate(&dataset);
///
/// assert_eq!(metrics.accuracy, 100.0);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    pub(crate) root_node: TreeNode,
}

impl Fit for DecisionTreeValidParams {
    type Object = DecisionTree;

    /// Grow a decision tree on `dataset` using the stop threshold of these hyperparameters.
    fn fit(&self, dataset: &Dataset) -> Result<Self::Object> {
        let root = self.build(TreeNode::unlabeled(), dataset)?;

        Ok(DecisionTree::from_root(root))
    }
}

impl DecisionTreeValidParams {
    /// Grow `root` on `dataset` and return it
    ///
    /// A root which already carries a decision is returned unchanged. Ids are assigned in
    /// pre-order starting with zero at the root, and every child is linked to its parent.
    pub fn build(&self, mut root: TreeNode, dataset: &Dataset) -> Result<TreeNode> {
        root.grow(dataset, self)?;

        let mut next_id = 0;
        root.assign_ids(&mut next_id, None);

        Ok(root)
    }
}

impl Predict<Array1<Option<String>>> for DecisionTree {
    /// Make predictions for each row of `x`, `None` for unclassifiable rows
    fn predict(&self, x: &Dataset) -> Array1<Option<String>> {
        x.rows()
            .map(|row| self.predict_row(&row).map(str::to_string))
            .collect()
    }
}

impl DecisionTree {
    /// Assemble a tree from a root node
    ///
    /// Node ids are reassigned in pre-order starting with zero at the root, and every child is
    /// linked to its parent.
    pub fn from_root(mut root_node: TreeNode) -> Self {
        let mut next_id = 0;
        root_node.assign_ids(&mut next_id, None);

        DecisionTree { root_node }
    }

    /// Return root node of the tree
    pub fn root_node(&self) -> &TreeNode {
        &self.root_node
    }

    /// Create a node iterator in pre-order (DFS)
    pub fn iter_nodes(&self) -> NodeIter<'_> {
        NodeIter::new(vec![&self.root_node])
    }

    /// Looks up a node by id
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.root_node.find(id)
    }

    /// Return max depth of the tree
    pub fn depth(&self) -> usize {
        self.root_node.depth()
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|node| node.is_leaf()).count()
    }

    /// Return the number of nodes in this tree
    pub fn num_nodes(&self) -> usize {
        self.iter_nodes().count()
    }

    /// Classify a single row
    pub fn predict_row(&self, row: &Row) -> Option<&str> {
        self.root_node.predict_row(row)
    }

    /// Fraction of rows of `data` classified correctly
    pub fn test(&self, data: &Dataset) -> f64 {
        self.root_node.test_subtree(data)
    }

    /// Count predictions on `data` against its decisions, one-vs-rest for every class
    pub fn confusion_by_class(&self, data: &Dataset, classes: &[String]) -> ConfusionByClass {
        ConfusionByClass::new(
            data.rows().map(|row| self.predict_row(&row)),
            data.targets().iter().map(String::as_str),
            classes,
        )
    }

    /// Average accuracy, recall and precision on `data`, over the decisions present in `data`
    pub fn evaluate(&self, data: &Dataset) -> Metrics {
        self.confusion_by_class(data, &data.labels()).evaluate()
    }

    /// Generates a [`TextDump`](struct.TextDump.html) structure to render the tree as
    /// indented text, with the following default parameters:
    ///
    /// * `compact=false`
    ///
    pub fn export_to_text(&self) -> TextDump<'_> {
        TextDump::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cattree::ParamGuard;

    fn two_level() -> Dataset {
        Dataset::from_rows(&[
            ["low", "a", "yes"],
            ["low", "b", "yes"],
            ["high", "a", "no"],
            ["high", "b", "no"],
        ])
        .unwrap()
    }

    #[test]
    fn perfect_split_builds_two_leaves() -> Result<()> {
        let tree = DecisionTree::params().fit(&two_level())?;
        let root = tree.root_node();

        assert_eq!(root.label(), &NodeLabel::Attribute("c1".into()));
        assert_eq!(root.edge_value(), None);
        assert_eq!(root.child_values(), vec![Some("high"), Some("low")]);

        let low = root.child_by_value("low").unwrap();
        assert_eq!(low.label(), &NodeLabel::Decision("yes".into()));
        assert_eq!(low.label().to_string(), "DECISION: yes");
        assert!(low.is_leaf());

        let high = root.child_by_value("high").unwrap();
        assert_eq!(high.prediction(), Some("no"));
        assert_eq!(high.parent(), Some(root.id()));

        Ok(())
    }

    #[test]
    fn single_decision_gives_single_leaf() -> Result<()> {
        let dataset = Dataset::from_rows(&[
            ["low", "a", "yes"],
            ["high", "b", "yes"],
            ["mid", "a", "yes"],
        ])?;

        let tree = DecisionTree::params().fit(&dataset)?;
        assert_eq!(tree.num_nodes(), 1);
        assert_eq!(tree.root_node().prediction(), Some("yes"));

        Ok(())
    }

    #[test]
    fn unsplittable_rows_take_smallest_decision() -> Result<()> {
        let dataset = Dataset::from_rows(&[
            ["same", "yes"],
            ["same", "no"],
            ["same", "maybe"],
        ])?;

        let tree = DecisionTree::params().fit(&dataset)?;
        assert_eq!(tree.root_node().prediction(), Some("maybe"));
        assert_eq!(tree.depth(), 0);

        Ok(())
    }

    #[test]
    fn stop_threshold_turns_weak_splits_into_leaves() -> Result<()> {
        let dataset = Dataset::from_rows(&[
            ["a", "yes"],
            ["a", "yes"],
            ["a", "no"],
            ["b", "no"],
            ["b", "no"],
            ["b", "yes"],
        ])?;

        let tree = DecisionTree::params().fit(&dataset)?;
        assert_eq!(tree.root_node().label().attribute(), Some("c1"));

        let tree = DecisionTree::params().stop_threshold(0.5).fit(&dataset)?;
        assert_eq!(tree.root_node().prediction(), Some("no"));

        Ok(())
    }

    #[test]
    fn nested_split() -> Result<()> {
        let dataset = Dataset::from_rows(&[
            ["sunny", "high", "no"],
            ["sunny", "normal", "yes"],
            ["sunny", "high", "no"],
            ["rain", "high", "yes"],
            ["rain", "normal", "yes"],
        ])?;

        let tree = DecisionTree::params().fit(&dataset)?;
        let root = tree.root_node();
        // c1 and c2 have the same gain ratio, the first one wins
        assert_eq!(root.label().attribute(), Some("c1"));
        assert_eq!(root.child_by_value("rain").unwrap().prediction(), Some("yes"));

        let sunny = root.child_by_value("sunny").unwrap();
        assert_eq!(sunny.label().attribute(), Some("c2"));
        assert_eq!(sunny.child_by_value("high").unwrap().prediction(), Some("no"));
        assert_eq!(sunny.child_by_value("normal").unwrap().prediction(), Some("yes"));
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.num_leaves(), 3);

        // every training row is classified correctly
        for row in dataset.rows() {
            assert_eq!(tree.predict_row(&row), Some(row.target()));
        }
        assert_eq!(tree.test(&dataset), 1.0);

        Ok(())
    }

    #[test]
    fn empty_dataset_is_degenerate() {
        let dataset = two_level().slice_rows(0, 0).unwrap();

        assert!(matches!(
            DecisionTree::params().fit(&dataset),
            Err(Error::DegenerateDataset(_))
        ));
    }

    #[test]
    fn decision_root_is_not_regrown() -> Result<()> {
        let params = DecisionTree::params().check()?;
        let root = params.build(TreeNode::leaf("no"), &two_level())?;

        assert_eq!(root, TreeNode::leaf("no"));

        Ok(())
    }

    #[test]
    fn unseen_values_are_unclassifiable() -> Result<()> {
        let tree = DecisionTree::params().fit(&two_level())?;
        let unseen = Dataset::from_rows(&[["medium", "a", "yes"], ["low", "c", "yes"]])?;

        let predictions = tree.predict(&unseen);
        assert_eq!(predictions[0], None);
        assert_eq!(predictions[1], Some("yes".to_string()));

        Ok(())
    }

    #[test]
    fn ids_and_parents_are_assigned_in_preorder() {
        let tree = DecisionTree::from_root(
            TreeNode::new(NodeLabel::Attribute("c1".into())).with_children(vec![
                TreeNode::leaf("B").with_edge_value("0"),
                TreeNode::new(NodeLabel::Attribute("c2".into()))
                    .with_edge_value("1")
                    .with_children(vec![
                        TreeNode::leaf("A").with_edge_value("no"),
                        TreeNode::leaf("A").with_edge_value("yes"),
                    ]),
            ]),
        );

        let ids = tree.iter_nodes().map(|node| node.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(tree.node(3).unwrap().parent(), Some(2));
        assert_eq!(tree.node(2).unwrap().parent(), Some(0));
        assert_eq!(tree.node(0).unwrap().parent(), None);
        assert!(tree.node(5).is_none());
    }

    #[test]
    fn build_links_children_to_parents() -> Result<()> {
        let dataset = Dataset::from_rows(&[
            ["sunny", "high", "no"],
            ["sunny", "normal", "yes"],
            ["rain", "high", "yes"],
            ["rain", "normal", "yes"],
        ])?;
        let params = DecisionTree::params().check()?;
        let root = params.build(TreeNode::unlabeled(), &dataset)?;

        assert_eq!(root.id(), 0);
        assert_eq!(root.parent(), None);

        let mut stack = vec![&root];
        let mut ids = Vec::new();
        while let Some(node) = stack.pop() {
            ids.push(node.id());
            for child in node.children() {
                assert_eq!(child.parent(), Some(node.id()));
                assert_eq!(root.find(child.id()), Some(child));
                stack.push(child);
            }
        }

        ids.sort_unstable();
        assert_eq!(ids, (0..5).collect::<Vec<_>>());

        Ok(())
    }

    #[test]
    fn test_subtree_counts_own_label() {
        let node = TreeNode::new(NodeLabel::Decision("yes".into()));
        let data = two_level();

        assert_eq!(node.test_subtree(&data), 0.5);
        assert_eq!(TreeNode::unlabeled().test_subtree(&data), 0.0);
        assert_eq!(node.test_subtree(&data.slice_rows(0, 0).unwrap()), 0.0);
    }
}
