use std::fmt;

use super::{DecisionTree, TreeNode};

const INDENT: &str = "   ";

/// Struct to render a decision tree as indented text
///
/// The full form lists every node with its id, label, edge value and parent, and nests the
/// children below it. The compact form only shows the splitting attributes, the edge values and
/// the decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextDump<'a> {
    tree: &'a DecisionTree,
    compact: bool,
}

impl<'a> TextDump<'a> {
    /// Creates a new TextDump structure from a decision tree
    /// with the following default parameters:
    ///
    /// * `compact=false`
    pub fn new(tree: &'a DecisionTree) -> Self {
        TextDump {
            tree,
            compact: false,
        }
    }

    /// Whether to render only attributes, edge values and decisions
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    fn format_node(f: &mut fmt::Formatter, node: &TreeNode, depth: usize) -> fmt::Result {
        let indent = INDENT.repeat(depth);

        if depth > 0 {
            writeln!(f)?;
        }
        writeln!(f, "{}ID: {}", indent, node.id())?;
        writeln!(f, "{}Label: {}", indent, node.label())?;
        writeln!(f, "{}Value: {}", indent, node.edge_value().unwrap_or("None"))?;
        match node.parent() {
            Some(parent) => writeln!(f, "{}Parent: {}", indent, parent)?,
            None => writeln!(f, "{}Parent: None", indent)?,
        }

        if !node.is_leaf() {
            writeln!(f, "{}Children:", indent)?;
            for child in node.children() {
                Self::format_node(f, child, depth + 1)?;
            }
        }

        Ok(())
    }

    fn format_compact(f: &mut fmt::Formatter, node: &TreeNode, depth: usize) -> fmt::Result {
        if let Some(decision) = node.prediction() {
            return write!(f, "D: {}", decision);
        }

        match node.label().attribute() {
            Some(attribute) => write!(f, "Attribute: {}", attribute)?,
            None => write!(f, "{}", node.label())?,
        }

        let indent = INDENT.repeat(depth + 1);
        for child in node.children() {
            write!(f, "\n{}{} -> ", indent, child.edge_value().unwrap_or("None"))?;
            Self::format_compact(f, child, depth + 1)?;
        }

        Ok(())
    }
}

impl fmt::Display for TextDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.compact {
            Self::format_compact(f, self.tree.root_node(), 0)?;
            writeln!(f)
        } else {
            Self::format_node(f, self.tree.root_node(), 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeLabel;

    fn tree() -> DecisionTree {
        DecisionTree::from_root(
            TreeNode::new(NodeLabel::Attribute("outlook".into())).with_children(vec![
                TreeNode::leaf("yes").with_edge_value("overcast"),
                TreeNode::new(NodeLabel::Attribute("humidity".into()))
                    .with_edge_value("sunny")
                    .with_children(vec![
                        TreeNode::leaf("no").with_edge_value("high"),
                        TreeNode::leaf("yes").with_edge_value("normal"),
                    ]),
            ]),
        )
    }

    #[test]
    fn full_dump() {
        let expected = "\
ID: 0
Label: outlook
Value: None
Parent: None
Children:

   ID: 1
   Label: DECISION: yes
   Value: overcast
   Parent: 0

   ID: 2
   Label: humidity
   Value: sunny
   Parent: 0
   Children:

      ID: 3
      Label: DECISION: no
      Value: high
      Parent: 2

      ID: 4
      Label: DECISION: yes
      Value: normal
      Parent: 2
";

        assert_eq!(tree().export_to_text().to_string(), expected);
    }

    #[test]
    fn dump_contains_every_node() {
        let tree = tree();
        let text = tree.export_to_text().to_string();

        for node in tree.iter_nodes() {
            assert!(text.contains(&format!("ID: {}\n", node.id())));
        }
    }

    #[test]
    fn compact_dump() {
        let expected = "\
Attribute: outlook
   overcast -> D: yes
   sunny -> Attribute: humidity
      high -> D: no
      normal -> D: yes
";

        assert_eq!(tree().export_to_text().compact(true).to_string(), expected);
    }

    #[test]
    fn single_leaf() {
        let tree = DecisionTree::from_root(TreeNode::leaf("yes"));

        assert_eq!(tree.export_to_text().compact(true).to_string(), "D: yes\n");
        assert_eq!(
            tree.export_to_text().to_string(),
            "ID: 0\nLabel: DECISION: yes\nValue: None\nParent: None\n"
        );
    }
}
