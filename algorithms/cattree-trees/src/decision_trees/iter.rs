use std::iter::Iterator;

use super::TreeNode;

/// Pre-order (DFS) iterator of nodes in a decision tree
pub struct NodeIter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> NodeIter<'a> {
    pub fn new(stack: Vec<&'a TreeNode>) -> Self {
        NodeIter { stack }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop().map(|node| {
            // reversed, so the first child is visited next
            node.children()
                .iter()
                .rev()
                .for_each(|child| self.stack.push(child));

            node
        })
    }
}
