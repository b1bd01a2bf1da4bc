use crate::error::ModelError;
use core_types::{DeskAssignment, HierarchyLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The address of a node in the desk tree: hierarchy labels from business
/// unit downward. The empty path is the root ("(all)") above all business
/// units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The hierarchy level this path addresses; `None` for the root.
    pub fn level(&self) -> Option<HierarchyLevel> {
        HierarchyLevel::from_depth(self.depth())
    }

    /// The label of the node itself (the last path segment).
    pub fn name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("(all)")
    }

    pub fn parent(&self) -> Option<NodePath> {
        if self.0.is_empty() {
            return None;
        }
        Some(NodePath(self.0[..self.0.len() - 1].to_vec()))
    }

    pub fn child(&self, name: impl Into<String>) -> NodePath {
        let mut segments = self.0.clone();
        segments.push(name.into());
        NodePath(segments)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "(all)")
        } else {
            write!(f, "{}", self.0.join(" / "))
        }
    }
}

impl From<&[&str]> for NodePath {
    fn from(segments: &[&str]) -> Self {
        NodePath(segments.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Debug, Clone)]
struct TreeNode {
    name: String,
    children: Vec<TreeNode>,
    /// Set on leaf nodes only: the book that lives at this path.
    book_id: Option<String>,
}

impl TreeNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
            book_id: None,
        }
    }

    fn child_mut(&mut self, name: &str) -> &mut TreeNode {
        let index = match self.children.iter().position(|c| c.name == name) {
            Some(i) => i,
            None => {
                self.children.push(TreeNode::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }
}

/// The four-level trading-book hierarchy, materialized from the desk table.
///
/// Business Unit → Sub Business Unit → Trading Desk → Book, with a synthetic
/// root above the business units so portfolio-wide figures have a node too.
/// Sibling order follows first appearance in the desk table.
#[derive(Debug, Clone)]
pub struct DeskTree {
    root: TreeNode,
}

impl DeskTree {
    pub fn build(assignments: &[DeskAssignment]) -> Result<Self, ModelError> {
        let mut root = TreeNode::new("(all)");
        for assignment in assignments {
            let mut node = &mut root;
            for segment in assignment.path_segments() {
                node = node.child_mut(segment);
            }
            if let Some(existing) = &node.book_id {
                return Err(ModelError::AmbiguousBook {
                    path: NodePath::new(
                        assignment
                            .path_segments()
                            .iter()
                            .map(|s| s.to_string())
                            .collect(),
                    ),
                    first: existing.clone(),
                    second: assignment.book_id.clone(),
                });
            }
            node.book_id = Some(assignment.book_id.clone());
        }
        Ok(Self { root })
    }

    fn node(&self, path: &NodePath) -> Option<&TreeNode> {
        let mut node = &self.root;
        for segment in path.segments() {
            node = node.children.iter().find(|c| &c.name == segment)?;
        }
        Some(node)
    }

    pub fn contains(&self, path: &NodePath) -> bool {
        self.node(path).is_some()
    }

    /// The paths of a node's direct children, or `None` if the node does not
    /// exist.
    pub fn children(&self, path: &NodePath) -> Option<Vec<NodePath>> {
        let node = self.node(path)?;
        Some(
            node.children
                .iter()
                .map(|c| path.child(c.name.clone()))
                .collect(),
        )
    }

    /// All node paths in pre-order, root first.
    pub fn paths(&self) -> Vec<NodePath> {
        let mut out = Vec::new();
        collect_paths(&self.root, NodePath::root(), &mut out);
        out
    }

    /// The book ids of every leaf under the given node, or `None` if the node
    /// does not exist.
    pub fn book_ids_under(&self, path: &NodePath) -> Option<Vec<&str>> {
        let node = self.node(path)?;
        let mut books = Vec::new();
        collect_books(node, &mut books);
        Some(books)
    }
}

fn collect_paths(node: &TreeNode, path: NodePath, out: &mut Vec<NodePath>) {
    out.push(path.clone());
    for child in &node.children {
        collect_paths(child, path.child(child.name.clone()), out);
    }
}

fn collect_books<'a>(node: &'a TreeNode, out: &mut Vec<&'a str>) {
    if let Some(book_id) = &node.book_id {
        out.push(book_id);
    }
    for child in &node.children {
        collect_books(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(book_id: &str, segments: [&str; 4]) -> DeskAssignment {
        DeskAssignment {
            book_id: book_id.to_string(),
            business_unit: segments[0].to_string(),
            sub_business_unit: segments[1].to_string(),
            trading_desk: segments[2].to_string(),
            book: segments[3].to_string(),
        }
    }

    fn sample_tree() -> DeskTree {
        DeskTree::build(&[
            assignment("B_01", ["Forex", "FX Options", "EMEA Vol", "Book A"]),
            assignment("B_02", ["Forex", "FX Options", "EMEA Vol", "Book B"]),
            assignment("B_03", ["Forex", "FX Spot", "Americas Flow", "Book C"]),
        ])
        .unwrap()
    }

    #[test]
    fn shared_prefixes_merge_into_one_branch() {
        let tree = sample_tree();
        let forex: NodePath = ["Forex"][..].into();
        assert_eq!(
            tree.children(&forex).unwrap(),
            vec![
                ["Forex", "FX Options"][..].into(),
                ["Forex", "FX Spot"][..].into(),
            ]
        );
        assert_eq!(
            tree.book_ids_under(&forex).unwrap(),
            vec!["B_01", "B_02", "B_03"]
        );
    }

    #[test]
    fn preorder_paths_start_at_the_root() {
        let tree = sample_tree();
        let paths = tree.paths();
        assert_eq!(paths[0], NodePath::root());
        // root + 1 BU + 2 sub-BUs + 2 desks + 3 books
        assert_eq!(paths.len(), 9);
        assert!(paths.contains(&["Forex", "FX Options", "EMEA Vol", "Book B"][..].into()));
    }

    #[test]
    fn node_levels_follow_depth() {
        let book: NodePath = ["Forex", "FX Options", "EMEA Vol", "Book A"][..].into();
        assert_eq!(book.level(), Some(HierarchyLevel::Book));
        assert_eq!(
            book.parent().unwrap().level(),
            Some(HierarchyLevel::TradingDesk)
        );
        assert_eq!(NodePath::root().level(), None);
    }

    #[test]
    fn two_books_on_one_path_are_ambiguous() {
        let result = DeskTree::build(&[
            assignment("B_01", ["Forex", "FX Options", "EMEA Vol", "Book A"]),
            assignment("B_09", ["Forex", "FX Options", "EMEA Vol", "Book A"]),
        ]);
        assert!(matches!(result, Err(ModelError::AmbiguousBook { .. })));
    }

    #[test]
    fn missing_nodes_are_reported_as_such() {
        let tree = sample_tree();
        assert!(!tree.contains(&["Rates"][..].into()));
        assert!(tree.children(&["Rates"][..].into()).is_none());
    }
}
