use std::fmt;
use std::io;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

/// Controls how [`OrderedTree::graph_with`](super::OrderedTree::graph_with) draws a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphStyle {
    /// Number of columns each level is indented by
    pub indent_step: usize,
    /// Drawn in place of a missing child
    pub placeholder: &'static str,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            indent_step: 8,
            placeholder: "_",
        }
    }
}

/// Pending work for `render`
enum Frame {
    /// Draw a whole subtree, or the placeholder if it is missing
    Subtree(Option<Ptr>, usize),
    /// Draw the line for a single node whose right subtree is already drawn
    Value(Ptr, usize),
}

/// Draws `subtree` sideways: right subtree, then the node, then the left subtree
///
/// Each line is a single space right-aligned to `indent` columns followed by the node's value.
/// Iterative, since a tree built from sorted input is as deep as it is long.
pub(super) fn render<W, T>(
    out: &mut W,
    nodes: &Slab<InnerNode<T>>,
    subtree: Option<Ptr>,
    indent: usize,
    style: &GraphStyle,
) -> io::Result<()>
    where W: io::Write + ?Sized,
          T: fmt::Display,
{
    let mut stack = vec![Frame::Subtree(subtree, indent)];
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Subtree(Some(ptr), indent) => {
                let node = &nodes[ptr];
                let child_indent = indent + style.indent_step;
                // Pushed in reverse so the right subtree is drawn first
                stack.push(Frame::Subtree(node.left, child_indent));
                stack.push(Frame::Value(ptr, indent));
                stack.push(Frame::Subtree(node.right, child_indent));
            },

            Frame::Subtree(None, indent) => {
                writeln!(out, "{:>width$}{}", " ", style.placeholder, width = indent)?;
            },

            Frame::Value(ptr, indent) => {
                writeln!(out, "{:>width$}{}", " ", nodes[ptr].value, width = indent)?;
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::OrderedTree;

    use super::*;

    fn graph_string(tree: &OrderedTree<i32>, style: &GraphStyle) -> String {
        let mut out = Vec::new();
        tree.graph_with(&mut out, style).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_tree() {
        let tree = OrderedTree::new();
        assert_eq!(graph_string(&tree, &GraphStyle::default()), " _\n");
    }

    #[test]
    fn three_nodes() {
        let tree: OrderedTree<_> = vec![5, 3, 8].into_iter().collect();

        let expected = concat!(
            "                _\n",
            "        8\n",
            "                _\n",
            " 5\n",
            "                _\n",
            "        3\n",
            "                _\n",
        );
        assert_eq!(graph_string(&tree, &GraphStyle::default()), expected);
    }

    #[test]
    fn lopsided_tree() {
        //   2
        // 1
        let tree: OrderedTree<_> = vec![2, 1].into_iter().collect();

        let expected = concat!(
            "        _\n",
            " 2\n",
            "                _\n",
            "        1\n",
            "                _\n",
        );
        assert_eq!(graph_string(&tree, &GraphStyle::default()), expected);

        let style = GraphStyle {indent_step: 4, placeholder: "_"};
        let expected = concat!(
            "    _\n",
            " 2\n",
            "        _\n",
            "    1\n",
            "        _\n",
        );
        assert_eq!(graph_string(&tree, &style), expected);
    }

    #[test]
    fn list_shaped_tree() {
        const LEN: usize = 10_000;
        let tree: OrderedTree<i32> = (0..LEN as i32).collect();

        // No indentation keeps the output small at this depth
        let graph = graph_string(&tree, &GraphStyle {indent_step: 0, placeholder: "_"});
        let lines: Vec<&str> = graph.lines().collect();
        // Every value plus one placeholder per missing child
        assert_eq!(lines.len(), 2 * LEN + 1);
        assert_eq!(lines[0], " _");

        // Values are drawn largest first, each followed by its missing left child
        let values: Vec<i32> = lines.iter()
            .skip(1)
            .step_by(2)
            .map(|line| line.trim().parse().unwrap())
            .collect();
        assert_eq!(values, (0..LEN as i32).rev().collect::<Vec<_>>());
        assert!(lines.iter().skip(2).step_by(2).all(|line| *line == " _"));
    }

    #[test]
    fn list_shaped_tree_indentation() {
        const LEN: usize = 1_000;
        let tree: OrderedTree<i32> = (0..LEN as i32).collect();

        let graph = graph_string(&tree, &GraphStyle {indent_step: 1, placeholder: "_"});
        let lines: Vec<&str> = graph.lines().collect();
        assert_eq!(lines.len(), 2 * LEN + 1);

        // The deepest node is drawn first, right after its missing right child
        assert_eq!(lines[0], format!("{:>width$}_", " ", width = LEN));
        assert_eq!(lines[1], format!("{:>width$}{}", " ", LEN - 1, width = LEN - 1));
        // The root comes second to last, followed by its missing left child
        assert_eq!(lines[2 * LEN - 1], " 0");
        assert_eq!(lines[2 * LEN], " _");
    }

    #[test]
    fn custom_placeholder() {
        let tree: OrderedTree<_> = vec![1].into_iter().collect();
        let style = GraphStyle {indent_step: 2, placeholder: "."};
        assert_eq!(graph_string(&tree, &style), "  .\n 1\n  .\n");
    }
}
