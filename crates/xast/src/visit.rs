//! Mutable traversal used by transform stages.

use crate::{Element, Node, Root};

/// What a visitor wants done with the element it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitAction {
    /// Keep the element and descend into its children.
    Keep,
    /// Splice the element out of its parent. Its children are discarded
    /// with it and are never visited.
    Remove,
}

/// Visits every element in document order (parents before children).
///
/// The callback may rename the element or rewrite its attributes in place,
/// and may ask for the element to be removed from its parent.
pub fn visit_elements_mut<F>(root: &mut Root, mut f: F)
where
    F: FnMut(&mut Element) -> VisitAction,
{
    visit_children(&mut root.children, &mut f);
}

fn visit_children<F>(children: &mut Vec<Node>, f: &mut F)
where
    F: FnMut(&mut Element) -> VisitAction,
{
    children.retain_mut(|node| match node {
        Node::Element(element) => match f(element) {
            VisitAction::Keep => {
                visit_children(&mut element.children, f);
                true
            }
            VisitAction::Remove => false,
        },
        _ => true,
    });
}

/// Removes every non-element node for which `predicate` returns true, at any
/// depth.
pub fn retain_nodes<F>(root: &mut Root, mut predicate: F)
where
    F: FnMut(&Node) -> bool,
{
    fn walk<F: FnMut(&Node) -> bool>(children: &mut Vec<Node>, predicate: &mut F) {
        children.retain(|node| matches!(node, Node::Element(_)) || predicate(node));
        for child in children.iter_mut() {
            if let Node::Element(element) = child {
                walk(&mut element.children, predicate);
            }
        }
    }
    walk(&mut root.children, &mut predicate);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Comment, Text};

    fn sample() -> Root {
        Root::new(vec![Element::new("svg")
            .with_child(Element::new("g").with_child(Element::new("path")))
            .with_child(Comment::new("note"))
            .with_child(Element::new("rect"))
            .into()])
    }

    #[test]
    fn test_visits_in_document_order() {
        let mut root = sample();
        let mut seen = Vec::new();
        visit_elements_mut(&mut root, |el| {
            seen.push(el.name.to_string());
            VisitAction::Keep
        });
        assert_eq!(seen, ["svg", "g", "path", "rect"]);
    }

    #[test]
    fn test_removed_subtree_is_not_visited() {
        let mut root = sample();
        let mut seen = Vec::new();
        visit_elements_mut(&mut root, |el| {
            seen.push(el.name.to_string());
            if el.name == "g" {
                VisitAction::Remove
            } else {
                VisitAction::Keep
            }
        });
        assert_eq!(seen, ["svg", "g", "rect"]);
        let svg = root.elements().next().unwrap();
        assert_eq!(svg.children.len(), 2);
        assert!(svg.children.iter().all(|n| n.as_element().map_or(true, |e| e.name != "path")));
    }

    #[test]
    fn test_rename_in_place() {
        let mut root = sample();
        visit_elements_mut(&mut root, |el| {
            if el.name == "rect" {
                el.name = "Rect".into();
            }
            VisitAction::Keep
        });
        let svg = root.elements().next().unwrap();
        assert_eq!(svg.children[2].as_element().unwrap().name, "Rect");
    }

    #[test]
    fn test_retain_nodes_keeps_elements() {
        let mut root = Root::new(vec![
            Comment::new("top").into(),
            Element::new("svg")
                .with_child(Text::new("t"))
                .with_child(Comment::new("inner"))
                .into(),
        ]);
        retain_nodes(&mut root, |node| !matches!(node, Node::Comment(_)));
        assert_eq!(root.children.len(), 1);
        let svg = root.elements().next().unwrap();
        assert_eq!(svg.children, vec![Node::Text(Text::new("t"))]);
    }
}
