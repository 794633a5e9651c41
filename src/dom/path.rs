//! Ancestor paths
//!
//! The chain of (name, position among same-named siblings) steps from the
//! document root down to a node, rendered like an XPath location:
//! `/catalog[1]/book[2]/price[1]/text()[1]`, `/catalog[1]/book[2]/@id`.

use std::fmt;

use super::node::{NodeId, NodeKind};
use super::DocumentAccess;

/// One step of an ancestor path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub kind: NodeKind,
    /// Element/attribute name or PI target; empty for unnamed kinds
    pub name: String,
    /// 1-based index among preceding siblings with the same kind and name
    pub position: usize,
}

/// Root-to-node path of a node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AncestorPath {
    steps: Vec<PathStep>,
}

impl AncestorPath {
    /// Compute the path of `id`; empty for the document node or an unknown id
    pub fn of<D: DocumentAccess + ?Sized>(doc: &D, id: NodeId) -> Self {
        let mut steps = Vec::new();
        let mut current = id;
        while let (Some(kind), Some(parent)) = (doc.kind(current), doc.parent_of(current)) {
            let name = doc.node_name(current).unwrap_or("");
            let position = if kind == NodeKind::Attribute {
                1
            } else {
                doc.children_vec(parent)
                    .into_iter()
                    .take_while(|&sibling| sibling != current)
                    .filter(|&sibling| {
                        doc.kind(sibling) == Some(kind) && doc.node_name(sibling).unwrap_or("") == name
                    })
                    .count()
                    + 1
            };
            steps.push(PathStep {
                kind,
                name: name.to_string(),
                position,
            });
            current = parent;
        }
        steps.reverse();
        AncestorPath { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Attribute => write!(f, "@{}", self.name),
            NodeKind::Element => write!(f, "{}[{}]", self.name, self.position),
            NodeKind::ProcessingInstruction => {
                write!(f, "processing-instruction('{}')[{}]", self.name, self.position)
            }
            kind => write!(f, "{}[{}]", kind.path_name(), self.position),
        }
    }
}

impl fmt::Display for AncestorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("/");
        }
        for step in &self.steps {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}
