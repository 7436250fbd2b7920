//! Tree lifecycle: walking and releasing subtrees.
//!
//! Ownership in the tree is strictly single-parent, so releasing a node
//! releases exactly its own subtree, and no node can be visited twice.
//! Teardown keeps its own work stack instead of recursing, so a deeply
//! nested expression cannot exhaust the call stack when it is dropped.

use std::mem;

use super::ast::{MatchArm, Node, Program};

impl Node {
    /// The nodes directly owned by this one, in source order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Literal { .. }
            | Node::BoolLiteral { .. }
            | Node::Variable { .. }
            | Node::ImportStatement { .. }
            | Node::EnumStatement { .. }
            | Node::DestructurePattern { .. }
            | Node::Error => vec![],
            Node::Unary { right, .. } => vec![right.as_ref()],
            Node::Binary { left, right, .. } | Node::Pipeline { left, right } => {
                vec![left.as_ref(), right.as_ref()]
            }
            Node::Grouping { expression } | Node::ExpressionStatement { expression } => {
                vec![expression.as_ref()]
            }
            Node::Assignment { value, .. } => vec![value.as_ref()],
            Node::LetStatement { initializer, .. } | Node::LetBangStatement { initializer, .. } => {
                vec![initializer.as_ref()]
            }
            Node::Call { callee, arguments } => {
                let mut children = vec![callee.as_ref()];
                children.extend(arguments.iter());
                children
            }
            Node::PropertyAccess { object, .. } => vec![object.as_ref()],
            Node::FunctionStatement { body, .. } | Node::LambdaExpression { body, .. } => {
                body.iter().collect()
            }
            Node::MatchStatement { value, arms } => {
                let mut children = vec![value.as_ref()];
                for arm in arms {
                    children.push(&arm.pattern);
                    children.push(&arm.expression);
                }
                children
            }
            Node::ListLiteral { elements } => elements.iter().collect(),
            Node::StructLiteral { values, .. } => values.iter().collect(),
            Node::StructUpdate { base, values, .. } => {
                let mut children = vec![base.as_ref()];
                children.extend(values.iter());
                children
            }
            Node::EnumConstructor { field_values, .. } => field_values.iter().collect(),
        }
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children());
        }
        count
    }

    /// Moves every owned child out of this node, leaving it childless.
    ///
    /// Boxed children are replaced by [`Node::Error`] in place, so this never
    /// allocates for fixed-arity nodes.
    fn detach_children(&mut self) -> Vec<Node> {
        match self {
            Node::Literal { .. }
            | Node::BoolLiteral { .. }
            | Node::Variable { .. }
            | Node::ImportStatement { .. }
            | Node::EnumStatement { .. }
            | Node::DestructurePattern { .. }
            | Node::Error => Vec::new(),
            Node::Unary { right, .. } => vec![take_boxed(right)],
            Node::Binary { left, right, .. } | Node::Pipeline { left, right } => {
                vec![take_boxed(left), take_boxed(right)]
            }
            Node::Grouping { expression } | Node::ExpressionStatement { expression } => {
                vec![take_boxed(expression)]
            }
            Node::Assignment { value, .. } => vec![take_boxed(value)],
            Node::LetStatement { initializer, .. } | Node::LetBangStatement { initializer, .. } => {
                vec![take_boxed(initializer)]
            }
            Node::Call { callee, arguments } => {
                let mut children = mem::take(arguments);
                children.push(take_boxed(callee));
                children
            }
            Node::PropertyAccess { object, .. } => vec![take_boxed(object)],
            Node::FunctionStatement { body, .. } | Node::LambdaExpression { body, .. } => {
                mem::take(body)
            }
            Node::MatchStatement { value, arms } => {
                let mut children = vec![take_boxed(value)];
                for MatchArm { pattern, expression } in mem::take(arms) {
                    children.push(pattern);
                    children.push(expression);
                }
                children
            }
            Node::ListLiteral { elements } => mem::take(elements),
            Node::StructLiteral { values, .. } => mem::take(values),
            Node::StructUpdate { base, values, .. } => {
                let mut children = mem::take(values);
                children.push(take_boxed(base));
                children
            }
            Node::EnumConstructor { field_values, .. } => mem::take(field_values),
        }
    }
}

fn take_boxed(slot: &mut Box<Node>) -> Node {
    mem::replace(slot.as_mut(), Node::Error)
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = self.detach_children();
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.detach_children());
            // `node` has no children left, so dropping it here is shallow.
        }
    }
}

/// Releases a subtree. Releasing nothing is a no-op.
pub fn release(node: Option<Node>) {
    drop(node);
}

impl Program {
    /// Releases every top-level node and resets the container. Calling it
    /// again on an already released program does nothing.
    pub fn release(&mut self) {
        let nodes = mem::take(&mut self.nodes);
        for node in nodes.into_iter().rev() {
            release(Some(node));
        }
    }
}
