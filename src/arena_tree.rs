//! A DOM-like tree whose nodes live in an index arena.
//!
//! Based on <https://github.com/SimonSapin/rust-forest/blob/5783c8be8680b84c0438638bdee07d4e4aca40ac/arena-tree/lib.rs>.
//! MIT license (per Cargo.toml).
//!
//! Links between nodes are non-owning [`Id`]s held in `Cell`s, so the shape of
//! the tree can be changed through a shared reference to the arena; only the
//! node payloads need exclusive access.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A copyable handle to a node stored in an [`Arena`].
pub struct Id<T>(id_arena::Id<Node<T>>);

impl<T> Copy for Id<T> {}

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Id<T> {
        *self
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0.index())
    }
}

/// Storage for every node of one tree.
pub type Arena<T> = id_arena::Arena<Node<T>>;

/// A node inside a DOM-like tree.
pub struct Node<T> {
    parent: Cell<Option<Id<T>>>,
    previous_sibling: Cell<Option<Id<T>>>,
    next_sibling: Cell<Option<Id<T>>>,
    first_child: Cell<Option<Id<T>>>,
    last_child: Cell<Option<Id<T>>>,

    /// The data held by the node.
    pub data: T,
}

/// Prints the payload only; following the links would loop.
impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("data", &self.data).finish()
    }
}

impl<T> Node<T> {
    /// Create a new, unlinked node from its associated data.
    pub fn new(data: T) -> Node<T> {
        Node {
            parent: Cell::new(None),
            first_child: Cell::new(None),
            last_child: Cell::new(None),
            previous_sibling: Cell::new(None),
            next_sibling: Cell::new(None),
            data,
        }
    }

    fn detach(&self, arena: &Arena<T>) {
        let parent = self.parent.take().map(|i| &arena[i.0]);
        let previous_sibling = self.previous_sibling.take();
        let next_sibling = self.next_sibling.take();

        if let Some(next_sibling) = next_sibling {
            arena[next_sibling.0].previous_sibling.set(previous_sibling);
        } else if let Some(parent) = parent {
            parent.last_child.set(previous_sibling);
        }

        if let Some(previous_sibling) = previous_sibling {
            arena[previous_sibling.0].next_sibling.set(next_sibling);
        } else if let Some(parent) = parent {
            parent.first_child.set(next_sibling);
        }
    }
}

impl<T> Id<T> {
    /// Move `data` into the arena as a new, unlinked node.
    pub fn alloc(arena: &mut Arena<T>, data: T) -> Id<T> {
        Id(arena.alloc(Node::new(data)))
    }

    /// Return the parent node, unless this node is the root of the tree.
    pub fn parent(self, arena: &Arena<T>) -> Option<Id<T>> {
        arena[self.0].parent.get()
    }

    /// Return the first child of this node, unless it has no child.
    pub fn first_child(self, arena: &Arena<T>) -> Option<Id<T>> {
        arena[self.0].first_child.get()
    }

    /// Return the last child of this node, unless it has no child.
    pub fn last_child(self, arena: &Arena<T>) -> Option<Id<T>> {
        arena[self.0].last_child.get()
    }

    /// Return the previous sibling of this node, unless it is a first child.
    pub fn previous_sibling(self, arena: &Arena<T>) -> Option<Id<T>> {
        arena[self.0].previous_sibling.get()
    }

    /// Return the next sibling of this node, unless it is a last child.
    pub fn next_sibling(self, arena: &Arena<T>) -> Option<Id<T>> {
        arena[self.0].next_sibling.get()
    }

    /// Return an iterator of this node and its ancestors.
    ///
    /// Call `.next().unwrap()` once on the iterator to skip the node itself.
    pub fn ancestors(self, arena: &Arena<T>) -> Ancestors<'_, T> {
        Ancestors(Some((arena, self)))
    }

    /// Return an iterator of this node’s children.
    pub fn children(self, arena: &Arena<T>) -> Children<'_, T> {
        Children(arena[self.0].first_child.get().map(|r| (arena, r)))
    }

    /// Return an iterator of this node’s children, in reverse order.
    pub fn reverse_children(self, arena: &Arena<T>) -> ReverseChildren<'_, T> {
        ReverseChildren(arena[self.0].last_child.get().map(|r| (arena, r)))
    }

    /// Return an iterator of this node and its descendants, in tree order.
    ///
    /// Parent nodes appear before the descendants.
    pub fn descendants(self, arena: &Arena<T>) -> Descendants<'_, T> {
        Descendants(self.traverse(arena))
    }

    /// Return an iterator of [`NodeEdge`]s for this node and its descendants,
    /// in tree order.
    pub fn traverse(self, arena: &Arena<T>) -> Traverse<'_, T> {
        Traverse {
            arena,
            root: self,
            next: Some(NodeEdge::Start(self)),
        }
    }

    /// Detach a node from its parent and siblings. Children are not affected.
    #[inline]
    pub fn detach(self, arena: &Arena<T>) {
        arena[self.0].detach(arena);
    }

    /// Append a new child to this node, after existing children.
    pub fn append(self, arena: &Arena<T>, new_child: Id<T>) {
        let node = &arena[self.0];
        let new_child_node = &arena[new_child.0];
        new_child_node.detach(arena);

        new_child_node.parent.set(Some(self));
        if let Some(last_child) = node.last_child.take() {
            let last_child_node = &arena[last_child.0];
            debug_assert!(last_child_node.next_sibling.get().is_none());
            new_child_node.previous_sibling.set(Some(last_child));
            last_child_node.next_sibling.set(Some(new_child));
        } else {
            debug_assert!(node.first_child.get().is_none());
            node.first_child.set(Some(new_child));
        }
        node.last_child.set(Some(new_child));
    }

    /// Borrow the payload of this node.
    #[inline]
    pub fn data(self, arena: &Arena<T>) -> &T {
        &arena[self.0].data
    }

    /// Mutably borrow the payload of this node.
    #[inline]
    pub fn data_mut(self, arena: &mut Arena<T>) -> &mut T {
        &mut arena[self.0].data
    }
}

macro_rules! axis_iterator {
    (#[$attr:meta] $name:ident : $next:ident) => {
        #[$attr]
        #[derive(Debug)]
        pub struct $name<'a, T>(Option<(&'a Arena<T>, Id<T>)>);

        impl<'a, T> Iterator for $name<'a, T> {
            type Item = Id<T>;

            fn next(&mut self) -> Option<Id<T>> {
                let (arena, id) = self.0.take()?;
                self.0 = arena[id.0].$next.get().map(|r| (arena, r));
                Some(id)
            }
        }
    };
}

axis_iterator! {
    #[doc = "An iterator of the ancestors of a given node."]
    Ancestors: parent
}

axis_iterator! {
    #[doc = "An iterator of the children of a given node."]
    Children: next_sibling
}

axis_iterator! {
    #[doc = "An iterator of the children of a given node, in reverse order."]
    ReverseChildren: previous_sibling
}

/// An iterator of a given node and its descendants, in tree order.
#[derive(Debug)]
pub struct Descendants<'a, T: 'a>(Traverse<'a, T>);

impl<'a, T> Iterator for Descendants<'a, T> {
    type Item = Id<T>;

    fn next(&mut self) -> Option<Id<T>> {
        loop {
            match self.0.next()? {
                NodeEdge::Start(node) => return Some(node),
                NodeEdge::End(_) => {}
            }
        }
    }
}

/// Indicator if the node is at a start or endpoint of the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEdge<T> {
    /// Yielded before the node’s descendants.
    Start(T),

    /// Yielded after the node’s descendants.
    End(T),
}

/// An iterator of the start and end edges of a given node and its
/// descendants, in tree order.
#[derive(Debug)]
pub struct Traverse<'a, T: 'a> {
    arena: &'a Arena<T>,
    root: Id<T>,
    next: Option<NodeEdge<Id<T>>>,
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = NodeEdge<Id<T>>;

    fn next(&mut self) -> Option<NodeEdge<Id<T>>> {
        let item = self.next.take()?;
        self.next = match item {
            NodeEdge::Start(id) => match self.arena[id.0].first_child.get() {
                Some(child) => Some(NodeEdge::Start(child)),
                None => Some(NodeEdge::End(id)),
            },
            NodeEdge::End(id) if id == self.root => None,
            NodeEdge::End(id) => match self.arena[id.0].next_sibling.get() {
                Some(sibling) => Some(NodeEdge::Start(sibling)),
                None => match self.arena[id.0].parent.get() {
                    Some(parent) => Some(NodeEdge::End(parent)),
                    None => panic!("tree modified during iteration"),
                },
            },
        };
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_detach_and_walk() {
        let mut arena = Arena::new();
        let root = Id::alloc(&mut arena, "root");
        let a = Id::alloc(&mut arena, "a");
        let b = Id::alloc(&mut arena, "b");
        let c = Id::alloc(&mut arena, "c");

        root.append(&arena, a);
        root.append(&arena, b);
        root.append(&arena, c);
        let order: Vec<_> = root
            .descendants(&arena)
            .map(|id| *id.data(&arena))
            .collect();
        assert_eq!(order, ["root", "a", "b", "c"]);

        b.detach(&arena);
        let children: Vec<_> = root.children(&arena).map(|id| *id.data(&arena)).collect();
        assert_eq!(children, ["a", "c"]);
        assert_eq!(a.next_sibling(&arena), Some(c));
        assert_eq!(c.previous_sibling(&arena), Some(a));
        assert_eq!(b.parent(&arena), None);

        let reversed: Vec<_> = root.reverse_children(&arena).collect();
        assert_eq!(reversed, [c, a]);
        assert_eq!(c.ancestors(&arena).collect::<Vec<_>>(), [c, root]);
    }
}
