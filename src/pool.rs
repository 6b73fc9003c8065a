use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::key::KeyMap;
use crate::{Identifier, KeyOf, PoolError, Position, Rejected, Size};

/// The host-side operations the core performs on a visual node.
///
/// Nothing else about a node is visible to this crate: drawing, measuring and hit-testing stay with
/// the rendering host.
pub trait PooledNode {
    /// Handle to a container node, used by [`ReturnPolicy::Reparent`]. Use `()` if the host has no
    /// notion of parents.
    type Parent;

    fn set_active(&mut self, active: bool);
    fn set_position(&mut self, position: Position);
    fn set_size(&mut self, size: Size);

    fn set_parent(&mut self, parent: &Self::Parent) {
        let _ = parent;
    }
}

/// A node lifecycle hook (`on_acquire`, `on_release`, `on_destroy`).
pub type NodeHook<N> = Arc<dyn Fn(&mut N) + Send + Sync>;

/// Creates a fresh node for an identifier.
pub type CreateNode<N, K> = Arc<dyn Fn(&K) -> N + Send + Sync>;

/// How a node is parked while idle and restored when acquired again.
#[derive(Clone, Debug, PartialEq)]
pub enum ReturnPolicy<P> {
    /// Deactivate on release, reactivate on acquire.
    Hide,
    /// Move to a parking position on release. The caller positions the node on acquire.
    Park(Position),
    /// Move under `pool_root` on release and back under `content` on acquire.
    Reparent { pool_root: P, content: P },
}

impl<P> ReturnPolicy<P> {
    fn on_acquire<N: PooledNode<Parent = P>>(&self, node: &mut N) {
        match self {
            Self::Hide => node.set_active(true),
            Self::Park(_) => {}
            Self::Reparent { content, .. } => node.set_parent(content),
        }
    }

    fn on_release<N: PooledNode<Parent = P>>(&self, node: &mut N) {
        match self {
            Self::Hide => node.set_active(false),
            Self::Park(at) => node.set_position(*at),
            Self::Reparent { pool_root, .. } => node.set_parent(pool_root),
        }
    }
}

/// Creation recipe for one identifier.
///
/// The hooks run after the pool's [`ReturnPolicy`] has been applied.
pub struct Recipe<N, K> {
    pub create: CreateNode<N, K>,
    pub on_acquire: Option<NodeHook<N>>,
    pub on_release: Option<NodeHook<N>>,
    pub on_destroy: Option<NodeHook<N>>,
}

impl<N, K> Recipe<N, K> {
    pub fn new(create: impl Fn(&K) -> N + Send + Sync + 'static) -> Self {
        Self {
            create: Arc::new(create),
            on_acquire: None,
            on_release: None,
            on_destroy: None,
        }
    }

    pub fn with_on_acquire(mut self, f: impl Fn(&mut N) + Send + Sync + 'static) -> Self {
        self.on_acquire = Some(Arc::new(f));
        self
    }

    pub fn with_on_release(mut self, f: impl Fn(&mut N) + Send + Sync + 'static) -> Self {
        self.on_release = Some(Arc::new(f));
        self
    }

    pub fn with_on_destroy(mut self, f: impl Fn(&mut N) + Send + Sync + 'static) -> Self {
        self.on_destroy = Some(Arc::new(f));
        self
    }
}

impl<N, K> Clone for Recipe<N, K> {
    fn clone(&self) -> Self {
        Self {
            create: Arc::clone(&self.create),
            on_acquire: self.on_acquire.clone(),
            on_release: self.on_release.clone(),
            on_destroy: self.on_destroy.clone(),
        }
    }
}

impl<N, K> fmt::Debug for Recipe<N, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe")
            .field("on_acquire", &self.on_acquire.is_some())
            .field("on_release", &self.on_release.is_some())
            .field("on_destroy", &self.on_destroy.is_some())
            .finish_non_exhaustive()
    }
}

/// A per-identifier pool of reusable nodes.
///
/// A node is owned by the pool while idle and by the caller between [`EntityPool::get`] and
/// [`EntityPool::release`]. Since nodes move in and out by value, a node can never sit in an idle
/// set and be checked out at the same time.
pub struct EntityPool<N: PooledNode, K> {
    recipes: KeyMap<K, Recipe<N, K>>,
    idle: KeyMap<K, Vec<N>>,
    key_of: KeyOf<N, K>,
    policy: ReturnPolicy<N::Parent>,
    outstanding: usize,
}

impl<N: PooledNode, K: Identifier> EntityPool<N, K> {
    /// Builds a pool from `(identifier, recipe)` pairs.
    ///
    /// `key_of` must return the identifier a node was created for; it is how released nodes find
    /// their way back to the right idle set.
    ///
    /// Fails without building anything when `recipes` is empty or repeats an identifier.
    pub fn new(
        recipes: impl IntoIterator<Item = (K, Recipe<N, K>)>,
        key_of: impl Fn(&N) -> K + Send + Sync + 'static,
        policy: ReturnPolicy<N::Parent>,
    ) -> Result<Self, PoolError> {
        Self::with_key_of(recipes, Arc::new(key_of), policy)
    }

    /// Same as [`EntityPool::new`], sharing an existing key function.
    pub fn with_key_of(
        recipes: impl IntoIterator<Item = (K, Recipe<N, K>)>,
        key_of: KeyOf<N, K>,
        policy: ReturnPolicy<N::Parent>,
    ) -> Result<Self, PoolError> {
        let mut by_key = KeyMap::<K, Recipe<N, K>>::new();
        let mut idle = KeyMap::<K, Vec<N>>::new();
        for (position, (identifier, recipe)) in recipes.into_iter().enumerate() {
            if by_key.contains_key(&identifier) {
                vwarn!(position, identifier = ?identifier, "EntityPool::new: duplicate identifier");
                return Err(PoolError::DuplicateIdentifier { position });
            }
            idle.insert(identifier.clone(), Vec::new());
            by_key.insert(identifier, recipe);
        }
        if by_key.is_empty() {
            vwarn!("EntityPool::new: no recipes");
            return Err(PoolError::NoTemplates);
        }
        vdebug!(kinds = by_key.len(), "EntityPool::new");
        Ok(Self {
            recipes: by_key,
            idle,
            key_of,
            policy,
            outstanding: 0,
        })
    }

    pub fn contains(&self, identifier: &K) -> bool {
        self.recipes.contains_key(identifier)
    }

    pub fn identifier_of(&self, node: &N) -> K {
        (self.key_of)(node)
    }

    pub fn policy(&self) -> &ReturnPolicy<N::Parent> {
        &self.policy
    }

    /// Number of idle nodes kept for `identifier`.
    pub fn idle_len(&self, identifier: &K) -> usize {
        self.idle.get(identifier).map_or(0, Vec::len)
    }

    /// Number of nodes handed out and not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Takes an idle node for `identifier`, creating one if none is idle.
    ///
    /// Returns `None` for an identifier without a recipe.
    pub fn get(&mut self, identifier: &K) -> Option<N> {
        let Some(recipe) = self.recipes.get(identifier) else {
            vwarn!(identifier = ?identifier, "EntityPool::get: unknown identifier");
            return None;
        };

        let mut node = match self.idle.get_mut(identifier).and_then(Vec::pop) {
            Some(node) => node,
            None => {
                vtrace!(identifier = ?identifier, "EntityPool::get: create");
                (recipe.create)(identifier)
            }
        };

        self.policy.on_acquire(&mut node);
        if let Some(hook) = &recipe.on_acquire {
            hook(&mut node);
        }
        self.outstanding = self.outstanding.saturating_add(1);
        Some(node)
    }

    /// Returns `node` to the idle set of its identifier.
    ///
    /// A node whose identifier has no pool is handed back untouched.
    pub fn release(&mut self, mut node: N) -> Result<(), Rejected<N>> {
        let identifier = (self.key_of)(&node);
        let (Some(recipe), Some(idle)) = (
            self.recipes.get(&identifier),
            self.idle.get_mut(&identifier),
        ) else {
            vwarn!(identifier = ?identifier, "EntityPool::release: unknown identifier");
            return Err(Rejected { node });
        };

        self.policy.on_release(&mut node);
        if let Some(hook) = &recipe.on_release {
            hook(&mut node);
        }
        idle.push(node);
        self.outstanding = self.outstanding.saturating_sub(1);
        Ok(())
    }

    /// Destroys every idle node. Checked-out nodes are not touched but stop being counted.
    pub fn clear(&mut self) {
        let mut destroyed = 0usize;
        for (identifier, idle) in self.idle.iter_mut() {
            let on_destroy = self
                .recipes
                .get(identifier)
                .and_then(|r| r.on_destroy.as_ref());
            for mut node in idle.drain(..) {
                if let Some(hook) = on_destroy {
                    hook(&mut node);
                }
                destroyed += 1;
            }
        }
        self.outstanding = 0;
        vdebug!(destroyed, "EntityPool::clear");
    }
}

impl<N: PooledNode, K> fmt::Debug for EntityPool<N, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityPool")
            .field("kinds", &self.recipes.len())
            .field("idle", &self.idle.values().map(Vec::len).sum::<usize>())
            .field("outstanding", &self.outstanding)
            .finish_non_exhaustive()
    }
}
