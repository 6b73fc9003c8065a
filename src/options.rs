use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::{Axis, PooledNode, Recipe, ReturnPolicy, Size};

/// Maps a node back to the identifier it was created for.
pub type KeyOf<N, K> = Arc<dyn Fn(&N) -> K + Send + Sync>;

/// A visual template: an identifier, the default size of its items and how to build its nodes.
pub struct Template<N, K> {
    pub identifier: K,
    pub default_size: Size,
    pub recipe: Recipe<N, K>,
}

impl<N, K> Template<N, K> {
    pub fn new(identifier: K, default_size: Size, recipe: Recipe<N, K>) -> Self {
        Self {
            identifier,
            default_size,
            recipe,
        }
    }
}

impl<N, K: Clone> Clone for Template<N, K> {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            default_size: self.default_size,
            recipe: self.recipe.clone(),
        }
    }
}

impl<N, K: fmt::Debug> fmt::Debug for Template<N, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("identifier", &self.identifier)
            .field("default_size", &self.default_size)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::ScrollView`].
///
/// Callbacks live in `Arc`s, so cloning options to tweak a field is cheap.
pub struct ScrollViewOptions<N: PooledNode, K> {
    pub axis: Axis,
    /// Space between consecutive items. Negative values are treated as 0.
    pub spacing: f32,
    pub templates: Vec<Template<N, K>>,
    pub key_of: KeyOf<N, K>,
    pub return_policy: ReturnPolicy<N::Parent>,
    /// Initial viewport size along the scroll axis.
    pub viewport_extent: f32,
    pub initial_offset: f32,
}

impl<N: PooledNode, K> ScrollViewOptions<N, K> {
    /// Creates options for a vertical list with no spacing, no templates and the
    /// [`ReturnPolicy::Hide`] policy.
    pub fn new(key_of: impl Fn(&N) -> K + Send + Sync + 'static) -> Self {
        Self {
            axis: Axis::Vertical,
            spacing: 0.0,
            templates: Vec::new(),
            key_of: Arc::new(key_of),
            return_policy: ReturnPolicy::Hide,
            viewport_extent: 0.0,
            initial_offset: 0.0,
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_template(mut self, identifier: K, default_size: Size, recipe: Recipe<N, K>) -> Self {
        self.templates
            .push(Template::new(identifier, default_size, recipe));
        self
    }

    pub fn with_return_policy(mut self, policy: ReturnPolicy<N::Parent>) -> Self {
        self.return_policy = policy;
        self
    }

    pub fn with_viewport_extent(mut self, extent: f32) -> Self {
        self.viewport_extent = extent;
        self
    }

    pub fn with_initial_offset(mut self, offset: f32) -> Self {
        self.initial_offset = offset;
        self
    }
}

impl<N: PooledNode, K: Clone> Clone for ScrollViewOptions<N, K>
where
    N::Parent: Clone,
{
    fn clone(&self) -> Self {
        Self {
            axis: self.axis,
            spacing: self.spacing,
            templates: self.templates.clone(),
            key_of: Arc::clone(&self.key_of),
            return_policy: self.return_policy.clone(),
            viewport_extent: self.viewport_extent,
            initial_offset: self.initial_offset,
        }
    }
}

impl<N: PooledNode, K: fmt::Debug> fmt::Debug for ScrollViewOptions<N, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollViewOptions")
            .field("axis", &self.axis)
            .field("spacing", &self.spacing)
            .field("templates", &self.templates)
            .field("viewport_extent", &self.viewport_extent)
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}
