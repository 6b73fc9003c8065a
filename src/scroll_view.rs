use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::windower::AxisExtents;
use crate::{
    Align, BatchReport, EntityPool, Identifier, Item, ListLayout, PoolError, PooledNode,
    ScrollError, ScrollViewOptions, Size, Viewport, ViewportRange, VirtualList, Windower,
};

/// The data side of a [`ScrollView`]: supplies identifiers and fills nodes with content.
///
/// Callbacks run synchronously inside the view's operations. They receive no access to the view,
/// so they cannot mutate it while a pass is running.
pub trait ItemSource<N, K> {
    /// Identifier of the item being created at `index`. `None` skips the item.
    fn identifier(&mut self, index: usize) -> Option<K>;

    /// Called when `node` is newly attached at `index`, when the content at `index` shifted, and
    /// on explicit [`ScrollView::refresh`].
    fn refresh(&mut self, index: usize, identifier: &K, node: &mut N);

    /// Called right before `node` goes back to the pool.
    fn release(&mut self, index: usize, identifier: &K, node: &mut N) {
        let _ = (index, identifier, node);
    }
}

/// A recycling scroll view.
///
/// Owns the item list, the node pool and the nodes currently attached to visible indexes, and
/// keeps all three consistent: after every operation, exactly the indexes of
/// [`ScrollView::viewport_range`] hold a node, each node sits at one index only, and its
/// identifier matches the item at that index.
///
/// The rendering host reports viewport changes (`on_scroll`, `set_viewport_extent`) and reads
/// back `content_extent` / `scroll_offset`. Everything runs synchronously; there is no internal
/// scheduling.
pub struct ScrollView<S, N: PooledNode, K = String> {
    source: S,
    list: VirtualList<K>,
    pool: EntityPool<N, K>,
    windower: Windower,
    active: BTreeMap<usize, N>,
    viewport: Viewport,
    // Kept nodes at or after this index show shifted content and need one refresh.
    dirty_from: Option<usize>,
    batch_depth: usize,
    pending: bool,
}

impl<S, N, K> ScrollView<S, N, K>
where
    S: ItemSource<N, K>,
    N: PooledNode,
    K: Identifier,
{
    /// Builds the pool and an empty list from `options`.
    ///
    /// Fails when `options.templates` is empty or repeats an identifier.
    pub fn new(options: ScrollViewOptions<N, K>, source: S) -> Result<Self, PoolError> {
        let ScrollViewOptions {
            axis,
            spacing,
            templates,
            key_of,
            return_policy,
            viewport_extent,
            initial_offset,
        } = options;

        let default_sizes: Vec<(K, Size)> = templates
            .iter()
            .map(|t| (t.identifier.clone(), t.default_size))
            .collect();
        let pool = EntityPool::with_key_of(
            templates.into_iter().map(|t| (t.identifier, t.recipe)),
            key_of,
            return_policy,
        )?;
        let list = VirtualList::new(ListLayout { axis, spacing }, default_sizes);

        vdebug!(?axis, spacing, viewport_extent, initial_offset, "ScrollView::new");
        Ok(Self {
            source,
            list,
            pool,
            windower: Windower::new(),
            active: BTreeMap::new(),
            viewport: Viewport::new(initial_offset, viewport_extent),
            dirty_from: None,
            batch_depth: 0,
            pending: false,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn list(&self) -> &VirtualList<K> {
        &self.list
    }

    pub fn pool(&self) -> &EntityPool<N, K> {
        &self.pool
    }

    pub fn item_count(&self) -> usize {
        self.list.len()
    }

    pub fn item(&self, index: usize) -> Option<&Item<K>> {
        self.list.get(index)
    }

    pub fn item_size(&self, index: usize) -> Result<Size, ScrollError> {
        self.list.item_size(index)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f32 {
        self.viewport.offset
    }

    pub fn content_extent(&self) -> f32 {
        self.list.content_extent()
    }

    pub fn max_scroll_offset(&self) -> f32 {
        (self.content_extent() - self.viewport.extent).max(0.0)
    }

    /// Inclusive range of visible indexes; `None` when nothing intersects the viewport.
    pub fn viewport_range(&self) -> Option<ViewportRange> {
        self.windower.range()
    }

    /// The node attached at `index`, if any.
    pub fn node(&self, index: usize) -> Option<&N> {
        self.active.get(&index)
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Visits attached nodes in index order.
    pub fn for_each_active(&self, mut f: impl FnMut(usize, &N)) {
        for (&index, node) in &self.active {
            f(index, node);
        }
    }

    /// Runs `f` and reconciles once afterwards, however many mutations it made.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);
        f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 && core::mem::take(&mut self.pending) {
            self.reconcile();
        }
    }

    /// Appends `count` items at the end of the list.
    pub fn append(&mut self, count: usize) -> BatchReport {
        let report = self
            .list
            .append(count, |index| self.source.identifier(index));
        self.reconcile();
        report
    }

    /// Inserts `count` items at `start_index`; `start_index == item_count()` appends.
    pub fn insert(&mut self, start_index: usize, count: usize) -> Result<BatchReport, ScrollError> {
        let report = self
            .list
            .insert(start_index, count, |index| self.source.identifier(index))?;
        if report.inserted > 0 {
            self.mark_shifted(start_index);
        }
        self.reconcile();
        Ok(report)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Item<K>, ScrollError> {
        let removed = self.list.remove_at(index)?;
        self.mark_shifted(index);
        self.reconcile();
        Ok(removed)
    }

    /// Removes every item and releases every attached node. Idle pooled nodes are kept; see
    /// [`ScrollView::clear_pool`].
    pub fn clear(&mut self) {
        self.list.clear();
        self.windower.invalidate();
        self.dirty_from = None;
        self.reconcile();
    }

    /// Destroys the idle nodes held by the pool.
    pub fn clear_pool(&mut self) {
        self.pool.clear();
    }

    /// Overrides the size of the item at `index`; items after it move.
    pub fn set_item_size(&mut self, index: usize, size: Size) -> Result<(), ScrollError> {
        self.list.set_item_size(index, size)?;
        self.reconcile();
        Ok(())
    }

    /// Re-runs the refresh callback for attached nodes in `start_index..=end_index`
    /// (`end_index` defaults to `start_index`). Indexes outside the visible range are ignored.
    pub fn refresh(&mut self, start_index: usize, end_index: Option<usize>) {
        let end_index = end_index.unwrap_or(start_index).max(start_index);
        let Some(range) = self
            .windower
            .range()
            .and_then(|r| r.clamp(start_index, end_index))
        else {
            return;
        };

        for index in range.indexes() {
            if let (Some(node), Some(item)) = (self.active.get_mut(&index), self.list.get(index)) {
                self.source.refresh(index, item.identifier(), node);
            }
        }
    }

    /// Applies a new scroll offset reported by the host.
    pub fn on_scroll(&mut self, offset: f32) {
        self.viewport.offset = offset;
        self.reconcile();
    }

    pub fn set_viewport_extent(&mut self, extent: f32) {
        self.viewport.extent = extent;
        self.reconcile();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reconcile();
    }

    /// Scrolls the minimum distance that brings the item at `index` fully into view.
    ///
    /// Returns the resulting scroll offset, which the host should apply to its scroll container.
    pub fn jump_to_index(&mut self, index: usize) -> Result<f32, ScrollError> {
        self.scroll_to_index(index, Align::Auto)
    }

    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Result<f32, ScrollError> {
        let offset = self.scroll_to_index_offset(index, align)?;
        if offset != self.viewport.offset {
            self.on_scroll(offset);
        }
        Ok(offset)
    }

    /// Computes the (clamped) scroll offset for `index` without applying it.
    ///
    /// When the content fits inside the viewport the current offset is returned unchanged.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> Result<f32, ScrollError> {
        let len = self.list.len();
        if index >= len {
            vwarn!(index, len, "ScrollView::scroll_to_index: index out of range");
            return Err(ScrollError::IndexOutOfRange { index, len });
        }

        let view = self.viewport.extent;
        let content = self.list.content_extent();
        let cur = self.viewport.offset;
        if content <= view {
            return Ok(cur);
        }

        let start = self.list.leading(index);
        let extent = self.list.extent(index);
        let end = start + extent;
        let target = match align {
            Align::Start => start,
            Align::End => end - view,
            Align::Center => start + extent / 2.0 - view / 2.0,
            Align::Auto => {
                if start >= cur && end <= cur + view {
                    return Ok(cur);
                } else if start < cur {
                    start
                } else {
                    end - view
                }
            }
        };
        Ok(target.clamp(0.0, content - view))
    }

    fn mark_shifted(&mut self, index: usize) {
        self.dirty_from = Some(self.dirty_from.map_or(index, |d| d.min(index)));
    }

    fn reconcile(&mut self) {
        if self.batch_depth > 0 {
            self.pending = true;
            return;
        }

        let range = self.windower.update(&self.list, self.viewport);
        let dirty_from = self.dirty_from.take();

        let stale: Vec<usize> = self
            .active
            .iter()
            .filter(|&(&index, node)| {
                let in_range = range.is_some_and(|r| r.contains(index));
                let matches = self
                    .list
                    .get(index)
                    .is_some_and(|item| *item.identifier() == self.pool.identifier_of(node));
                !(in_range && matches)
            })
            .map(|(&index, _)| index)
            .collect();
        for index in stale {
            if let Some(node) = self.active.remove(&index) {
                self.detach(index, node);
            }
        }

        let Some(range) = range else {
            vtrace!(active = self.active.len(), "ScrollView::reconcile: nothing visible");
            return;
        };

        for index in range.indexes() {
            let Some(item) = self.list.get(index) else {
                continue;
            };
            let position = item.position();
            let size = self.list.item_size(index).unwrap_or(Size::ZERO);
            if let Some(node) = self.active.get_mut(&index) {
                node.set_position(position);
                node.set_size(size);
                if dirty_from.is_some_and(|d| index >= d) {
                    self.source.refresh(index, item.identifier(), node);
                }
                continue;
            }

            let Some(mut node) = self.pool.get(item.identifier()) else {
                vwarn!(
                    index,
                    identifier = ?item.identifier(),
                    "ScrollView::reconcile: no pool for identifier, index left empty"
                );
                continue;
            };
            node.set_position(position);
            node.set_size(size);
            self.source.refresh(index, item.identifier(), &mut node);
            self.active.insert(index, node);
        }

        vtrace!(
            first = range.first,
            last = range.last,
            active = self.active.len(),
            "ScrollView::reconcile"
        );
    }

    fn detach(&mut self, index: usize, mut node: N) {
        let identifier = self.pool.identifier_of(&node);
        self.source.release(index, &identifier, &mut node);
        if let Err(rejected) = self.pool.release(node) {
            vwarn!(index, identifier = ?identifier, "ScrollView: node rejected by pool, dropped");
            drop(rejected.node);
        }
    }
}

impl<S, N: PooledNode, K: fmt::Debug> fmt::Debug for ScrollView<S, N, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollView")
            .field("list", &self.list)
            .field("pool", &self.pool)
            .field("viewport", &self.viewport)
            .field("range", &self.windower.range())
            .field("active", &self.active.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
