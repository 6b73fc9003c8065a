use alloc::vec::Vec;

use crate::key::KeyMap;
use crate::windower::AxisExtents;
use crate::{Identifier, ListLayout, Position, ScrollError, Size};

/// One logical entry of a [`VirtualList`].
#[derive(Clone, Debug, PartialEq)]
pub struct Item<K> {
    identifier: K,
    size: Option<Size>,
    position: Position,
}

impl<K> Item<K> {
    pub fn identifier(&self) -> &K {
        &self.identifier
    }

    /// The explicit size override, if one was set.
    pub fn size_override(&self) -> Option<Size> {
        self.size
    }

    /// Leading corner of the item in content space. Maintained by the list.
    pub fn position(&self) -> Position {
        self.position
    }
}

/// Outcome of a batch creation (`append`/`insert`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Index of the first created item.
    pub start: usize,
    pub inserted: usize,
    /// Resolver indexes that produced no identifier and were skipped.
    pub skipped: Vec<usize>,
}

/// An ordered sequence of items laid out along one axis.
///
/// Positions are derived: item `i` starts where item `i - 1` ends plus the spacing, and item `0`
/// sits at the origin. Every mutation recomputes the tail from the first touched index.
#[derive(Clone, Debug)]
pub struct VirtualList<K> {
    items: Vec<Item<K>>,
    layout: ListLayout,
    default_sizes: KeyMap<K, Size>,
}

impl<K: Identifier> VirtualList<K> {
    pub fn new(layout: ListLayout, default_sizes: impl IntoIterator<Item = (K, Size)>) -> Self {
        let mut layout = layout;
        if layout.spacing < 0.0 {
            vwarn!(spacing = layout.spacing, "VirtualList: negative spacing clamped to 0");
            layout.spacing = 0.0;
        }
        Self {
            items: Vec::new(),
            layout,
            default_sizes: default_sizes.into_iter().collect(),
        }
    }

    pub fn layout(&self) -> ListLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item<K>> {
        self.items.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Item<K>> {
        self.items.iter()
    }

    pub fn default_size(&self, identifier: &K) -> Option<Size> {
        self.default_sizes.get(identifier).copied()
    }

    /// The override if set, otherwise the default size of the item's identifier.
    pub fn item_size(&self, index: usize) -> Result<Size, ScrollError> {
        let item = self.items.get(index).ok_or(ScrollError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })?;
        self.size_of(item)
            .ok_or(ScrollError::MissingDefaultSize { index })
    }

    /// Extent of the laid-out content along the scroll axis.
    pub fn content_extent(&self) -> f32 {
        let Some(last) = self.items.last() else {
            return 0.0;
        };
        let axis = self.layout.axis;
        axis.distance(last.position) + axis.extent(self.layout_size(last))
    }

    /// Appends `count` items, asking `resolve` for the identifier of each new index.
    ///
    /// Indexes for which `resolve` yields nothing (or a blank identifier) are skipped and
    /// reported; the rest of the batch proceeds.
    pub fn append(
        &mut self,
        count: usize,
        resolve: impl FnMut(usize) -> Option<K>,
    ) -> BatchReport {
        let start = self.items.len();
        let report = self.splice(start, count, resolve);
        self.update_positions_from(start);
        vtrace!(start, inserted = report.inserted, "VirtualList::append");
        report
    }

    /// Inserts `count` items at `start_index` (`0..=len`).
    ///
    /// `resolve` is called with `start_index..start_index + count`.
    pub fn insert(
        &mut self,
        start_index: usize,
        count: usize,
        resolve: impl FnMut(usize) -> Option<K>,
    ) -> Result<BatchReport, ScrollError> {
        let len = self.items.len();
        if start_index > len {
            vwarn!(start_index, len, "VirtualList::insert: index out of range");
            return Err(ScrollError::InsertOutOfRange {
                index: start_index,
                len,
            });
        }
        if start_index == len {
            return Ok(self.append(count, resolve));
        }

        let report = self.splice(start_index, count, resolve);
        self.update_positions_from(start_index);
        vtrace!(start_index, inserted = report.inserted, "VirtualList::insert");
        Ok(report)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Item<K>, ScrollError> {
        let len = self.items.len();
        if index >= len {
            vwarn!(index, len, "VirtualList::remove_at: index out of range");
            return Err(ScrollError::IndexOutOfRange { index, len });
        }
        let removed = self.items.remove(index);
        self.update_positions_from(index);
        vtrace!(index, "VirtualList::remove_at");
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Overrides the size of one item. Only the items after it move.
    pub fn set_item_size(&mut self, index: usize, size: Size) -> Result<(), ScrollError> {
        let len = self.items.len();
        let Some(item) = self.items.get_mut(index) else {
            vwarn!(index, len, "VirtualList::set_item_size: index out of range");
            return Err(ScrollError::IndexOutOfRange { index, len });
        };
        item.size = Some(size);
        self.update_positions_from(index + 1);
        Ok(())
    }

    fn splice(
        &mut self,
        start: usize,
        count: usize,
        mut resolve: impl FnMut(usize) -> Option<K>,
    ) -> BatchReport {
        let mut created = Vec::with_capacity(count);
        let mut skipped = Vec::new();
        for index in start..start.saturating_add(count) {
            match resolve(index).filter(|id| !id.is_blank()) {
                Some(identifier) => {
                    if !self.default_sizes.contains_key(&identifier) {
                        vwarn!(
                            index,
                            identifier = ?identifier,
                            "VirtualList: no default size, item collapses until sized"
                        );
                    }
                    created.push(Item {
                        identifier,
                        size: None,
                        position: Position::ORIGIN,
                    });
                }
                None => {
                    vwarn!(index, "VirtualList: identifier resolution failed, item skipped");
                    skipped.push(index);
                }
            }
        }

        let inserted = created.len();
        self.items.splice(start..start, created);
        BatchReport {
            start,
            inserted,
            skipped,
        }
    }

    fn update_positions_from(&mut self, start: usize) {
        if start >= self.items.len() {
            return;
        }
        let axis = self.layout.axis;
        let spacing = self.layout.spacing;
        let mut next = match start.checked_sub(1) {
            Some(prev) => {
                let prev = &self.items[prev];
                axis.advance(prev.position, axis.extent(self.layout_size(prev)) + spacing)
            }
            None => Position::ORIGIN,
        };
        for i in start..self.items.len() {
            self.items[i].position = next;
            let step = axis.extent(self.layout_size(&self.items[i])) + spacing;
            next = axis.advance(next, step);
        }
    }

    fn size_of(&self, item: &Item<K>) -> Option<Size> {
        item.size
            .or_else(|| self.default_sizes.get(&item.identifier).copied())
    }

    /// Size used for layout: items without any known size collapse to zero.
    fn layout_size(&self, item: &Item<K>) -> Size {
        self.size_of(item).unwrap_or(Size::ZERO)
    }
}

impl<K: Identifier> AxisExtents for VirtualList<K> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn leading(&self, index: usize) -> f32 {
        self.layout.axis.distance(self.items[index].position)
    }

    fn extent(&self, index: usize) -> f32 {
        self.layout
            .axis
            .extent(self.layout_size(&self.items[index]))
    }
}
