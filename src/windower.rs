use crate::{Viewport, ViewportRange};

/// Item extents along the scroll axis, as seen by the [`Windower`].
///
/// Implementations must be monotone: `leading(i + 1) >= trailing(i)` for every `i`.
pub trait AxisExtents {
    fn len(&self) -> usize;

    /// Distance from the content origin to the item's leading edge.
    fn leading(&self, index: usize) -> f32;

    /// Size of the item along the scroll axis.
    fn extent(&self, index: usize) -> f32;

    fn trailing(&self, index: usize) -> f32 {
        self.leading(index) + self.extent(index)
    }
}

/// Tracks the range of items intersecting the viewport across updates.
///
/// With a cached range the first visible index is walked from its previous value, so the cost of
/// an update is proportional to the number of items that entered or left the window. Without one
/// (first update, empty list, nothing visible) it falls back to [`cold_scan`].
///
/// An item `[leading, trailing)` intersects the viewport `[offset, offset + extent)` iff
/// `leading < offset + extent && trailing > offset`. Touching edges do not count.
#[derive(Clone, Debug, Default)]
pub struct Windower {
    range: Option<ViewportRange>,
    cached_start: f32,
}

impl Windower {
    pub fn new() -> Self {
        Self::default()
    }

    /// The range computed by the last update.
    pub fn range(&self) -> Option<ViewportRange> {
        self.range
    }

    /// Forgets the cached range; the next update runs a cold scan.
    pub fn invalidate(&mut self) {
        self.range = None;
    }

    pub fn update<E: AxisExtents + ?Sized>(
        &mut self,
        extents: &E,
        viewport: Viewport,
    ) -> Option<ViewportRange> {
        let len = extents.len();
        let start = viewport.offset;
        let range = match self.range {
            _ if len == 0 => None,
            None => cold_scan(extents, viewport),
            Some(prev) => {
                let first = prev.first.min(len - 1);
                // The opposing walk only moves when the list changed under the cached range.
                let first = if start > self.cached_start {
                    let first = advance_first(extents, first, start);
                    retract_first(extents, first, start)
                } else {
                    let first = retract_first(extents, first, start);
                    advance_first(extents, first, start)
                };
                range_from(extents, first, viewport)
            }
        };

        vtrace!(
            offset = viewport.offset,
            extent = viewport.extent,
            first = range.map(|r| r.first),
            last = range.map(|r| r.last),
            "Windower::update"
        );
        self.range = range;
        self.cached_start = start;
        range
    }
}

/// Computes the visible range from scratch by scanning from index 0.
pub fn cold_scan<E: AxisExtents + ?Sized>(extents: &E, viewport: Viewport) -> Option<ViewportRange> {
    let first = (0..extents.len()).find(|&i| extents.trailing(i) > viewport.offset)?;
    range_from(extents, first, viewport)
}

fn advance_first<E: AxisExtents + ?Sized>(extents: &E, mut first: usize, start: f32) -> usize {
    while first + 1 < extents.len() && extents.trailing(first) <= start {
        first += 1;
    }
    first
}

fn retract_first<E: AxisExtents + ?Sized>(extents: &E, mut first: usize, start: f32) -> usize {
    while first > 0 && extents.trailing(first - 1) > start {
        first -= 1;
    }
    first
}

/// Completes a range given the first item whose trailing edge passes the viewport start.
fn range_from<E: AxisExtents + ?Sized>(
    extents: &E,
    first: usize,
    viewport: Viewport,
) -> Option<ViewportRange> {
    let end = viewport.end();
    if extents.trailing(first) <= viewport.offset || extents.leading(first) >= end {
        return None;
    }
    let mut last = first;
    while last + 1 < extents.len() && extents.leading(last + 1) < end {
        last += 1;
    }
    Some(ViewportRange { first, last })
}
