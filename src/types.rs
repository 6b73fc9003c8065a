/// A point in content space.
///
/// Vertical lists grow towards negative `y`, horizontal lists towards positive `x`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The scroll axis of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    /// Distance of `position` from the content origin along this axis.
    pub fn distance(self, position: Position) -> f32 {
        match self {
            Self::Vertical => -position.y,
            Self::Horizontal => position.x,
        }
    }

    /// The extent of `size` along this axis.
    pub fn extent(self, size: Size) -> f32 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Moves `from` by `distance` towards later items, keeping the cross-axis coordinate.
    pub fn advance(self, from: Position, distance: f32) -> Position {
        match self {
            Self::Vertical => Position::new(from.x, from.y - distance),
            Self::Horizontal => Position::new(from.x + distance, from.y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Scroll only as far as needed to bring the item fully into view.
    Auto,
}

/// Layout parameters of a single-axis stacked list.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListLayout {
    pub axis: Axis,
    /// Space between consecutive items (never negative).
    pub spacing: f32,
}

/// The visible window along the scroll axis: `[offset, offset + extent)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub offset: f32,
    pub extent: f32,
}

impl Viewport {
    pub const fn new(offset: f32, extent: f32) -> Self {
        Self { offset, extent }
    }

    pub fn end(&self) -> f32 {
        self.offset + self.extent
    }
}

/// Inclusive range of item indexes intersecting the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportRange {
    pub first: usize,
    pub last: usize, // inclusive
}

impl ViewportRange {
    pub fn contains(&self, index: usize) -> bool {
        self.first <= index && index <= self.last
    }

    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn indexes(&self) -> core::ops::RangeInclusive<usize> {
        self.first..=self.last
    }

    /// Intersects with `[start, end]`, returning `None` when disjoint.
    pub fn clamp(&self, start: usize, end: usize) -> Option<Self> {
        let first = start.max(self.first);
        let last = end.min(self.last);
        (first <= last).then_some(Self { first, last })
    }
}
