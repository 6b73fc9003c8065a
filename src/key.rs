use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

#[cfg(feature = "std")]
#[doc(hidden)]
pub trait KeyBound: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> KeyBound for K {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait KeyBound: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> KeyBound for K {}

/// The key selecting which pooled node kind (and default size) backs an item.
///
/// `is_blank` lets the list reject identifiers that carry no information (e.g. `""`), which is
/// treated the same as a resolver returning `None`.
pub trait Identifier: KeyBound + Clone + fmt::Debug {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Identifier for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Identifier for &'static str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Identifier for Cow<'static, str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Identifier for Arc<str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! integer_identifier {
    ($($t:ty),*) => {
        $(impl Identifier for $t {})*
    };
}

integer_identifier!(u8, u16, u32, u64, usize);
