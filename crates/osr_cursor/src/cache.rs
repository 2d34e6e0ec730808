use dashmap::DashMap;
use log::{debug, trace};
use once_cell::sync::Lazy;
use osr_core::CursorType;

use crate::system::{CursorDisplay, CursorHandle, CursorSystem};

static GLOBAL_CURSORS: Lazy<CursorCache> = Lazy::new(CursorCache::new);

/// `CursorType` to host handle map, filled on demand and never shrunk.
#[derive(Debug, Default)]
pub struct CursorCache {
    handles: DashMap<CursorType, CursorHandle>,
}

impl CursorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache shared by every surface.
    pub fn global() -> &'static Self {
        &GLOBAL_CURSORS
    }

    pub fn get(&self, cursor: CursorType) -> Option<CursorHandle> {
        self.handles.get(&cursor).map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Display for `cursor`, creating its handle through `system` on a miss.
    /// The `None` cursor hides the pointer and never reaches the cache.
    pub fn resolve<S: CursorSystem + ?Sized>(&self, cursor: CursorType, system: &mut S) -> CursorDisplay {
        if cursor == CursorType::None {
            return CursorDisplay::Hidden;
        }
        let handle = *self.handles.entry(cursor).or_insert_with(|| {
            let shape = cursor.standard_shape();
            debug!(target: "osr_cursor", "creating host cursor {shape:?} for {cursor:?}");
            system.create_standard_cursor(shape)
        });
        CursorDisplay::Handle(handle)
    }

    /// Resolve a raw engine cursor id; unknown ids show the arrow.
    pub fn resolve_id<S: CursorSystem + ?Sized>(&self, id: i32, system: &mut S) -> CursorDisplay {
        self.resolve(CursorType::from_id_or_pointer(id), system)
    }

    /// Push `display` to the host.
    pub fn apply<S: CursorSystem + ?Sized>(display: CursorDisplay, system: &mut S) {
        match display {
            CursorDisplay::Hidden => system.hide_cursor(),
            CursorDisplay::Handle(handle) => system.set_cursor(handle),
        }
    }
}

/// Cursor-change listener resolving through `cache` and applying to `system`.
pub fn cursor_listener<S>(cache: &'static CursorCache, mut system: S) -> impl FnMut(CursorType) + Send + 'static
where
    S: CursorSystem + Send + 'static,
{
    move |cursor| {
        let display = cache.resolve(cursor, &mut system);
        trace!(target: "osr_cursor", "cursor {cursor:?} -> {display:?}");
        CursorCache::apply(display, &mut system);
    }
}

/// `cursor_listener` over the global cache.
pub fn default_listener<S>(system: S) -> impl FnMut(CursorType) + Send + 'static
where
    S: CursorSystem + Send + 'static,
{
    cursor_listener(CursorCache::global(), system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use osr_core::StandardCursor;

    #[derive(Default)]
    struct Counting {
        created: Vec<StandardCursor>,
        shown: Vec<CursorHandle>,
        hidden: usize,
    }

    impl CursorSystem for Counting {
        fn create_standard_cursor(&mut self, shape: StandardCursor) -> CursorHandle {
            self.created.push(shape);
            CursorHandle(self.created.len() as u64)
        }

        fn set_cursor(&mut self, handle: CursorHandle) {
            self.shown.push(handle);
        }

        fn hide_cursor(&mut self) {
            self.hidden += 1;
        }
    }

    #[test]
    fn each_type_is_created_once() {
        let cache = CursorCache::new();
        let mut system = Counting::default();
        let first = cache.resolve(CursorType::Hand, &mut system);
        let second = cache.resolve(CursorType::Hand, &mut system);
        assert_eq!(first, second);
        assert_eq!(system.created, vec![StandardCursor::PointingHand]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn none_hides_without_caching() {
        let cache = CursorCache::new();
        let mut system = Counting::default();
        assert_eq!(cache.resolve(CursorType::None, &mut system), CursorDisplay::Hidden);
        assert!(cache.is_empty());
        assert!(system.created.is_empty());
    }

    #[test]
    fn unknown_id_resolves_to_arrow() {
        let cache = CursorCache::new();
        let mut system = Counting::default();
        cache.resolve_id(1234, &mut system);
        assert_eq!(system.created, vec![StandardCursor::Arrow]);
        assert!(cache.get(CursorType::Pointer).is_some());
    }

    #[test]
    fn apply_hides_or_sets() {
        let mut system = Counting::default();
        CursorCache::apply(CursorDisplay::Hidden, &mut system);
        CursorCache::apply(CursorDisplay::Handle(CursorHandle(7)), &mut system);
        assert_eq!(system.hidden, 1);
        assert_eq!(system.shown, vec![CursorHandle(7)]);
    }
}
