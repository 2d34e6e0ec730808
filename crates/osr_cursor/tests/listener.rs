use std::sync::{Arc, Mutex};

use osr_core::{CursorType, StandardCursor};
use osr_core::cursor::ALL_CURSOR_TYPES;
use osr_cursor::{CursorCache, CursorHandle, CursorSystem, cursor_listener};

#[derive(Default)]
struct Log {
    created: usize,
    shown: Vec<CursorHandle>,
    hidden: usize,
}

#[derive(Clone, Default)]
struct SharedSystem(Arc<Mutex<Log>>);

impl CursorSystem for SharedSystem {
    fn create_standard_cursor(&mut self, _shape: StandardCursor) -> CursorHandle {
        let mut log = self.0.lock().unwrap();
        log.created += 1;
        CursorHandle(log.created as u64)
    }

    fn set_cursor(&mut self, handle: CursorHandle) {
        self.0.lock().unwrap().shown.push(handle);
    }

    fn hide_cursor(&mut self) {
        self.0.lock().unwrap().hidden += 1;
    }
}

fn leaked_cache() -> &'static CursorCache {
    Box::leak(Box::new(CursorCache::new()))
}

#[test]
fn listener_creates_each_cursor_at_most_once() {
    let system = SharedSystem::default();
    let mut listener = cursor_listener(leaked_cache(), system.clone());
    for _ in 0..3 {
        for cursor in ALL_CURSOR_TYPES {
            listener(cursor);
        }
    }
    let log = system.0.lock().unwrap();
    assert_eq!(log.created, ALL_CURSOR_TYPES.len() - 1);
    assert_eq!(log.hidden, 3);
    assert_eq!(log.shown.len(), 3 * (ALL_CURSOR_TYPES.len() - 1));
}

#[test]
fn repeated_cursor_reuses_handle() {
    let system = SharedSystem::default();
    let mut listener = cursor_listener(leaked_cache(), system.clone());
    listener(CursorType::IBeam);
    listener(CursorType::Pointer);
    listener(CursorType::IBeam);
    let log = system.0.lock().unwrap();
    assert_eq!(log.shown, vec![CursorHandle(1), CursorHandle(2), CursorHandle(1)]);
}

#[test]
fn global_cache_is_shared() {
    assert!(std::ptr::eq(CursorCache::global(), CursorCache::global()));
}
