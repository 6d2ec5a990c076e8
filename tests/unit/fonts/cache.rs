use std::{path::Path, sync::Arc};

use super::*;
use crate::fonts::{bitmap::BUILTIN, handle::ScalableFont};

fn fake_scalable(size_px: u32) -> FontHandle {
    FontHandle::Scalable(ScalableFont {
        path: Path::new("fake.ttf").to_path_buf(),
        family: "Fake".to_string(),
        size_px,
        bytes: Arc::new(Vec::new()),
    })
}

#[test]
fn insert_is_idempotent_per_key() {
    let cache = FontCache::new();
    let key = FontKey::new("caption", 84);
    let mut loads = 0;

    let a = cache
        .get_or_try_insert_with(&key, || {
            loads += 1;
            Some(fake_scalable(84))
        })
        .unwrap();
    let b = cache
        .get_or_try_insert_with(&key, || {
            loads += 1;
            Some(fake_scalable(84))
        })
        .unwrap();

    assert_eq!(loads, 1);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);
}

#[test]
fn distinct_sizes_are_cached_independently() {
    let cache = FontCache::new();
    cache.get_or_try_insert_with(&FontKey::new("caption", 84), || Some(fake_scalable(84)));
    cache.get_or_try_insert_with(&FontKey::new("caption", 110), || Some(fake_scalable(110)));

    assert_eq!(cache.len(), 2);
    assert_eq!(
        cache.get(&FontKey::new("caption", 110)).unwrap().size_px(),
        110
    );
    assert!(cache.get(&FontKey::new("caption", 96)).is_none());
    assert!(cache.get(&FontKey::new("other", 84)).is_none());
}

#[test]
fn failed_loads_are_not_cached() {
    let cache = FontCache::new();
    let key = FontKey::new("caption", 84);
    assert!(cache.get_or_try_insert_with(&key, || None).is_none());
    assert!(cache.is_empty());

    let h = cache
        .get_or_try_insert_with(&key, || Some(FontHandle::Bitmap(&BUILTIN)))
        .unwrap();
    assert!(h.is_fallback());
}

#[test]
fn concurrent_lookups_load_once() {
    let cache = Arc::new(FontCache::new());
    let loads = Arc::new(std::sync::atomic::AtomicUsize::new(0));

    let threads: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            let loads = loads.clone();
            std::thread::spawn(move || {
                cache
                    .get_or_try_insert_with(&FontKey::new("caption", 84), || {
                        loads.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                        Some(fake_scalable(84))
                    })
                    .unwrap()
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }

    assert_eq!(loads.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn global_cache_is_shared() {
    assert!(Arc::ptr_eq(&FontCache::global(), &FontCache::global()));
}
