use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "captionburn_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn missing_candidates_fall_back_to_bitmap() {
    let cache = Arc::new(FontCache::new());
    let resolver = FontResolver::with_font_dir(Path::new("/nonexistent/captionburn"), cache.clone());

    let font = resolver.resolve(84);
    assert!(font.is_fallback());
    assert_eq!(font.size_px(), 8);
    assert!(cache.is_empty());
}

#[test]
fn corrupt_candidate_is_skipped() {
    let tmp = temp_dir("resolver_corrupt");
    std::fs::create_dir_all(&tmp).unwrap();
    let bad = tmp.join("broken.ttf");
    std::fs::write(&bad, b"\0\x01\0\0definitely not sfnt").unwrap();

    let resolver = FontResolver::new(
        "caption",
        [bad, tmp.join("missing.ttf")],
        Arc::new(FontCache::new()),
    );
    assert!(resolver.resolve(42).is_fallback());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn default_candidates_are_ordered() {
    let resolver = FontResolver::with_font_dir(Path::new("assets"), Arc::new(FontCache::new()));
    let names: Vec<_> = resolver
        .candidates()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, DEFAULT_FONT_FILES);
    assert!(resolver.candidates()[0].starts_with("assets"));
    assert_eq!(resolver.family(), DEFAULT_FAMILY);
}

#[test]
fn resolve_is_repeatable() {
    let resolver = FontResolver::new("caption", Vec::new(), Arc::new(FontCache::new()));
    let a = resolver.resolve(60);
    let b = resolver.resolve(60);
    assert_eq!(a.family(), b.family());
    assert_eq!(a.size_px(), b.size_px());
}

fn fixture_font() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/DejaVuSans-Bold.ttf")
}

#[test]
fn first_loadable_candidate_wins_and_is_cached_per_size() {
    let cache = Arc::new(FontCache::new());
    let resolver = FontResolver::new(
        "caption",
        [PathBuf::from("/nonexistent/captionburn/a.ttf"), fixture_font()],
        cache.clone(),
    );

    let a = resolver.resolve(110);
    assert!(!a.is_fallback());
    assert_eq!(a.size_px(), 110);
    assert!(a.family().contains("DejaVu"), "{}", a.family());
    assert_eq!(a.source_path(), Some(fixture_font().as_path()));
    assert_eq!(cache.len(), 1);

    let b = resolver.resolve(110);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);

    let c = resolver.resolve(55);
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(c.size_px(), 55);
    assert_eq!(cache.len(), 2);
    assert!(cache.get(&FontKey::new("caption", 110)).is_some());
}
