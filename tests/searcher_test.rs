use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dirsearch::{
    DirectorySearcher, ErrorLogger, ErrorType, FileErrorPolicy, FileTypes, MatchRecord, PathStyle,
    SearchError, SearchOutcome, WalkOptions,
};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// 创建测试目录树
///
/// ```text
/// tmp/
///   README
///   collection.db
///   notes.MD
///   osu!.exe
///   games/
///     FntNames.DB
///     osu!.exe
///     saves/
///       slot1.db
/// ```
fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("README"), "read me").unwrap();
    fs::write(root.join("collection.db"), "abc").unwrap();
    fs::write(root.join("notes.MD"), "some notes").unwrap();
    fs::write(root.join("osu!.exe"), vec![0u8; 16]).unwrap();

    let games = root.join("games");
    fs::create_dir(&games).unwrap();
    fs::write(games.join("FntNames.DB"), "fonts").unwrap();
    fs::write(games.join("osu!.exe"), vec![0u8; 32]).unwrap();

    let saves = games.join("saves");
    fs::create_dir(&saves).unwrap();
    fs::write(saves.join("slot1.db"), "slot").unwrap();

    dir
}

fn relative(outcome: &SearchOutcome, root: &Path) -> Vec<PathBuf> {
    outcome
        .paths()
        .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_missing_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = DirectorySearcher::new(dir.path().join("missing"));
    assert!(matches!(result, Err(SearchError::PathNotFound(_))));
}

#[test]
fn test_file_root_is_accepted_but_empty() {
    let dir = setup_test_dir();
    let searcher = DirectorySearcher::new(dir.path().join("collection.db")).unwrap();

    let outcome = searcher.search_by_suffix("db", PathStyle::Text).unwrap();
    assert!(outcome.is_empty());
    assert_eq!(outcome.scanned_files, 0);
}

// ---------------------------------------------------------------------------
// Suffix
// ---------------------------------------------------------------------------

#[test]
fn test_suffix_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("x.DB"), "abc").unwrap();
    fs::write(dir.path().join("y.db"), "abc").unwrap();

    let searcher = DirectorySearcher::new(dir.path()).unwrap();
    let expected = vec![PathBuf::from("x.DB"), PathBuf::from("y.db")];

    let outcome = searcher.search_by_suffix("db", PathStyle::Text).unwrap();
    assert_eq!(relative(&outcome, dir.path()), expected);

    let outcome = searcher.search_by_suffix(".DB", PathStyle::Text).unwrap();
    assert_eq!(relative(&outcome, dir.path()), expected);
}

#[test]
fn test_suffix_search_recurses() {
    let dir = setup_test_dir();
    let searcher = DirectorySearcher::new(dir.path()).unwrap();

    let outcome = searcher.search_by_suffix("db", PathStyle::Text).unwrap();
    assert_eq!(
        relative(&outcome, dir.path()),
        vec![
            PathBuf::from("collection.db"),
            PathBuf::from("games/FntNames.DB"),
            PathBuf::from("games/saves/slot1.db"),
        ]
    );
    assert_eq!(outcome.scanned_files, 7);
}

#[test]
fn test_empty_suffix_matches_files_without_extension() {
    let dir = setup_test_dir();
    fs::write(dir.path().join(".bashrc"), "export A=1").unwrap();
    let searcher = DirectorySearcher::new(dir.path()).unwrap();

    let outcome = searcher.search_by_suffix("", PathStyle::Text).unwrap();
    assert_eq!(
        relative(&outcome, dir.path()),
        vec![PathBuf::from(".bashrc"), PathBuf::from("README")]
    );
}

// ---------------------------------------------------------------------------
// Name
// ---------------------------------------------------------------------------

#[test]
fn test_name_search() {
    let dir = setup_test_dir();
    let searcher = DirectorySearcher::new(dir.path()).unwrap();

    let outcome = searcher.search_by_name("osu!.exe", PathStyle::Structured).unwrap();
    assert_eq!(
        relative(&outcome, dir.path()),
        vec![PathBuf::from("games/osu!.exe"), PathBuf::from("osu!.exe")]
    );
    assert!(outcome
        .matches
        .iter()
        .all(|m| matches!(m, MatchRecord::Structured(_))));

    let outcome = searcher.search_by_name("OSU!.EXE", PathStyle::Text).unwrap();
    assert!(outcome.is_empty());
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

#[test]
fn test_size_search_rounding() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("file1.bin"), vec![7u8; 1024]).unwrap();
    fs::write(dir.path().join("other.bin"), vec![7u8; 10]).unwrap();
    let searcher = DirectorySearcher::new(dir.path()).unwrap();
    let expected = vec![PathBuf::from("file1.bin")];

    let outcome = searcher.search_by_size(1024.0, true, PathStyle::Text).unwrap();
    assert_eq!(relative(&outcome, dir.path()), expected);

    let outcome = searcher.search_by_size(1024.4, true, PathStyle::Text).unwrap();
    assert_eq!(relative(&outcome, dir.path()), expected);

    let outcome = searcher.search_by_size(1024.4, false, PathStyle::Text).unwrap();
    assert!(outcome.is_empty());
}

#[cfg(unix)]
#[test]
fn test_size_search_dangling_symlink() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.bin"), "abc").unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("broken")).unwrap();

    // 默认中止整个搜索
    let searcher = DirectorySearcher::new(dir.path()).unwrap();
    let result = searcher.search_by_size(3.0, true, PathStyle::Text);
    assert!(matches!(result, Err(SearchError::Metadata { .. })));
    assert_eq!(searcher.last_search_time(), None);

    // 跳过模式下记录错误并返回其余结果
    let errors = Arc::new(ErrorLogger::disabled());
    let searcher = DirectorySearcher::new(dir.path())
        .unwrap()
        .with_walk_options(WalkOptions {
            on_file_error: FileErrorPolicy::Skip,
            ..WalkOptions::default()
        })
        .with_error_logger(errors.clone());
    let outcome = searcher.search_by_size(3.0, true, PathStyle::Text).unwrap();
    assert_eq!(relative(&outcome, dir.path()), vec![PathBuf::from("a.bin")]);
    assert_eq!(errors.get_error_summary().get(&ErrorType::FileMetadata), Some(&1));
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = setup_test_dir();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden.db"), "x").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // 以 root 运行时权限不生效，无法构造列举错误
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let errors = Arc::new(ErrorLogger::disabled());
    let searcher = DirectorySearcher::new(dir.path())
        .unwrap()
        .with_error_logger(errors.clone());
    let result = searcher.search_by_suffix("db", PathStyle::Text);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let outcome = result.unwrap();
    assert_eq!(
        relative(&outcome, dir.path()),
        vec![
            PathBuf::from("collection.db"),
            PathBuf::from("games/FntNames.DB"),
            PathBuf::from("games/saves/slot1.db"),
        ]
    );
    assert_eq!(errors.get_error_summary().get(&ErrorType::WalkListing), Some(&1));
    assert_eq!(errors.get_total_errors(), 1);
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[test]
fn test_content_search() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::write(dir.path().join("b.md"), "world").unwrap();
    fs::write(dir.path().join("c.txt"), "hello world").unwrap();
    fs::write(dir.path().join("d.rs"), "hello").unwrap();

    let searcher = DirectorySearcher::new(dir.path()).unwrap();
    let outcome = searcher
        .search_by_content(Some("hello"), &FileTypes::new(["txt", "md"]), PathStyle::Text)
        .unwrap();

    assert_eq!(
        relative(&outcome, dir.path()),
        vec![PathBuf::from("a.txt"), PathBuf::from("c.txt")]
    );
}

#[test]
fn test_content_search_non_utf8_fallback() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("latin1.txt"), b"caf\xe9 marker").unwrap();
    fs::write(dir.path().join("plain.txt"), "nothing here").unwrap();

    let searcher = DirectorySearcher::new(dir.path()).unwrap();
    let outcome = searcher
        .search_by_content(Some("marker"), &FileTypes::default(), PathStyle::Text)
        .unwrap();

    assert_eq!(relative(&outcome, dir.path()), vec![PathBuf::from("latin1.txt")]);
}

#[test]
fn test_content_search_long_query() {
    let dir = tempfile::tempdir().unwrap();
    let needle = "needle(".repeat(20_000);
    fs::write(dir.path().join("big.txt"), format!("head {} tail", needle)).unwrap();
    fs::write(dir.path().join("small.txt"), "needle(").unwrap();

    let searcher = DirectorySearcher::new(dir.path()).unwrap();
    let outcome = searcher
        .search_by_content(Some(&needle), &FileTypes::default(), PathStyle::Text)
        .unwrap();

    assert_eq!(relative(&outcome, dir.path()), vec![PathBuf::from("big.txt")]);
    assert_eq!(outcome.scanned_files, 2);
}

#[test]
fn test_content_search_upper_case_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.TXT"), "hello").unwrap();

    let searcher = DirectorySearcher::new(dir.path()).unwrap();
    let outcome = searcher
        .search_by_content(Some("hello"), &FileTypes::new(["txt"]), PathStyle::Text)
        .unwrap();

    assert_eq!(relative(&outcome, dir.path()), vec![PathBuf::from("A.TXT")]);
}

#[test]
fn test_content_search_absent_query() {
    let dir = setup_test_dir();
    let searcher = DirectorySearcher::new(dir.path()).unwrap();

    let outcome = searcher
        .search_by_content(None, &FileTypes::default(), PathStyle::Text)
        .unwrap();
    assert!(outcome.is_empty());
    assert!(searcher.last_search_time().is_some());
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

#[test]
fn test_last_search_time_tracks_latest_call() {
    let dir = setup_test_dir();
    let searcher = DirectorySearcher::new(dir.path()).unwrap();
    assert!(searcher.last_search_time().is_none());

    let first = searcher.search_by_suffix("db", PathStyle::Text).unwrap();
    assert_eq!(searcher.last_search_time(), Some(first.duration));

    let second = searcher.search_by_name("README", PathStyle::Text).unwrap();
    assert_eq!(searcher.last_search_time(), Some(second.duration));
    assert!(second.elapsed_secs() >= 0.0);
}
