use dirdupe::duplicates::DuplicateIndex;
use dirdupe::scanner::{DirectoryNode, ErrorPolicy, Hasher, ScanError, Scanner};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Recompute every node's size from its own files and children.
fn assert_sizes_consistent(node: &DirectoryNode, on_disk: &Path) {
    let files: u64 = node
        .files
        .iter()
        .map(|name| fs::metadata(on_disk.join(name)).unwrap().len())
        .sum();
    let children: u64 = node.subdirectories.iter().map(|d| d.size).sum();
    assert_eq!(node.size, files + children, "size mismatch at {}", on_disk.display());

    for child in &node.subdirectories {
        assert_sizes_consistent(child, &on_disk.join(&child.name));
    }
}

#[test]
fn test_scan_reference_tree() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    write(&root.join("a.txt"), b"X");
    write(&root.join("sub/b.txt"), b"X");
    write(&root.join("sub/c.txt"), b"Y");

    let mut index = DuplicateIndex::new();
    let (tree, report) = Scanner::with_defaults().scan(&root, &mut index).unwrap();

    assert_eq!(tree.name, "root");
    assert_eq!(tree.size, 3);
    assert_eq!(tree.files, vec!["a.txt"]);
    let sub = tree.subdirectory("sub").unwrap();
    assert_eq!(sub.size, 2);
    let mut sub_files = sub.files.clone();
    sub_files.sort();
    assert_eq!(sub_files, vec!["b.txt", "c.txt"]);

    assert_eq!(report.files, 3);
    assert_eq!(index.len(), 2);

    let hasher = Hasher::new();
    let x = hasher.full_hash(&root.join("a.txt")).unwrap();
    let y = hasher.full_hash(&root.join("sub/c.txt")).unwrap();
    assert_eq!(x, hasher.full_hash(&root.join("sub/b.txt")).unwrap());

    let dup = index.get(&x).unwrap();
    assert_eq!(dup.copies, 2);
    assert_eq!(dup.size, 1);
    // Equal length: whichever the filesystem listed first is kept
    assert!(dup.name == "a.txt" || dup.name == "b.txt");

    assert_eq!(index.get(&y).unwrap().copies, 1);
    assert_eq!(index.duplicates().count(), 1);
}

#[test]
fn test_shortest_name_wins_across_directories() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("deep/nested/x.bin"), b"payload");
    write(&dir.path().join("long-name.bin"), b"payload");
    write(&dir.path().join("other/medium.bin"), b"payload");

    let mut index = DuplicateIndex::new();
    Scanner::with_defaults().scan(dir.path(), &mut index).unwrap();

    let entry = index.duplicates().next().unwrap();
    assert_eq!(entry.name, "x.bin");
    assert_eq!(entry.copies, 3);
    assert_eq!(entry.size, 7);
}

#[test]
fn test_size_invariant_holds_for_every_node() {
    let dir = tempdir().unwrap();
    for (i, path) in ["a", "b/c", "b/d/e", "b/d/f", "g/h/i/j"].iter().enumerate() {
        write(&dir.path().join(path).join(format!("file{i}.dat")), &vec![b'z'; i * 100 + 1]);
    }
    fs::create_dir_all(dir.path().join("empty/also_empty")).unwrap();

    let mut index = DuplicateIndex::new();
    let (tree, report) = Scanner::with_defaults().scan(dir.path(), &mut index).unwrap();

    assert_sizes_consistent(&tree, dir.path());
    assert_eq!(tree.size, report.bytes);
    let empty = tree.subdirectory("empty").unwrap();
    assert_eq!(empty.size, 0);
    assert!(empty.subdirectory("also_empty").unwrap().is_empty());
}

#[test]
fn test_empty_files_are_duplicates_of_each_other() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("e1"), b"");
    write(&dir.path().join("e22"), b"");

    let mut index = DuplicateIndex::new();
    Scanner::with_defaults().scan(dir.path(), &mut index).unwrap();

    let entry = index.duplicates().next().unwrap();
    assert_eq!(entry.name, "e1");
    assert_eq!(entry.size, 0);
    assert_eq!(entry.copies, 2);
}

#[test]
fn test_chunk_size_does_not_change_results() {
    let dir = tempdir().unwrap();
    let content: Vec<u8> = (0..10_000u32).map(|i| (i * 7 % 256) as u8).collect();
    write(&dir.path().join("one.bin"), &content);
    write(&dir.path().join("sub/two.bin"), &content);

    let mut small = DuplicateIndex::new();
    Scanner::new(Hasher::new().with_chunk_size(3))
        .scan(dir.path(), &mut small)
        .unwrap();
    let mut large = DuplicateIndex::new();
    Scanner::new(Hasher::new().with_chunk_size(1 << 20))
        .scan(dir.path(), &mut large)
        .unwrap();

    let mut a: Vec<_> = small.iter().map(|(h, e)| (*h, e.copies)).collect();
    let mut b: Vec<_> = large.iter().map(|(h, e)| (*h, e.copies)).collect();
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

/// Files `read_dir` lists before `name`, i.e. the ones a scan visits first.
fn files_listed_before(dir: &Path, name: &str) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap())
        .take_while(|entry| entry.file_name() != name)
        .filter(|entry| entry.file_type().unwrap().is_file())
        .count()
}

#[cfg(unix)]
#[test]
fn test_unreadable_nested_entry_aborts_and_keeps_prior_records() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good");
    write(&good.join("kept.txt"), b"already indexed");

    let mut index = DuplicateIndex::new();
    Scanner::with_defaults().scan(&good, &mut index).unwrap();
    assert_eq!(index.len(), 1);

    let bad = dir.path().join("bad");
    for (name, content) in [("one.txt", "1"), ("two.txt", "22"), ("three.txt", "333")] {
        write(&bad.join(name), content.as_bytes());
    }
    fs::create_dir_all(bad.join("nested")).unwrap();
    std::os::unix::fs::symlink(bad.join("vanished"), bad.join("nested/broken")).unwrap();
    let visited = files_listed_before(&bad, "nested");

    let result = Scanner::with_defaults().scan(&bad, &mut index);

    assert!(matches!(result, Err(ScanError::NotFound(p)) if p.ends_with("nested/broken")));
    // Files hashed earlier in the failing scan stay recorded
    assert_eq!(index.len(), 1 + visited);
    assert!(index.iter().any(|(_, e)| e.name == "kept.txt"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_is_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    for (name, content) in [("a.txt", "a"), ("bb.txt", "bb"), ("ccc.txt", "ccc")] {
        write(&root.join(name), content.as_bytes());
    }
    let locked = root.join("locked");
    write(&locked.join("hidden.txt"), b"hidden");
    let visited = files_listed_before(&root, "locked");

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        // Privileged users read through mode 000
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let mut index = DuplicateIndex::new();
    let aborted = Scanner::with_defaults().scan(&root, &mut index);
    let mut skipped_index = DuplicateIndex::new();
    let skipped = Scanner::with_defaults()
        .with_error_policy(ErrorPolicy::Skip)
        .scan(&root, &mut skipped_index);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(aborted, Err(ScanError::PermissionDenied(ref p)) if *p == locked));
    assert_eq!(index.len(), visited);

    let (tree, report) = skipped.unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(&report.warnings[0], ScanError::PermissionDenied(p) if *p == locked));
    assert!(tree.subdirectory("locked").is_none());
    assert_eq!(tree.size, 6);
    assert_eq!(skipped_index.len(), 3);
}

#[cfg(unix)]
#[test]
fn test_skip_policy_collects_warnings() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a/ok.txt"), b"ok");
    write(&dir.path().join("b/ok2.txt"), b"ok");
    std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("a/broken")).unwrap();

    let mut index = DuplicateIndex::new();
    let (tree, report) = Scanner::with_defaults()
        .with_error_policy(ErrorPolicy::Skip)
        .scan(dir.path(), &mut index)
        .unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.files, 2);
    assert_eq!(tree.size, 4);
    assert_eq!(index.duplicates().next().unwrap().copies, 2);
}
