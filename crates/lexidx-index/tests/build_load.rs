use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use lexidx_core::traits::LemmaSource;
use lexidx_core::{Error, PostingSet};
use lexidx_index::{load_index, load_registry, DirLemmaSource, IndexBuilder, MemoryLemmaSource};
use tempfile::TempDir;

fn ids(v: &[u64]) -> PostingSet { v.iter().copied().collect() }

fn write_page(root: &Path, dir: &str, lemmas: &str) {
    let page = root.join(dir);
    fs::create_dir_all(&page).unwrap();
    fs::write(page.join("lemmas.txt"), lemmas).unwrap();
}

/// Three pages plus a page without lemmas and some unrelated entries.
fn seed_corpus(root: &Path) {
    write_page(root, "page1", "кот кота коты\nмолоко молока\n");
    write_page(root, "page2", "кот коту\nпёс пса\n");
    write_page(root, "page10", "Пёс псу\nрека\n");
    fs::create_dir_all(root.join("page4")).unwrap();
    fs::create_dir_all(root.join("drafts")).unwrap();
    fs::write(root.join("page5"), "not a directory").unwrap();
}

const EXPECTED: &str = "кот 1 2\nмолоко 1\nпёс 2 10\nрека 10\n";

#[test]
fn builds_expected_index_from_page_directories() {
    let tmp = TempDir::new().unwrap();
    let lemmas = tmp.path().join("tokenized_pages");
    seed_corpus(&lemmas);

    let source = DirLemmaSource::open(&lemmas).expect("open source");
    assert_eq!(source.documents().unwrap(), vec![1, 2, 4, 10]);
    assert!(source.lemmas(4).unwrap().is_empty(), "page without lemmas.txt contributes nothing");

    let builder = IndexBuilder::build(&source).expect("build");
    let out = tmp.path().join("out/inverted_index.txt");
    let stats = builder.persist(&out).expect("persist");

    assert_eq!(stats.documents, 4);
    assert_eq!(stats.documents_without_lemmas, 1);
    assert_eq!(stats.lemmas, 4);
    assert_eq!(fs::read_to_string(&out).unwrap(), EXPECTED);
}

#[test]
fn rebuilding_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let lemmas = tmp.path().join("tokenized_pages");
    seed_corpus(&lemmas);
    let first = tmp.path().join("first.txt");
    let second = tmp.path().join("second.txt");

    IndexBuilder::build(&DirLemmaSource::open(&lemmas).unwrap()).unwrap().persist(&first).unwrap();
    IndexBuilder::build(&DirLemmaSource::open(&lemmas).unwrap()).unwrap().persist(&second).unwrap();
    // Overwriting an existing index goes through the same rename path.
    IndexBuilder::build(&DirLemmaSource::open(&lemmas).unwrap()).unwrap().persist(&second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn missing_lemma_directory_is_source_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = DirLemmaSource::open(tmp.path().join("absent")).unwrap_err();
    assert!(matches!(err, Error::SourceNotFound { .. }), "{err}");
}

#[test]
fn empty_source_writes_empty_index() {
    let tmp = TempDir::new().unwrap();
    let lemmas = tmp.path().join("tokenized_pages");
    fs::create_dir_all(&lemmas).unwrap();
    let out = tmp.path().join("inverted_index.txt");

    let stats = IndexBuilder::build(&DirLemmaSource::open(&lemmas).unwrap()).unwrap().persist(&out).unwrap();

    assert_eq!(stats.documents, 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
    assert!(load_index(&out).unwrap().is_empty());
}

#[test]
fn postings_do_not_depend_on_document_order() {
    let docs: [(u64, &[&str]); 4] = [
        (1, &["кот", "молоко"]),
        (2, &["кот", "пёс"]),
        (3, &["пёс"]),
        (7, &["молоко", "кот", "кот"]),
    ];
    let reference = {
        let mut out = Vec::new();
        let mut builder = IndexBuilder::new();
        for (id, lemmas) in docs { builder.add_document(id, lemmas.iter().copied()); }
        builder.write_to(&mut out).unwrap();
        out
    };

    // Every permutation of the four documents.
    let mut order = [0usize, 1, 2, 3];
    let mut permutations = 0;
    loop {
        let mut source = MemoryLemmaSource::new();
        for &i in &order { source.insert(docs[i].0, docs[i].1.iter().copied()); }
        let mut out = Vec::new();
        IndexBuilder::build(&source).unwrap().write_to(&mut out).unwrap();
        assert_eq!(out, reference, "order {order:?}");
        permutations += 1;
        if !next_permutation(&mut order) { break; }
    }
    assert_eq!(permutations, 24);
}

#[test]
fn load_round_trips_what_was_built() {
    let mut source = MemoryLemmaSource::new();
    source.insert(5, ["слон", "кот"]);
    source.insert(2, ["Кот"]);
    source.insert(9, Vec::<String>::new());
    source.insert(11, ["слон"]);

    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("inverted_index.txt");
    IndexBuilder::build(&source).unwrap().persist(&out).unwrap();
    let loaded = load_index(&out).unwrap();

    let mut expected: BTreeMap<String, PostingSet> = BTreeMap::new();
    for doc_id in source.documents().unwrap() {
        for lemma in source.lemmas(doc_id).unwrap() {
            expected.entry(lemma.to_lowercase()).or_default().insert(doc_id);
        }
    }
    assert_eq!(loaded.len(), expected.len());
    for (lemma, postings) in &expected {
        assert_eq!(loaded.get(lemma), Some(postings), "lemma {lemma}");
    }
    assert_eq!(loaded.get("кот"), Some(&ids(&[2, 5])));
}

#[test]
fn missing_index_is_source_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = load_index(&tmp.path().join("inverted_index.txt")).unwrap_err();
    assert!(matches!(err, Error::SourceNotFound { .. }));
}

#[test]
fn malformed_index_reports_file_and_line() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("inverted_index.txt");
    fs::write(&path, "кот 1 2\n\nпёс 2 three\n").unwrap();
    let err = load_index(&path).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("inverted_index.txt:3"), "{message}");
    assert!(message.contains("three"), "{message}");
}

#[test]
fn missing_registry_is_empty() {
    let tmp = TempDir::new().unwrap();
    let registry = load_registry(&tmp.path().join("index.txt")).unwrap();
    assert!(registry.is_empty());
}

#[test]
fn registry_file_loads() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("index.txt");
    fs::write(&path, "1\thttps://ru.example/a\n2\thttps://ru.example/b\n").unwrap();
    let registry = load_registry(&path).unwrap();
    assert_eq!(registry.doc_ids(), ids(&[1, 2]));
    assert_eq!(registry.url(2), "https://ru.example/b");
}

#[test]
fn lemmas_with_spaces_do_not_break_the_round_trip() {
    let source = MemoryLemmaSource::new().with(1, ["кот", "чёрный кот"]).with(2, ["пёс\tбарбос", "пёс"]);
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("inverted_index.txt");
    IndexBuilder::build(&source).unwrap().persist(&out).unwrap();

    let loaded = load_index(&out).expect("persisted index loads back");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.get("кот"), Some(&ids(&[1])));
    assert_eq!(loaded.get("пёс"), Some(&ids(&[2])));
}

#[cfg(unix)]
#[test]
fn persisted_index_is_not_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let source = MemoryLemmaSource::new().with(1, ["кот"]);
    let out = tmp.path().join("inverted_index.txt");
    IndexBuilder::build(&source).unwrap().persist(&out).unwrap();

    // A plain write in the same directory shows what the umask allows.
    let plain = tmp.path().join("plain.txt");
    fs::write(&plain, "").unwrap();
    let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&out), mode(&plain));

    // Rebuilding keeps whatever mode the existing index has.
    fs::set_permissions(&out, fs::Permissions::from_mode(0o640)).unwrap();
    IndexBuilder::build(&source).unwrap().persist(&out).unwrap();
    assert_eq!(mode(&out), 0o640);
}

#[cfg(unix)]
#[test]
fn unreadable_lemma_directory_is_an_error() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let lemmas = tmp.path().join("tokenized_pages");
    write_page(&lemmas, "page1", "кот\n");
    fs::set_permissions(&lemmas, fs::Permissions::from_mode(0o000)).unwrap();
    let readable = fs::read_dir(&lemmas).is_ok();
    let result = DirLemmaSource::open(&lemmas);
    fs::set_permissions(&lemmas, fs::Permissions::from_mode(0o755)).unwrap();

    // Permission bits are not enforced for a privileged user.
    if readable { return; }
    assert!(matches!(result, Err(Error::Io(_))), "{result:?}");
}

fn next_permutation(v: &mut [usize]) -> bool {
    let Some(i) = (1..v.len()).rev().find(|&i| v[i - 1] < v[i]) else { return false };
    let j = (i..v.len()).rev().find(|&j| v[j] > v[i - 1]).unwrap();
    v.swap(i - 1, j);
    v[i..].reverse();
    true
}
