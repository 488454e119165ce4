use tests::blog::{Author, Post};
use tests::*;

use docmodel::{Id, Model};
use pretty_assertions::assert_eq;

fn authors(setup: &Setup, names: &[&str]) -> Vec<Id> {
    names
        .iter()
        .map(|name| {
            let mut author = Author::default();
            author.name = name.to_string();
            assert_ok!(author.create(&setup.db));
            author.id()
        })
        .collect()
}

fn names(authors: &[Author]) -> Vec<&str> {
    authors.iter().map(|author| author.name.as_str()).collect()
}

#[test]
fn slice_is_loaded_in_one_batch() {
    let mut setup = Setup::new();
    let ids = authors(&setup, &["a", "b", "c"]);
    setup.log.clear();

    let mut post = Post::default();
    post.coauthors = ids.clone();

    let resolved = post.get_resolved_coauthors(&setup.db);
    assert!(resolved.is_ok());
    assert_eq!(names(resolved.value()), ["a", "b", "c"]);

    assert_eq!(setup.log.len(), 1);
    assert_eq!(
        setup.log.pop(),
        Some(DriverOp::FindManyByIds {
            collection: "author".to_string(),
            ids,
        })
    );
}

#[test]
fn slice_keeps_request_order_and_omits_missing() {
    let setup = Setup::shuffled();
    let ids = authors(&setup, &["a", "b", "c", "d", "e", "f"]);

    let mut post = Post::default();
    post.coauthors = vec![ids[4], ids[1], Id::new(), ids[5], ids[0], ids[4]];

    let resolved = post.get_resolved_coauthors(&setup.db);
    assert!(resolved.is_ok());

    let loaded = resolved.value();
    assert_eq!(names(loaded), ["e", "b", "f", "a"]);
    assert_unique!(loaded.iter().map(|author| author.id()).collect::<Vec<_>>());
}

#[test]
fn slice_order_does_not_depend_on_the_driver() {
    // One of the two drivers hands the batch back as `[c, a]`.
    for setup in [Setup::new(), Setup::reversed()] {
        let ids = authors(&setup, &["a", "b", "c"]);

        let mut post = Post::default();
        post.coauthors = vec![ids[0], Id::new(), ids[2]];

        let resolved = post.get_resolved_coauthors(&setup.db);
        assert!(resolved.is_ok());
        assert_eq!(names(resolved.value()), ["a", "c"]);
    }
}

#[test]
fn empty_slice_does_not_fetch() {
    let setup = Setup::new();

    let mut post = Post::default();
    let resolved = post.get_resolved_coauthors(&setup.db);

    assert!(resolved.is_ok());
    assert_empty!(resolved.value());
    assert!(setup.log.is_empty());
}

#[test]
fn slice_of_optional_keeps_positions() {
    let setup = Setup::new();
    let ids = authors(&setup, &["x", "y"]);

    let mut post = Post::default();
    post.reviewers = vec![Some(ids[0]), None, Some(ids[1])];

    let resolved = post.get_resolved_reviewers(&setup.db);
    assert!(resolved.is_ok());

    let loaded: Vec<_> = resolved
        .value()
        .iter()
        .map(|author| author.as_ref().map(|author| author.name.as_str()))
        .collect();
    assert_eq!(loaded, [Some("x"), None, Some("y")]);
    assert_eq!(setup.log.finds(), 2);
}

#[test]
fn failure_in_a_loop_stops_the_resolver() {
    let setup = Setup::new();
    let ids = authors(&setup, &["x", "y", "z"]);
    setup.fail_on(ids[1]);

    let mut post = Post::default();
    post.reviewers = vec![Some(ids[0]), Some(ids[1]), Some(ids[2])];

    let (value, err) = post.get_resolved_reviewers(&setup.db).into_parts();
    let err = assert_some!(err);
    assert!(err.to_string().contains("injected failure"), "{err}");

    // Entries after the failure are left unloaded.
    assert_eq!(assert_some!(&value[0]).name, "x");
    assert_none!(&value[2]);
    assert_eq!(setup.log.finds(), 2);

    // Later calls return the cached failure without fetching again.
    assert!(!post.get_resolved_reviewers(&setup.db).is_ok());
    assert_eq!(setup.log.finds(), 2);
}

#[test]
fn map_entries_are_loaded_by_key() {
    let setup = Setup::new();
    let ids = authors(&setup, &["ann", "ben"]);

    let mut post = Post::default();
    post.by_role.insert("writer".to_string(), ids[0]);
    post.by_role.insert("editor".to_string(), ids[1]);

    let resolved = post.get_resolved_by_role(&setup.db);
    assert!(resolved.is_ok());

    let loaded: Vec<_> = resolved
        .value()
        .iter()
        .map(|(role, author)| (role.as_str(), author.name.as_str()))
        .collect();
    assert_eq!(loaded, [("editor", "ben"), ("writer", "ann")]);
}

#[test]
fn map_keeps_entries_resolved_before_a_failure() {
    let setup = Setup::new();
    let ids = authors(&setup, &["ann", "cat"]);

    let mut post = Post::default();
    post.by_role.insert("a".to_string(), ids[0]);
    post.by_role.insert("b".to_string(), Id::new());
    post.by_role.insert("c".to_string(), ids[1]);

    let (value, err) = post.get_resolved_by_role(&setup.db).into_parts();
    assert!(assert_some!(err).is_record_not_found());

    // Keys are visited in order; the failing entry and those after it are
    // not inserted.
    let loaded: Vec<_> = value
        .iter()
        .map(|(role, author)| (role.as_str(), author.name.as_str()))
        .collect();
    assert_eq!(loaded, [("a", "ann")]);
    assert_eq!(setup.log.finds(), 2);
}

#[test]
fn map_of_slices_batches_each_entry() {
    let setup = Setup::new();
    let ids = authors(&setup, &["p", "q", "r"]);

    let mut post = Post::default();
    post.shelves.insert("left".to_string(), vec![ids[2], ids[0]]);
    post.shelves.insert("right".to_string(), vec![ids[1]]);
    post.shelves.insert("empty".to_string(), vec![]);

    let resolved = post.get_resolved_shelves(&setup.db);
    assert!(resolved.is_ok());

    let shelves = resolved.value();
    assert_eq!(names(&shelves["left"]), ["r", "p"]);
    assert_eq!(names(&shelves["right"]), ["q"]);
    assert_empty!(shelves["empty"]);
    assert_eq!(shelves.len(), 3);
    assert_eq!(setup.log.batches(), 2);
}

#[test]
fn empty_map_does_not_fetch() {
    let setup = Setup::new();

    let mut post = Post::default();
    assert!(post.get_resolved_by_role(&setup.db).is_ok());
    assert!(post.get_resolved_shelves(&setup.db).is_ok());
    assert!(setup.log.is_empty());
}
