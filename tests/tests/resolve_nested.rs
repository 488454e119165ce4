use tests::blog::{Author, Post};
use tests::*;

use docmodel::{Id, Model};
use pretty_assertions::assert_eq;

use std::collections::HashMap;

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

fn name(author: &Option<Author>) -> Option<&str> {
    author.as_ref().map(|author| author.name.as_str())
}

#[test]
fn absent_optional_slice_does_not_fetch() {
    let setup = Setup::new();

    let mut post = Post::default();
    let resolved = post.get_resolved_drafts(&setup.db);

    assert!(resolved.is_ok());
    assert_none!(resolved.value());
    assert!(setup.log.is_empty());
}

#[test]
fn optional_slice_is_one_batch() {
    let setup = Setup::new();
    let ids = authors(&setup, &["x", "y"]);

    let mut post = Post::default();
    post.drafts = Some(vec![ids[1], ids[0]]);

    let resolved = post.get_resolved_drafts(&setup.db);
    assert!(resolved.is_ok());

    let drafts = assert_some!(resolved.value());
    let names: Vec<_> = drafts.iter().map(|author| author.name.as_str()).collect();
    assert_eq!(names, ["y", "x"]);
    assert_eq!(setup.log.batches(), 1);
}

#[test]
fn present_but_empty_optional_slice_does_not_fetch() {
    let setup = Setup::new();

    let mut post = Post::default();
    post.drafts = Some(vec![]);

    let resolved = post.get_resolved_drafts(&setup.db);
    assert!(resolved.is_ok());
    assert_empty!(assert_some!(resolved.value()));
    assert!(setup.log.is_empty());
}

#[test]
fn optional_map_is_loaded_by_key() {
    let setup = Setup::new();
    let ids = authors(&setup, &["marie", "hans"]);

    let mut absent = Post::default();
    assert_none!(absent.get_resolved_translators(&setup.db).value());
    assert_eq!(setup.log.finds(), 0);

    let mut post = Post::default();
    post.translators = Some(HashMap::from([
        ("fr".to_string(), ids[0]),
        ("de".to_string(), ids[1]),
    ]));

    let resolved = post.get_resolved_translators(&setup.db);
    assert!(resolved.is_ok());

    let translators = assert_some!(resolved.value());
    let mut loaded: Vec<_> = translators
        .iter()
        .map(|(lang, author)| (lang.as_str(), author.name.as_str()))
        .collect();
    loaded.sort();
    assert_eq!(loaded, [("de", "hans"), ("fr", "marie")]);
    assert_eq!(setup.log.finds(), 2);
}

#[test]
fn nested_slices_keep_gaps() {
    let setup = Setup::new();
    let ids = authors(&setup, &["x", "y"]);

    let mut post = Post::default();
    post.stacks = vec![vec![Some(ids[0]), None], vec![], vec![Some(ids[1])]];

    let resolved = post.get_resolved_stacks(&setup.db);
    assert!(resolved.is_ok());

    let stacks: Vec<Vec<_>> = resolved
        .value()
        .iter()
        .map(|stack| stack.iter().map(name).collect())
        .collect();
    assert_eq!(stacks, [vec![Some("x"), None], vec![], vec![Some("y")]]);
    assert_eq!(setup.log.finds(), 2);
}

#[test]
fn map_of_optional_keeps_absent_entries() {
    let setup = Setup::new();
    let ids = authors(&setup, &["x"]);

    let mut post = Post::default();
    post.mentions.insert("a".to_string(), Some(ids[0]));
    post.mentions.insert("b".to_string(), None);

    let resolved = post.get_resolved_mentions(&setup.db);
    assert!(resolved.is_ok());

    let mut mentions: Vec<_> = resolved
        .value()
        .iter()
        .map(|(key, author)| (key.as_str(), name(author)))
        .collect();
    mentions.sort();
    assert_eq!(mentions, [("a", Some("x")), ("b", None)]);
    assert_eq!(setup.log.finds(), 1);
}
