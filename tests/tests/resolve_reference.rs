use tests::blog::{Author, Post};
use tests::*;

use docmodel::{Id, Model};
use pretty_assertions::assert_eq;

fn author(setup: &Setup, name: &str) -> Author {
    let mut author = Author::default();
    author.name = name.to_string();
    assert_ok!(author.create(&setup.db));
    author
}

#[test]
fn resolves_single_reference() {
    let setup = Setup::new();
    let alice = author(&setup, "alice");

    let mut post = Post::default();
    post.author = alice.id();

    let resolved = post.get_resolved_author(&setup.db);
    assert!(resolved.is_ok());
    assert_eq!(resolved.value().name, "alice");
    assert_eq!(resolved.value().events, ["queried"]);
}

#[test]
fn second_call_does_not_fetch() {
    let mut setup = Setup::new();
    let alice = author(&setup, "alice");
    setup.log.clear();

    let mut post = Post::default();
    post.author = alice.id();

    assert_eq!(post.get_resolved_author(&setup.db).value().name, "alice");
    assert_eq!(setup.log.finds(), 1);

    // The cached outcome is returned even after the document changes.
    let mut renamed = alice;
    renamed.name = "alicia".to_string();
    assert_ok!(renamed.update(&setup.db));
    setup.log.clear();

    assert_eq!(post.get_resolved_author(&setup.db).value().name, "alice");
    assert!(setup.log.is_empty());
}

#[test]
fn missing_document_is_reported_and_cached() {
    let setup = Setup::new();

    let mut post = Post::default();
    post.author = Id::new();

    let err = assert_some!(post.get_resolved_author(&setup.db).error()).clone();
    assert!(err.is_record_not_found(), "{err}");
    assert_eq!(setup.log.finds(), 1);

    let again = assert_some!(post.get_resolved_author(&setup.db).error()).clone();
    assert!(again.ptr_eq(&err));
    assert_eq!(setup.log.finds(), 1);
}

#[test]
fn driver_failure_is_returned() {
    let setup = Setup::new();
    let alice = author(&setup, "alice");
    setup.fail_on(alice.id());

    let mut post = Post::default();
    post.author = alice.id();

    let err = assert_err!(post.get_resolved_author(&setup.db).into_result());
    assert!(err.to_string().contains("injected failure"), "{err}");
}

#[test]
fn absent_optional_reference_does_not_fetch() {
    let setup = Setup::new();

    let mut post = Post::default();
    let resolved = post.get_resolved_editor(&setup.db);

    assert!(resolved.is_ok());
    assert_none!(resolved.value());
    assert!(setup.log.is_empty());
}

#[test]
fn present_optional_reference_is_loaded() {
    let setup = Setup::new();
    let bob = author(&setup, "bob");

    let mut post = Post::default();
    post.editor = Some(bob.id());

    let editor = assert_ok!(post.get_resolved_editor(&setup.db).into_result());
    assert_eq!(assert_some!(editor.as_ref()).name, "bob");
}

#[test]
fn opted_out_field_keeps_its_type() {
    let mut sponsor = Author::default();
    sponsor.name = "acme".to_string();

    let mut post = Post::default();
    post.sponsor = Some(sponsor);

    let document = assert_ok!(serde_json::to_value(&post));
    assert_eq!(document["sponsor"]["name"], "acme");
}

#[test]
fn resolver_state_is_not_stored() {
    let setup = Setup::new();
    let alice = author(&setup, "alice");

    let mut post = Post::default();
    post.title = "hello".to_string();
    post.author = alice.id();
    assert!(post.get_resolved_author(&setup.db).is_ok());

    let document = assert_ok!(serde_json::to_value(&post));
    let object = assert_some!(document.as_object());

    assert_eq!(object["author"], serde_json::json!(alice.id().to_string()));
    assert!(object.contains_key("_id"));
    assert!(!object.contains_key("base"));
    for slot in ["err_author", "init_author", "resolved_author"] {
        assert!(!object.contains_key(slot), "{slot}");
    }
}
