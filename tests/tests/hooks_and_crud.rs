use tests::blog::{Author, Post};
use tests::*;

use docmodel::{Context, Filter, Id, Model};
use pretty_assertions::assert_eq;

use std::time::Duration;

#[test]
fn create_runs_hooks_in_order() {
    let setup = Setup::new();

    let mut author = Author::default();
    author.name = "ada".to_string();
    assert_ok!(author.create(&setup.db));

    assert!(!author.id().is_nil());
    assert_eq!(author.events, ["creating", "saving", "created", "saved"]);
}

#[test]
fn update_and_delete_run_hooks_in_order() {
    let setup = Setup::new();

    let mut author = Author::default();
    author.name = "ada".to_string();
    assert_ok!(author.create(&setup.db));
    author.events.clear();

    author.name = "ada lovelace".to_string();
    assert_ok!(author.update(&setup.db));
    assert_eq!(author.events, ["updating", "saving", "updated", "saved"]);

    author.events.clear();
    assert_ok!(author.delete(&setup.db));
    assert_eq!(author.events, ["deleting", "deleted"]);

    let mut missing = Author::default();
    let err = assert_err!(missing.find_by_id(&setup.db, &author.id()));
    assert!(err.is_record_not_found());
}

#[test]
fn failing_hook_aborts_the_operation() {
    let setup = Setup::new();

    let mut author = Author::default();
    let err = assert_err!(author.create(&setup.db));

    assert_eq!(err.to_string(), "author name is empty");
    assert!(author.id().is_nil());
    assert!(setup.log.is_empty());
}

#[test]
fn find_runs_queried_hook() {
    let setup = Setup::new();

    let mut author = Author::default();
    author.name = "grace".to_string();
    assert_ok!(author.create(&setup.db));

    let mut found = Author::default();
    assert_ok!(found.find_by_id(&setup.db, &author.id()));
    assert_eq!(found.name, "grace");
    assert_eq!(found.events, ["queried"]);

    let mut by_name = Author::default();
    let filter = assert_ok!(Filter::new().eq("name", "grace"));
    assert_ok!(by_name.find(&setup.db, filter));
    assert_eq!(by_name.id(), author.id());
}

#[test]
fn collection_names() {
    assert_eq!(Author::default().collection_name(), "author");
    assert_eq!(Post::default().collection_name(), "articles");
}

#[test]
fn post_round_trip() {
    let mut setup = Setup::new();

    let mut post = Post::default();
    post.title = "hello".to_string();
    post.views = 3;
    post.author = Id::new();
    post.meta.tags = vec!["rust".to_string()];
    assert_ok!(post.create(&setup.db));

    assert_eq!(
        setup.log.pop(),
        Some(DriverOp::InsertOne {
            collection: "articles".to_string()
        })
    );

    let mut loaded = Post::default();
    assert_ok!(loaded.find_by_id(&setup.db, &post.id()));
    assert_eq!(loaded.title, "hello");
    assert_eq!(loaded.author, post.author);
    assert_eq!(loaded.meta.tags, ["rust"]);
    assert_eq!(loaded.headline(), "hello (3 views)");
}

#[test]
fn update_requires_an_identifier() {
    let setup = Setup::new();

    let mut post = Post::default();
    let err = assert_err!(post.update(&setup.db));
    assert!(err.is_invalid_model(), "{err}");
    assert!(setup.log.is_empty());
}

#[test]
fn expired_context_times_out() {
    let setup = Setup::new();

    let mut author = Author::default();
    author.name = "late".to_string();

    let ctx = Context::with_timeout(Duration::ZERO);
    let err = assert_err!(author.create_with_ctx(&ctx, &setup.db));
    assert!(err.is_operation_timed_out(), "{err}");
}

#[test]
fn context_variants_use_the_given_context() {
    let setup = Setup::new();
    let ctx = Context::with_timeout(Duration::from_secs(5));

    let mut author = Author::default();
    author.name = "kay".to_string();
    assert_ok!(author.create_with_ctx(&ctx, &setup.db));

    let mut found = Author::default();
    assert_ok!(found.find_by_id_with_ctx(&ctx, &setup.db, &author.id()));
    assert_eq!(found.name, "kay");

    assert_ok!(found.delete_with_ctx(&ctx, &setup.db));
}
