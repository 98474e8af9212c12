use crate::common::{ctx_for, find_name, handler};
use taproot::{MatchContext, RadixTree};

#[test]
fn resolves_deep_static_and_param_paths() {
    let mut tree = RadixTree::new();
    tree.add("GET", "/a/b/c/d/e/f/g", handler("static")).unwrap();
    tree.add("GET", "/a/b/c/:x/e/f/g", handler("param")).unwrap();
    tree.seal();

    assert_eq!(find_name(&tree, "GET", "/a/b/c/d/e/f/g"), "static");
    assert_eq!(find_name(&tree, "GET", "/a/b/c/ZZ/e/f/g"), "param");
    assert_eq!(find_name(&tree, "GET", "/a/b/c"), "not_found");
}

#[test]
fn param_values_may_contain_punctuation() {
    let mut tree = RadixTree::new();
    tree.add("GET", "/pkg/:name/:ver", handler("pkg")).unwrap();
    tree.seal();

    let mut ctx = ctx_for(&tree);
    tree.find("GET", "/pkg/foo-lib/1.2.3", &mut ctx);
    assert_eq!(ctx.handler().name(), "pkg");
    assert_eq!(ctx.param("name"), Some("foo-lib"));
    assert_eq!(ctx.param("ver"), Some("1.2.3"));
}

#[test]
fn param_and_static_siblings_coexist_under_one_node() {
    let mut tree = RadixTree::new();
    tree.add("GET", "/p/:n", handler("n")).unwrap();
    tree.add("GET", "/p/x", handler("x")).unwrap();
    tree.add("GET", "/p/a", handler("a")).unwrap();
    tree.seal();

    assert_eq!(find_name(&tree, "GET", "/p/xyz"), "n");
    assert_eq!(find_name(&tree, "GET", "/p/x"), "x");
    assert_eq!(find_name(&tree, "GET", "/p/a"), "a");
}

#[test]
fn context_is_reusable_across_requests() {
    let mut tree = RadixTree::new();
    tree.add("GET", "/users/:id", handler("user")).unwrap();
    tree.add("GET", "/files/*", handler("files")).unwrap();
    tree.seal();

    let mut ctx = ctx_for(&tree);
    tree.find("GET", "/users/42", &mut ctx);
    assert_eq!(ctx.handler().name(), "user");
    assert_eq!(ctx.param("id"), Some("42"));

    ctx.reset();
    assert_eq!(ctx.handler().name(), "not_found");
    assert_eq!(ctx.param("id"), None);

    tree.find("GET", "/files/a/b", &mut ctx);
    assert_eq!(ctx.handler().name(), "files");
    assert_eq!(ctx.param("*"), Some("a/b"));
    assert_eq!(ctx.param("id"), None);
}

#[test]
fn wrong_verb_on_a_wildcard_route_is_method_not_allowed() {
    let mut tree = RadixTree::new();
    tree.add("POST", "/files/*", handler("upload")).unwrap();
    tree.seal();

    // the wildcard node carries POST, so GET classifies as 405 either way
    assert_eq!(find_name(&tree, "GET", "/files/x"), "method_not_allowed");
    assert_eq!(find_name(&tree, "GET", "/files/"), "method_not_allowed");
    assert_eq!(find_name(&tree, "POST", "/files/x"), "upload");
}

#[test]
fn empty_tree_matches_nothing() {
    let tree = RadixTree::new();
    assert_eq!(find_name(&tree, "GET", "/"), "not_found");
    assert_eq!(find_name(&tree, "GET", "/anything"), "not_found");
}

#[test]
fn empty_request_path_resolves_against_the_root_node() {
    // an empty path ends the search at the root immediately, so it sees
    // whatever the root node happens to carry
    let mut tree = RadixTree::new();
    tree.add("GET", "/a", handler("a")).unwrap();
    tree.add("GET", "/b", handler("b")).unwrap();
    tree.seal();
    assert_eq!(find_name(&tree, "GET", ""), "not_found");

    let mut single = RadixTree::new();
    single.add("GET", "/r", handler("r")).unwrap();
    single.seal();
    assert_eq!(find_name(&single, "GET", ""), "r");
}

#[test]
fn duplicate_slashes_are_part_of_the_path() {
    let mut tree = RadixTree::new();
    tree.add("GET", "/a/b", handler("ab")).unwrap();
    tree.seal();
    assert_eq!(find_name(&tree, "GET", "/a//b"), "not_found");
}

#[test]
fn dot_segments_are_ordinary_literals() {
    let mut tree = RadixTree::new();
    tree.add("GET", "/a/./b", handler("dot")).unwrap();
    tree.add("GET", "/a/../b", handler("dotdot")).unwrap();
    tree.seal();
    assert_eq!(find_name(&tree, "GET", "/a/./b"), "dot");
    assert_eq!(find_name(&tree, "GET", "/a/../b"), "dotdot");
    assert_eq!(find_name(&tree, "GET", "/a/b"), "not_found");
}

#[test]
fn capture_slots_are_overwritten_in_place() {
    let mut tree = RadixTree::new();
    tree.add("GET", "/v/:x", handler("v")).unwrap();
    tree.seal();

    let mut ctx = ctx_for(&tree);
    tree.find("GET", "/v/long-first-value", &mut ctx);
    assert_eq!(ctx.param("x"), Some("long-first-value"));

    ctx.reset();
    tree.find("GET", "/v/tiny", &mut ctx);
    assert_eq!(ctx.param("x"), Some("tiny"));
    assert_eq!(ctx.param_values().len(), 1);
}
