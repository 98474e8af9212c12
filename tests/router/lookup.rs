use std::sync::{Arc, Mutex};

use crate::common::{ctx_for, handler};
use taproot::{HandlerFunc, MatchContext, MiddlewareFunc, RadixTree};

type CallLog = Arc<Mutex<Vec<&'static str>>>;

fn recording_handler(name: &'static str, log: CallLog) -> HandlerFunc {
    HandlerFunc::new(name, move |_| {
        log.lock().unwrap().push(name);
        Ok(())
    })
}

fn recording_layer(name: &'static str, log: CallLog) -> MiddlewareFunc {
    Arc::new(move |next: HandlerFunc| {
        let log = Arc::clone(&log);
        HandlerFunc::new(name, move |ctx| {
            log.lock().unwrap().push(name);
            next.call(ctx)
        })
    })
}

#[test]
fn lookup_applies_the_global_chain_in_registration_order() {
    let log: CallLog = Arc::default();
    let mut tree = RadixTree::new();
    tree.add("GET", "/r", recording_handler("h", Arc::clone(&log))).unwrap();
    tree.use_middleware(recording_layer("outer", Arc::clone(&log)));
    tree.use_middleware(recording_layer("inner", Arc::clone(&log)));
    tree.seal();

    let mut ctx = ctx_for(&tree);
    tree.lookup("GET", "/r", &mut ctx);
    let resolved = ctx.handler().clone();
    resolved.call(&mut ctx).unwrap();
    assert_eq!(*log.lock().unwrap(), ["outer", "inner", "h"]);
}

#[test]
fn find_does_not_apply_the_global_chain() {
    let log: CallLog = Arc::default();
    let mut tree = RadixTree::new();
    tree.add("GET", "/r", recording_handler("h", Arc::clone(&log))).unwrap();
    tree.use_middleware(recording_layer("outer", Arc::clone(&log)));
    tree.seal();

    let mut ctx = ctx_for(&tree);
    tree.find("GET", "/r", &mut ctx);
    let resolved = ctx.handler().clone();
    resolved.call(&mut ctx).unwrap();
    assert_eq!(*log.lock().unwrap(), ["h"]);
}

#[test]
fn per_route_layers_run_inside_the_global_chain() {
    let log: CallLog = Arc::default();
    let mut tree = RadixTree::new();
    tree.add_handler(
        "GET",
        "/r",
        recording_handler("h", Arc::clone(&log)),
        &[recording_layer("route", Arc::clone(&log))],
    )
    .unwrap();
    tree.use_middleware(recording_layer("global", Arc::clone(&log)));
    tree.seal();

    let mut ctx = ctx_for(&tree);
    tree.lookup("GET", "/r", &mut ctx);
    let resolved = ctx.handler().clone();
    resolved.call(&mut ctx).unwrap();
    assert_eq!(*log.lock().unwrap(), ["global", "route", "h"]);
}

#[test]
fn lookup_attaches_the_route_index() {
    let mut tree = RadixTree::new();
    tree.add_handler("GET", "/x", handler("xh"), &[]).unwrap();
    tree.seal();

    let mut ctx = ctx_for(&tree);
    tree.lookup("GET", "/x", &mut ctx);
    let index = ctx.route_index().expect("index attached by lookup");
    assert_eq!(index.get("GET /x").unwrap().name, "xh");

    // plain find leaves the index detached
    ctx.reset();
    tree.find("GET", "/x", &mut ctx);
    assert!(ctx.route_index().is_none());
}

#[test]
fn lookup_wraps_the_not_found_classification_too() {
    let log: CallLog = Arc::default();
    let mut tree = RadixTree::new();
    tree.add("GET", "/r", handler("h")).unwrap();
    tree.use_middleware(recording_layer("outer", Arc::clone(&log)));
    tree.seal();

    let mut ctx = ctx_for(&tree);
    tree.lookup("GET", "/missing", &mut ctx);
    let resolved = ctx.handler().clone();
    let err = resolved.call(&mut ctx).unwrap_err();
    assert_eq!(err.status, 404);
    assert_eq!(*log.lock().unwrap(), ["outer"]);
}
