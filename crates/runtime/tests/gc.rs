//! Collector behavior as observed from Scheme: soundness (rooted data
//! survives), completeness (garbage is reclaimed), and symbol identity
//! across collections.

use sable_runtime::{eval_source, gc_stats, interaction_environment, printable};

fn run(src: &str) -> String {
    sable_runtime::init();
    match eval_source(src, interaction_environment()) {
        Ok(v) => printable(v),
        Err(e) => panic!("evaluation failed for {src:?}: {e}"),
    }
}

#[test]
fn test_garbage_collect_returns_byte_count() {
    sable_runtime::init();
    let v = eval_source("(garbage-collect)", interaction_environment()).unwrap();
    assert!(v.is_int() || v.is_double());
}

#[test]
fn test_rooted_data_survives_collection() {
    let src = r#"
        (define keep (list 1 2 3))
        (define v (vector 'a 'b))
        (garbage-collect)
        (list (car keep) (vector-ref v 0) (length keep))
    "#;
    assert_eq!(run(src), "(1 a 3)");
}

#[test]
fn test_closure_environment_survives_collection() {
    let src = r#"
        (define (make-adder n) (lambda (m) (+ n m)))
        (define add5 (make-adder 5))
        (garbage-collect)
        (add5 37)
    "#;
    assert_eq!(run(src), "42");
}

#[test]
fn test_unreachable_data_is_reclaimed() {
    sable_runtime::init();
    let env = interaction_environment();

    // Produce garbage whose results are dropped, then collect.
    eval_source("(begin (vector 1 2 3) (list 4 5 6) (string-append \"aa\" \"bb\") #t)", env)
        .unwrap();
    let before = gc_stats().objects_allocated;
    let freed = eval_source("(garbage-collect)", env).unwrap();
    let after = gc_stats().objects_allocated;

    assert!(after < before, "collection did not reduce live objects");
    assert!(freed.is_int() && freed.as_int() > 0 || freed.is_double());
}

#[test]
fn test_cyclic_structures_are_collected() {
    sable_runtime::init();
    let env = interaction_environment();

    // Build a cycle, then drop the only binding to it.
    eval_source(
        "(define knot (list 1 2)) (set-cdr! (cdr knot) knot)",
        env,
    )
    .unwrap();
    eval_source("(garbage-collect)", env).unwrap();
    let live_with_cycle = gc_stats().objects_allocated;

    eval_source("(set! knot #f)", env).unwrap();
    eval_source("(garbage-collect)", env).unwrap();
    let live_after = gc_stats().objects_allocated;

    assert!(
        live_after < live_with_cycle,
        "cycle survived unrooting: {live_with_cycle} -> {live_after}"
    );
}

#[test]
fn test_symbol_identity_survives_collection() {
    let src = r#"
        (define before 'marker)
        (garbage-collect)
        (eq? before 'marker)
    "#;
    assert_eq!(run(src), "#t");
}

#[test]
fn test_collection_mid_computation_keeps_arguments_alive() {
    // garbage-collect runs while the outer application's arguments sit
    // in the machine's argl register; they must survive.
    let src = "(list (vector 1) (begin (garbage-collect) 2) \"three\")";
    assert_eq!(run(src), "(#(1) 2 \"three\")");
}

#[test]
fn test_gc_stats_pair() {
    assert_eq!(run("(pair? (gc-stats))"), "#t");
}
