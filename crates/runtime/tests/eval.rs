//! End-to-end evaluator tests: source text in, printed result out.

use sable_runtime::{ErrorKind, eval_source, interaction_environment, printable};

fn run(src: &str) -> String {
    sable_runtime::init();
    match eval_source(src, interaction_environment()) {
        Ok(v) => printable(v),
        Err(e) => panic!("evaluation failed for {src:?}: {e}"),
    }
}

fn run_err(src: &str) -> ErrorKind {
    sable_runtime::init();
    eval_source(src, interaction_environment())
        .expect_err(&format!("expected failure for {src:?}"))
        .kind()
}

#[test]
fn test_self_evaluating_forms() {
    assert_eq!(run("5"), "5");
    assert_eq!(run("2.5"), "2.5");
    assert_eq!(run("#t"), "#t");
    assert_eq!(run("\"hi\""), "\"hi\"");
    assert_eq!(run("#\\a"), "#\\a");
    assert_eq!(run("#(1 2)"), "#(1 2)");
}

#[test]
fn test_arithmetic() {
    assert_eq!(run("(+ 1 2 3)"), "6");
    assert_eq!(run("(- 10 3 2)"), "5");
    assert_eq!(run("(- 5)"), "-5");
    assert_eq!(run("(* 2 3 4)"), "24");
    assert_eq!(run("(/ 6 3)"), "2");
    assert_eq!(run("(/ 1 2)"), "0.5");
    assert_eq!(run("(+ 1 0.5)"), "1.5");
    assert_eq!(run("(max 3 1 4 1 5)"), "5");
    assert_eq!(run("(min 3 1 4)"), "1");
    assert_eq!(run("(abs -7)"), "7");
    assert_eq!(run("(quotient 7 2)"), "3");
    assert_eq!(run("(remainder 7 2)"), "1");
    assert_eq!(run("(modulo -7 2)"), "1");
}

#[test]
fn test_comparison_chains() {
    assert_eq!(run("(= 2 2 2)"), "#t");
    assert_eq!(run("(= 2 2 3)"), "#f");
    assert_eq!(run("(< 1 2 3)"), "#t");
    assert_eq!(run("(< 1 3 2)"), "#f");
    assert_eq!(run("(>= 3 3 2)"), "#t");
    assert_eq!(run("(= 2 2.0)"), "#t");
}

#[test]
fn test_lambda_application() {
    assert_eq!(run("((lambda (x y) (+ x y)) 10 20)"), "30");
    assert_eq!(run("((lambda () 9))"), "9");
    assert_eq!(run("((lambda args args) 1 2 3)"), "(1 2 3)");
    assert_eq!(run("((lambda (a . rest) (cons a rest)) 1 2 3)"), "(1 2 3)");
}

#[test]
fn test_argument_evaluation_order_is_left_to_right() {
    let src = r#"
        (define order (list))
        (define (note x) (set! order (cons x order)) x)
        ((lambda (a b c) 0) (note 1) (note 2) (note 3))
        (reverse order)
    "#;
    assert_eq!(run(src), "(1 2 3)");
}

#[test]
fn test_define_and_set() {
    assert_eq!(run("(define x 1) x"), "1");
    assert_eq!(run("(define x 1) (set! x 2) x"), "2");
    assert_eq!(run("(define (add1 n) (+ n 1)) (add1 41)"), "42");
    assert_eq!(run("(define (f a . rest) rest) (f 1 2 3)"), "(2 3)");
}

#[test]
fn test_closures_capture_bindings_not_values() {
    let src = "(define x 1) (define (g) x) (set! x 42) (g)";
    assert_eq!(run(src), "42");
}

#[test]
fn test_counter_closure_keeps_private_state() {
    let src = r#"
        (define (make-counter)
          ((lambda (n)
             (lambda () (set! n (+ n 1)) n))
           0))
        (define c (make-counter))
        (c) (c) (c)
    "#;
    assert_eq!(run(src), "3");
}

#[test]
fn test_if_and_truthiness() {
    assert_eq!(run("(if #t 1 2)"), "1");
    assert_eq!(run("(if #f 1 2)"), "2");
    // Everything but #f is true.
    assert_eq!(run("(if 0 'yes 'no)"), "yes");
    assert_eq!(run("(if '() 'yes 'no)"), "yes");
    // Missing alternative defaults to #f.
    assert_eq!(run("(if #f 1)"), "#f");
}

#[test]
fn test_begin_sequences_in_order() {
    assert_eq!(run("(begin 1 2 3)"), "3");
    assert_eq!(run("(define x 0) (begin (set! x 5) (+ x 1))"), "6");
}

#[test]
fn test_cond_desugars() {
    assert_eq!(run("(cond (#t 1) (else 2))"), "1");
    assert_eq!(run("(cond (#f 1) (else 2))"), "2");
    assert_eq!(run("(cond (#f 1) ((= 1 1) 2) (else 3))"), "2");
    // Multiple actions run as a sequence.
    assert_eq!(run("(define x 0) (cond (#t (set! x 9) x))"), "9");
    // No matching clause yields #f.
    assert_eq!(run("(cond (#f 1))"), "#f");
}

#[test]
fn test_quote_and_quasiquote() {
    assert_eq!(run("'x"), "x");
    assert_eq!(run("'(1 2 3)"), "(1 2 3)");
    assert_eq!(run("`(1 ,(+ 1 1) ,@(list 3 4) 5)"), "(1 2 3 4 5)");
    // Without unquote, quasiquote behaves as quote.
    assert_eq!(run("`(1 2 3)"), "(1 2 3)");
    assert_eq!(run("`x"), "x");
    assert_eq!(run("(equal? `(1 2) '(1 2))"), "#t");
}

#[test]
fn test_tail_recursion_runs_deep() {
    let src = "(define (f n acc) (if (= n 0) acc (f (- n 1) (+ acc n)))) (f 100000 0)";
    assert_eq!(run(src), "5000050000");
}

#[test]
fn test_mutual_tail_recursion_runs_deep() {
    let src = r#"
        (define (ev? n) (if (= n 0) #t (od? (- n 1))))
        (define (od? n) (if (= n 0) #f (ev? (- n 1))))
        (ev? 100001)
    "#;
    assert_eq!(run(src), "#f");
}

#[test]
fn test_named_let_loops() {
    let src = "(let loop ((xs '(1 2 3)) (acc '()))
                 (if (null? xs) acc (loop (cdr xs) (cons (car xs) acc))))";
    assert_eq!(run(src), "(3 2 1)");
}

#[test]
fn test_plain_let_binds_in_parallel() {
    assert_eq!(run("(let ((x 2) (y 3)) (* x y))"), "6");
    assert_eq!(run("(define x 10) (let ((x 1) (y x)) y)"), "10");
}

#[test]
fn test_list_primitives() {
    assert_eq!(run("(cons 1 2)"), "(1 . 2)");
    assert_eq!(run("(car '(1 2))"), "1");
    assert_eq!(run("(cdr '(1 2))"), "(2)");
    assert_eq!(run("(cadr '(1 2 3))"), "2");
    assert_eq!(run("(cadddr '(1 2 3 4))"), "4");
    assert_eq!(run("(length '(a b c))"), "3");
    assert_eq!(run("(append '(1 2) '(3) '(4 5))"), "(1 2 3 4 5)");
    assert_eq!(run("(reverse '(1 2 3))"), "(3 2 1)");
    assert_eq!(run("(list-tail '(1 2 3 4) 2)"), "(3 4)");
    assert_eq!(run("(assq 'b '((a 1) (b 2)))"), "(b 2)");
    assert_eq!(run("(define p '(1 2)) (set-car! p 9) p"), "(9 2)");
    assert_eq!(run("(list? '(1 2))"), "#t");
    assert_eq!(run("(list? '(1 . 2))"), "#f");
}

#[test]
fn test_equivalence_predicates() {
    assert_eq!(run("(eq? 'x 'x)"), "#t");
    assert_eq!(run("(eq? '(1) '(1))"), "#f");
    assert_eq!(run("(eqv? #\\a #\\a)"), "#t");
    assert_eq!(run("(equal? '(1 (2 3)) '(1 (2 3)))"), "#t");
    assert_eq!(run("(equal? \"ab\" \"ab\")"), "#t");
    assert_eq!(run("(not #f)"), "#t");
    assert_eq!(run("(not 3)"), "#f");
}

#[test]
fn test_string_and_char_primitives() {
    assert_eq!(run("(string-length \"hello\")"), "5");
    assert_eq!(run("(string-append \"foo\" \"bar\")"), "\"foobar\"");
    assert_eq!(run("(substring \"hello\" 1 3)"), "\"el\"");
    assert_eq!(run("(string=? \"a\" \"a\")"), "#t");
    assert_eq!(run("(symbol->string 'abc)"), "\"abc\"");
    assert_eq!(run("(string->symbol \"abc\")"), "abc");
    assert_eq!(run("(char->integer #\\A)"), "65");
    assert_eq!(run("(integer->char 97)"), "#\\a");
    assert_eq!(run("(string->list \"ab\")"), "(#\\a #\\b)");
    assert_eq!(run("(list->string '(#\\a #\\b))"), "\"ab\"");
}

#[test]
fn test_vector_primitives() {
    assert_eq!(run("(vector 1 2 3)"), "#(1 2 3)");
    assert_eq!(run("(vector-length #(1 2))"), "2");
    assert_eq!(run("(vector-ref #(1 2) 1)"), "2");
    assert_eq!(run("(define v (make-vector 2 'x)) v"), "#(x x)");
    assert_eq!(run("(define v #(1 2)) (vector-set! v 0 9) v"), "#(9 2)");
    assert_eq!(run("(vector->list #(1 2))"), "(1 2)");
    assert_eq!(run("(list->vector '(1 2))"), "#(1 2)");
}

#[test]
fn test_apply_and_eval() {
    assert_eq!(run("(apply + '(1 2 3))"), "6");
    assert_eq!(run("(apply + 1 2 '(3 4))"), "10");
    assert_eq!(run("(apply (lambda (a b) (- a b)) '(10 4))"), "6");
    assert_eq!(run("(eval '(+ 1 2))"), "3");
    assert_eq!(run("(eval '(+ 1 2) (interaction-environment))"), "3");
}

#[test]
fn test_string_ports_through_primitives() {
    let src = r#"
        (define p (open-output-string))
        (display "hi " p)
        (display 42 p)
        (get-output-string p)
    "#;
    assert_eq!(run(src), "\"hi 42\"");

    let src = r#"
        (define p (open-input-string "(+ 1 2) done"))
        (define first (read p))
        (define second (read p))
        (list (eval first) second (eof-object? (read p)))
    "#;
    assert_eq!(run(src), "(3 done #t)");
}

#[test]
fn test_environment_reification() {
    assert_eq!(run("(environment? (interaction-environment))"), "#t");
    let src = r#"
        (define e (environment))
        (eval '(define hidden 5) e)
        (eval 'hidden e)
    "#;
    assert_eq!(run(src), "5");
}

#[test]
fn test_procedure_predicates() {
    assert_eq!(run("(procedure? car)"), "#t");
    assert_eq!(run("(primitive-procedure? car)"), "#t");
    assert_eq!(run("(compound-procedure? car)"), "#f");
    assert_eq!(run("(compound-procedure? (lambda (x) x))"), "#t");
}

#[test]
fn test_error_kinds() {
    assert_eq!(run_err("nope"), ErrorKind::Variable);
    assert_eq!(run_err("(set! undefined-var 1)"), ErrorKind::Variable);
    assert_eq!(run_err("(car 5)"), ErrorKind::Type);
    assert_eq!(run_err("((lambda (x) x) 1 2)"), ErrorKind::Call);
    assert_eq!(run_err("((lambda (x y) x) 1)"), ErrorKind::Call);
    assert_eq!(run_err("(1 2)"), ErrorKind::Call);
    assert_eq!(run_err("(+ 1 'a)"), ErrorKind::Type);
    assert_eq!(run_err("(open-input-file \"/no/such/file\")"), ErrorKind::File);
    assert_eq!(run_err("(}"), ErrorKind::Parse);
}

#[test]
fn test_assignment_and_definition_return_ok() {
    assert_eq!(run("(define x 1)"), "ok");
    assert_eq!(run("(define x 1) (set! x 2)"), "ok");
}

#[test]
fn test_shadowing_scopes() {
    let src = r#"
        (define x 'outer)
        (define (probe) x)
        (define (shadow) (define x 'inner) (probe))
        (shadow)
    "#;
    // probe closes over the global frame, not its caller's.
    assert_eq!(run(src), "outer");
}
