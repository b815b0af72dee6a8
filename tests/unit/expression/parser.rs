use super::*;

#[test]
fn parses_arithmetic_precedence() {
    let e = parse_expr("=1+2*3").unwrap();
    match e {
        Expr::Binary {
            op: BinaryOp::Add,
            left,
            right,
        } => {
            assert_eq!(*left, Expr::Num(1.0));
            assert!(matches!(
                *right,
                Expr::Binary {
                    op: BinaryOp::Mul,
                    ..
                }
            ));
        }
        other => panic!("unexpected ast: {other:?}"),
    }
}

#[test]
fn subtraction_is_left_associative() {
    let e = parse_expr("8 - 4 - 2").unwrap();
    let Expr::Binary {
        op: BinaryOp::Sub,
        left,
        right,
    } = e
    else {
        panic!("expected subtraction");
    };
    assert_eq!(*right, Expr::Num(2.0));
    assert!(matches!(
        *left,
        Expr::Binary {
            op: BinaryOp::Sub,
            ..
        }
    ));
}

#[test]
fn parses_dotted_variables() {
    let e = parse_expr("bounds.xMin").unwrap();
    assert_eq!(
        e,
        Expr::Var {
            name: "bounds.xMin".to_owned(),
            offset: 0
        }
    );
}

#[test]
fn parses_unary_and_parentheses() {
    let e = parse_expr("-(nodeX + 1)").unwrap();
    assert!(matches!(e, Expr::Neg(_)));
    let mut names = Vec::new();
    e.for_each_var(&mut |n, off| names.push((n.to_owned(), off)));
    assert_eq!(names, vec![("nodeX".to_owned(), 2)]);
}

#[test]
fn rejects_malformed_input() {
    for src in ["", "   ", "=", "1 +", "(1", "1 2", "prev.", "prev.1", "*3", "a..b", ")"] {
        assert!(parse_expr(src).is_err(), "{src:?} should not parse");
    }
}

#[test]
fn moderate_nesting_is_accepted() {
    let src = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(parse_expr(&src).unwrap(), Expr::Num(1.0));
}

#[test]
fn deep_parentheses_are_rejected() {
    let src = format!("{}1{}", "(".repeat(300), ")".repeat(300));
    let err = parse_expr(&src).unwrap_err();
    assert!(err.message.contains("nested too deeply"), "{err}");
}

#[test]
fn long_unary_runs_are_rejected() {
    let src = format!("{}1", "-".repeat(400));
    let err = parse_expr(&src).unwrap_err();
    assert!(err.message.contains("nested too deeply"), "{err}");
}

#[test]
fn huge_inputs_fail_without_overflowing() {
    let parens = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
    assert!(parse_expr(&parens).is_err());

    let chain = format!("1{}", "+1".repeat(100_000));
    let err = parse_expr(&chain).unwrap_err();
    assert!(err.message.contains("tokens"), "{err}");
}
