use super::*;
use crate::foundation::error::ReelError;

#[test]
fn evaluates_arithmetic_with_precedence() {
    let env = ExprEnv::new();
    assert_eq!(evaluate("1+2*3", &env).unwrap(), 7.0);
    assert_eq!(evaluate("(1+2)*3", &env).unwrap(), 9.0);
    assert_eq!(evaluate("8/4/2", &env).unwrap(), 1.0);
    assert_eq!(evaluate("-2*-3", &env).unwrap(), 6.0);
    assert_eq!(evaluate(" = 1.5e1 - .5 ", &env).unwrap(), 14.5);
}

#[test]
fn looks_up_plain_and_dotted_variables() {
    let env = ExprEnv::new()
        .with("step", 10.0)
        .with("totalSteps", 40.0)
        .with("bounds.width", 200.0);
    assert_eq!(evaluate("step/totalSteps", &env).unwrap(), 0.25);
    assert_eq!(evaluate("1000 / bounds.width", &env).unwrap(), 5.0);
}

#[test]
fn prev_before_first_frame_is_an_error_not_zero() {
    let env = ExprEnv::new().with("step", 1.0);
    let err = evaluate("prev.scaling * 1.1", &env).unwrap_err();
    assert!(matches!(err, ReelError::Evaluation(_)), "{err}");
    assert!(err.to_string().contains("prev.scaling"));
}

#[test]
fn division_by_zero_and_overflow_fail() {
    let env = ExprEnv::new().with("z", 0.0);
    assert!(matches!(
        evaluate("1/z", &env).unwrap_err(),
        ReelError::Evaluation(_)
    ));
    assert!(matches!(
        evaluate("1e308*10", &env).unwrap_err(),
        ReelError::Evaluation(_)
    ));
}

#[test]
fn syntax_errors_are_evaluation_errors_with_offset() {
    let err = Expression::parse("1 + * 2").unwrap_err();
    assert!(matches!(err, ReelError::Evaluation(_)));
    assert!(err.to_string().contains("byte 4"), "{err}");
}

#[test]
fn reports_referenced_variables_once() {
    let e = Expression::parse("nodeX + nodeX * bounds.xMin - prev.translateX").unwrap();
    let vars: Vec<_> = e.variables().into_iter().collect();
    assert_eq!(vars, vec!["bounds.xMin", "nodeX", "prev.translateX"]);
    assert_eq!(e.source(), "nodeX + nodeX * bounds.xMin - prev.translateX");
}

#[test]
fn deeply_nested_expression_is_an_evaluation_error() {
    let src = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
    let err = evaluate(&src, &ExprEnv::new()).unwrap_err();
    assert!(matches!(err, ReelError::Evaluation(_)), "{err}");
}
