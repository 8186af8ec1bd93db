#[cfg(test)]
mod calculator;
#[cfg(test)]
mod direct_left_recursive;
#[cfg(test)]
mod indirect_left_recursive;
#[cfg(test)]
mod json;
#[cfg(test)]
mod repeat;
#[cfg(test)]
mod test1;
#[cfg(test)]
mod test2;

#[cfg(test)]
use simon::{parse, Error, Outcome, Parser, Value};

#[cfg(test)]
fn print(outcome: &Outcome, input: &str) -> String {
    outcome.value().unwrap().print_to_string(input)
}

#[cfg(test)]
fn expected(outcome: &Outcome) -> Vec<&str> {
    outcome
        .expected()
        .unwrap()
        .iter()
        .map(String::as_str)
        .collect()
}

#[test]
fn test1() {
    let g = test1::grammar();

    assert!(parse(&g, "foo", "barf").unwrap().is_success());
    assert!(!parse(&g, "foo", "berf").unwrap().is_success());
}

#[test]
fn test2() {
    let g = test2::grammar();

    let res = parse(&g, "foo", "barf darf").unwrap();

    assert_eq!(
        print(&res, "barf darf"),
        "(foo, \"barf darf\", \"barf\", \" \", \"darf\")"
    );

    assert!(!parse(&g, "foo", "berf").unwrap().is_success());

    // test dot. Also make sure that dot steps over non-ascii
    let res = parse(&g, "foo", "carf erf").unwrap();

    assert_eq!(
        print(&res, "carf erf"),
        "(foo, \"carf erf\", (carf, \"carf erf\", \"carf\", \" \", (erf, \"erf\", \"erf\")))"
    );

    assert!(parse(&g, "foo", "carfxerf").unwrap().is_success());
    assert!(!parse(&g, "foo", "carf").unwrap().is_success());
    assert!(!parse(&g, "foo", "carfµ").unwrap().is_success());
    assert!(parse(&g, "foo", "carfµerf").unwrap().is_success());
    assert!(!parse(&g, "foo", "carfx").unwrap().is_success());

    let res = parse(&g, "foo", "carfµerx").unwrap();

    assert_eq!(res.failure_position(), Some(8));
    assert_eq!(
        res.failure().unwrap().describe("carfµerx"),
        "expected \"erf\" at line 1, column 8"
    );
}

#[test]
fn repeat() {
    let g = repeat::grammar();

    let parse = |s: &str| -> String { print(&parse(&g, "foo", s).unwrap(), s) };

    assert_eq!(parse("abc"), "(foo, \"abc\", \"a\", \"b\", \"c\")");
    assert_eq!(parse("ac"), "(foo, \"ac\", \"a\", None, \"c\")");
    assert_eq!(
        parse("xyyyyz"),
        "(foo, \"xyyyyz\", \"x\", [\"y\", \"y\", \"y\", \"y\"], \"z\")"
    );
    assert_eq!(parse("xz"), "(foo, \"xz\", \"x\", [], \"z\")");
    assert_eq!(parse("def"), "(foo, \"def\", \"d\", [\"e\"], \"f\")");
    assert_eq!(
        parse("deeeef"),
        "(foo, \"deeeef\", \"d\", [\"e\", \"e\", \"e\", \"e\"], \"f\")"
    );
    assert_eq!(parse("kx"), "(foo, \"kx\", \"k\", None, \"x\")");
    assert_eq!(parse("qr"), "(foo, \"qr\", \"q\", None, \"r\")");

    let fail = |s: &str| simon::parse(&g, "foo", s).unwrap();

    let res = fail("qs");
    assert_eq!(res.failure_position(), Some(1));
    assert_eq!(expected(&res), ["not \"s\""]);

    let res = fail("kl");
    assert_eq!(res.failure_position(), Some(1));
    assert_eq!(expected(&res), ["\"x\""]);

    let res = fail("df");
    assert_eq!(res.failure_position(), Some(1));
    assert_eq!(expected(&res), ["\"e\""]);

    let res = fail("ad");
    assert_eq!(res.failure_position(), Some(1));
    assert_eq!(expected(&res), ["\"b\"", "\"c\""]);

    let res = fail("m");
    assert_eq!(res.failure_position(), Some(0));
    assert_eq!(
        expected(&res),
        ["\"a\"", "\"d\"", "\"k\"", "\"q\"", "\"x\""]
    );
}

#[test]
fn direct_left_recursive() {
    let g = direct_left_recursive::grammar();

    assert!(matches!(
        parse(&g, "expr", "1+1"),
        Err(Error::LeftRecursion { rule, position: 0 }) if rule == "expr"
    ));

    let g = direct_left_recursive::rewritten();
    let mut p = Parser::new(&g).require_end_of_input(true);

    assert!(p.parse("expr", "1").unwrap().is_success());
    assert!(!p.parse("expr", "0").unwrap().is_success());
    assert!(p.parse("expr", "1+1").unwrap().is_success());
    assert!(p.parse("expr", "1+1+1").unwrap().is_success());
    assert_eq!(
        p.parse("expr", "1+1+").unwrap().failure_position(),
        Some(4)
    );
}

#[test]
fn indirect_left_recursive() {
    let g = indirect_left_recursive::grammar();

    let err = parse(&g, "expr", "1-1").unwrap_err();

    assert!(matches!(err, Error::LeftRecursion { position: 0, .. }));
    assert!(err.to_string().contains("left recursive at offset 0"));
}

#[test]
fn calculator() {
    let g = calculator::grammar();

    let eval = |s: &str| -> Option<i64> {
        parse(&g, "calculator", s)
            .unwrap()
            .value()
            .and_then(Value::as_integer)
    };

    assert_eq!(eval("1"), Some(1));
    assert_eq!(eval("1+1"), Some(2));
    assert_eq!(eval("1*100"), Some(100));
    assert_eq!(eval("2+3*4"), Some(14));
    assert_eq!(eval("(2+3)*4"), Some(20));
    assert_eq!(eval(" 10 - 4 - 3 "), Some(3));
    assert_eq!(eval("17 % 5 / 2"), Some(1));
    assert_eq!(eval("((7))"), Some(7));
    assert_eq!(eval("1/0"), None);
    assert_eq!(eval("1*(1+1"), None);
}

#[test]
fn calculator_errors() {
    let g = calculator::grammar();

    let input = "1 +\n  (2 * )";
    let res = parse(&g, "calculator", input).unwrap();

    assert_eq!(res.failure_position(), Some(11));
    assert_eq!(
        res.failure().unwrap().describe(input),
        "expected \"(\", digit or whitespace at line 2, column 8"
    );

    let res = parse(&g, "calculator", "(1").unwrap();

    assert_eq!(res.failure_position(), Some(2));
    assert_eq!(expected(&res), ["\")\"", "[*/%]", "[+-]", "digit", "whitespace"]);
}

#[test]
fn json() {
    let g = json::grammar();

    let input = "[1, \"x\", true, null]";
    let res = parse(&g, "json", input).unwrap();

    assert_eq!(
        print(&res, input),
        "(array, \"[1, \\\"x\\\", true, null]\", 1, \"x\", \"true\", None)"
    );

    let input = " {\"a\": [1, 2.5, {}], \"b\": -0.5 } ";
    let res = parse(&g, "json", input).unwrap();

    let object = res.value().unwrap().as_node().unwrap();

    assert_eq!(object.tag, "object");
    assert_eq!(object.children.len(), 2);

    let first = object.children[0].as_node().unwrap();

    assert_eq!(first.tag, "member");
    assert_eq!(first.children[0], Value::from("a"));
    assert_eq!(
        first.children[1].as_node().unwrap().as_str(input),
        "[1, 2.5, {}]"
    );

    let second = object.children[1].as_node().unwrap();

    assert_eq!(second.children[1], Value::Float(-0.5));

    let res = parse(&g, "json", "[1, 2,]").unwrap();

    assert_eq!(res.failure_position(), Some(6));
    assert!(expected(&res).contains(&"\"[\""));

    let res = parse(&g, "json", "{\"a\" 1}").unwrap();

    assert_eq!(res.failure_position(), Some(5));
    assert!(expected(&res).contains(&"\":\""));
}

#[test]
fn memoization_keeps_backtracking_linear() {
    let g = json::grammar();

    let input = format!("{}1{}", "[".repeat(20), "]".repeat(20));

    let mut p = Parser::new(&g);
    let res = p.parse("json", &input).unwrap();

    assert!(res.is_success());

    // every rule runs at most once per position
    assert!(p.stats().rule_evaluations <= g.len() * (input.len() + 1));
}
