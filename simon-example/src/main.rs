mod calculator;

use simon::{Node, Outcome, Value};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage {} EXPRESSION", &args[0]);
        std::process::exit(2);
    }

    let input = &args[1];

    println!("parsing: {}", input);

    let outcome = calculator::grammar().and_then(|g| simon::parse(&g, "calculator", input));

    match outcome {
        Ok(Outcome::Success { value, .. }) => {
            fn walk(value: &Value, input: &str) -> Option<i64> {
                let node: &Node = value.as_node()?;

                match node.tag.as_str() {
                    "num" => node.as_str(input).parse().ok(),
                    "paren" => walk(node.children.get(1)?, input),
                    "expr" | "term" => {
                        let mut acc = walk(node.children.first()?, input)?;

                        for pair in node.children.get(1)?.as_list()? {
                            let pair = pair.as_list()?;
                            let right = walk(pair.get(1)?, input)?;

                            acc = match pair.first()?.as_str()? {
                                "+" => acc.checked_add(right)?,
                                "-" => acc.checked_sub(right)?,
                                "*" => acc.checked_mul(right)?,
                                "/" => acc.checked_div(right)?,
                                "%" => acc.checked_rem(right)?,
                                _ => return None,
                            };
                        }

                        Some(acc)
                    }
                    _ => None,
                }
            }

            match walk(&value, input) {
                Some(result) => println!("result: {}", result),
                None => eprintln!("overflow or division by zero"),
            }
        }
        Ok(Outcome::Failure(failure)) => {
            eprintln!("parser error: {}", failure.describe(input));
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("grammar error: {}", err);
            std::process::exit(1);
        }
    }
}
