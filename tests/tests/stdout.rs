// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tests::run_and_return_output;

#[rstest]
#[case(
    r#"
        display("Hello!");
    "#,
    &[
        "Hello!",
    ],
)]
#[case(
    r#"
        string s = "hi";
        display(s);
    "#,
    &[
        "hi",
    ],
)]
#[case(
    r#"
        int a = 5;
        display("a is {a}");
        display(f"twice: {a}", " and more");
    "#,
    &[
        "a is 5",
        "twice: 5 and more",
    ],
)]
#[case(
    r#"
        int i = 0;
        while (i < 3) {
            display(i);
            i += 1;
        }
    "#,
    &[
        "0",
        "1",
        "2",
    ],
)]
#[case(
    r#"
        for (int i = 1; i <= 4; i++) {
            if (i % 2 == 0) {
                display(i, " is even");
            } else {
                display(i, " is odd");
            }
        }
    "#,
    &[
        "1 is odd",
        "2 is even",
        "3 is odd",
        "4 is even",
    ],
)]
#[case(
    r#"
        int n = 3;
        do {
            display(n);
            n--;
        } while (n > 0);
    "#,
    &[
        "3",
        "2",
        "1",
    ],
)]
#[case(
    r#"
        float half = 7 / 2;
        float whole = 8 / 2;
        display(half, " ", whole, " ", -0);
    "#,
    &[
        "3.5 4 0",
    ],
)]
#[case(
    r#"
        int scores[3] = [90, 75, 60];
        scores[1] = 80;
        display(scores);
        display(scores[0] + scores[1]);
    "#,
    &[
        "[90, 80, 60]",
        "170",
    ],
)]
#[case(
    r#"
        string greeting = "Hi, " + "Ada";
        display(greeting + "!");
    "#,
    &[
        "Hi, Ada!",
    ],
)]
fn run_and_return_output_tests(#[case] input: &str, #[case] expected: &[&str]) {
    let expected: Vec<String> = expected.iter().map(|x| x.to_string()).collect();
    assert_eq!(run_and_return_output(input), expected);
}
