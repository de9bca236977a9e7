//! Whole grammars assembled from the public construction API.

use strand::build::*;
use strand::pattern::CharTest;
use strand::{Pattern, PatternRef, Record, find_iter, keyed, match_prefix, match_whole};

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// `group := '(' (letter | group)* ')'`
fn nested_groups() -> PatternRef<char> {
    let inner = placeholder::<char>();
    let group = concat([
        one('('),
        kleene(choice([
            keyed("letter", range('a', 'z')),
            keyed("group", inner.handle()),
        ])),
        one(')'),
    ]);
    inner.bind(&group).unwrap();
    group
}

/// `'(' body ')'` where `body := ('(' body ')' | non-paren)*`.
///
/// Only the placeholder holds `body`; the returned root does not.
fn parenthesized() -> PatternRef<char> {
    let body = placeholder::<char>();
    let rule = kleene(choice([
        keyed("group", concat([one('('), body.handle(), one(')')])),
        keyed("text", signed([CharTest::Set(vec!['(', ')'])], true)),
    ]));
    body.bind(&rule).unwrap();
    concat([one('('), body.handle(), one(')')])
}

fn depth(record: &Record) -> usize {
    let mut deepest = 0;
    record.walk(&mut |key, _, d| {
        if key.is_some_and(|k| &**k == "group") {
            deepest = deepest.max(d);
        }
    });
    deepest
}

// --- Recursion ---

#[test]
fn recursive_groups_match() {
    let group = nested_groups();
    let input = chars("(ab(c)d)");
    let result = match_whole(&*group, &input);
    assert!(result.success);
    assert!(depth(&result.record) > 0);
}

#[test]
fn recursive_groups_report_unbalanced_input() {
    let group = nested_groups();
    let input = chars("(ab(c)d");
    let result = match_whole(&*group, &input);
    assert!(!result.success);
    assert_eq!(result.record.direct_end, 7);
    assert_eq!(result.record.greedy_end, 7);
}

#[test]
fn forward_rule_round_trip() {
    let root = parenthesized();
    let input = chars("(ab(c)d)");
    let result = match_whole(&*root, &input);
    assert!(result.success);
    assert_eq!(result.record.direct_end, 8);

    let input = chars("(a(b)");
    let result = match_whole(&*root, &input);
    assert!(!result.success);
    assert_eq!(result.record.greedy_end, 5);
}

#[test]
fn recursion_survives_many_levels() {
    let group = nested_groups();
    let text = format!("{}{}", "(".repeat(50), ")".repeat(50));
    let input = chars(&text);
    assert!(match_whole(&*group, &input).success);
}

// --- Combinator laws ---

#[test]
fn digits_then_letters() {
    let p = concat([
        keyed("digits", collapse(one_or_more(range('0', '9')))),
        keyed("rest", collapse(kleene(range('a', 'z')))),
    ]);
    let input = chars("2024abc");
    let result = match_whole(&*p, &input);
    assert!(result.success);
    let parts = result.record.as_all().unwrap();
    assert_eq!(parts.get("digits").unwrap().text(&input), "2024");
    assert_eq!(parts.get("rest").unwrap().text(&input), "abc");
}

#[test]
fn choice_prefers_earlier_alternative() {
    let short_first = choice([text("a"), text("ab")]);
    let long_first = choice([text("ab"), text("a")]);
    let input = chars("ab");
    assert_eq!(match_prefix(&*short_first, &input, 0).record.direct_end, 1);
    assert_eq!(match_prefix(&*long_first, &input, 0).record.direct_end, 2);
}

#[test]
fn concatenation_is_associative_in_span() {
    let (a, b, c) = (text("ab"), one_or_more(one('c')), optional(one('d')));
    let left = concat([concat([a.clone(), b.clone()]), c.clone()]);
    let right = concat([a, concat([b, c])]);
    for s in ["abccd", "abc", "ab", "abd", "xabc"] {
        let input = chars(s);
        let l = match_prefix(&*left, &input, 0);
        let r = match_prefix(&*right, &input, 0);
        assert_eq!(l.success, r.success, "{s:?}");
        assert_eq!(l.record.direct_end, r.record.direct_end, "{s:?}");
    }
}

#[test]
fn difference_removes_reserved_words() {
    let word = one_or_more(range('a', 'z'));
    let identifier = difference([word, choice([text("if"), text("else")])]);
    for (s, ok) in [("iff", true), ("if", false), ("else", false), ("x", true)] {
        let input = chars(s);
        assert_eq!(match_whole(&*identifier, &input).success, ok, "{s:?}");
    }
}

#[test]
fn difference_folds_later_items_with_alternating_sign() {
    // a word, minus words made of "a"s, except a lone "a" is let back in
    let word = one_or_more(range('a', 'z'));
    let p = difference([word, one_or_more(one('a')), one('a')]);
    for (s, ok) in [("b", true), ("aa", false), ("a", true)] {
        let input = chars(s);
        assert_eq!(match_whole(&*p, &input).success, ok, "{s:?}");
    }
}

#[test]
fn intersection_needs_every_reading() {
    let hex_word = intersection([
        one_or_more(range('a', 'z')),
        one_or_more(any([
            strand::pattern::CharTest::Range('a', 'f'),
            strand::pattern::CharTest::Range('0', '9'),
        ])),
    ]);
    assert!(match_whole(&*hex_word, &chars("cafe")).success);
    assert!(!match_whole(&*hex_word, &chars("cafes")).success);
}

#[test]
fn when_and_unless_check_the_same_span() {
    let word = one_or_more(range('a', 'z'));
    let x_word = concat([one('x'), kleene(range('a', 'z'))]);
    let starts_with_x = when(word.clone(), x_word.clone());
    let not_x = unless(word, x_word);
    let input = chars("xyz");
    assert!(match_whole(&*starts_with_x, &input).success);
    assert!(!match_whole(&*not_x, &input).success);

    let input = chars("yzx");
    assert!(!match_whole(&*starts_with_x, &input).success);
    assert!(match_whole(&*not_x, &input).success);
}

// --- Empty input ---

#[test]
fn empty_and_kleene_accept_empty_input() {
    let input = chars("");
    assert!(match_whole(&*empty::<char>(), &input).success);
    assert!(match_whole(&*kleene(one('a')), &input).success);
    assert!(!match_whole(&*one_or_more(one('a')), &input).success);
}

#[test]
fn find_iter_walks_whole_line() {
    let number = one_or_more(range('0', '9'));
    let input = chars("a1 22 b333");
    let spans: Vec<_> = find_iter(&*number, &input).map(|f| f.start..f.end()).collect();
    assert_eq!(spans, vec![1..2, 3..5, 7..10]);
}

#[test]
fn patterns_work_over_bytes() {
    let p: PatternRef<u8> = concat([one(b'G'), one(b'E'), one(b'T')]);
    let input: &[u8] = b"GET /";
    let result = p.match_at(&input, 0, input.len());
    assert!(result.success);
    assert_eq!(result.record.direct_end, 3);
}
