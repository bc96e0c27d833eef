// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Property tests for rendering invariants

use polysql_dialect::{GenericDialect, MsSqlDialect, Render, RenderError, builder};
use polysql_ir::{Condition, SortDirection, SqlEngine, SqlSelect, sql};
use proptest::prelude::*;

#[derive(Debug, PartialEq)]
enum PatternToken {
    Literal(char),
    AnyRun,
    AnyOne,
}

/// Reads a rendered `LIKE '...' ESCAPE '|'` pattern back into tokens
fn decode_pattern(rendered: &str) -> Vec<PatternToken> {
    let start = rendered.find(" LIKE '").expect("LIKE keyword") + " LIKE '".len();
    let end = rendered.rfind("' ESCAPE '|'").expect("ESCAPE clause");

    let mut tokens = Vec::new();
    let mut chars = rendered[start..end].chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '|' => PatternToken::Literal(chars.next().expect("escaped character")),
            '%' => PatternToken::AnyRun,
            '_' => PatternToken::AnyOne,
            other => PatternToken::Literal(other),
        });
    }
    tokens
}

fn literals(text: &str) -> Vec<PatternToken> {
    text.chars().map(PatternToken::Literal).collect()
}

/// Replaces the counter of every synthetic `uq_N` alias with `N`
fn normalize_aliases(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut rest = sql;
    while let Some(pos) = rest.find("uq_") {
        out.push_str(&rest[..pos + 3]);
        rest = rest[pos + 3..].trim_start_matches(|c: char| c.is_ascii_digit());
        out.push('N');
    }
    out.push_str(rest);
    out
}

fn arb_ident() -> BoxedStrategy<String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,7}")
        .expect("valid regex")
        .boxed()
}

fn arb_leaf() -> BoxedStrategy<Condition> {
    (arb_ident(), any::<i32>())
        .prop_map(|(field, value)| sql::equal("t", &field, value))
        .boxed()
}

fn arb_select() -> BoxedStrategy<SqlSelect> {
    (
        arb_ident(),
        proptest::collection::vec(arb_ident(), 0..4),
        proptest::option::of(arb_leaf()),
        proptest::option::of(arb_ident()),
        0u64..50,
        0u64..50,
    )
        .prop_map(|(table, fields, filter, order, limit, offset)| {
            let mut query = SqlSelect::new()
                .add_fields("t", fields)
                .add_from_as(table, "t")
                .set_where(filter)
                .set_limit(limit)
                .set_offset(offset);
            if let Some(order) = order {
                query = query.add_order_name(&order, SortDirection::Asc);
            }
            query
        })
        .boxed()
}

proptest! {
    #[test]
    fn test_pattern_operators_escape_metacharacters(text in "[a-zA-Z0-9%_|]{0,12}") {
        let field = || sql::name("code");

        let starts = decode_pattern(&sql::starts_with(field(), &text).render(&GenericDialect).unwrap());
        let mut expected = literals(&text);
        expected.push(PatternToken::AnyRun);
        prop_assert_eq!(starts, expected);

        let ends = decode_pattern(&sql::ends_with(field(), &text).render(&GenericDialect).unwrap());
        let mut expected = vec![PatternToken::AnyRun];
        expected.extend(literals(&text));
        prop_assert_eq!(ends, expected);

        let contains = decode_pattern(&sql::contains(field(), &text).render(&GenericDialect).unwrap());
        let mut expected = vec![PatternToken::AnyRun];
        expected.extend(literals(&text));
        expected.push(PatternToken::AnyRun);
        prop_assert_eq!(contains, expected);
    }

    #[test]
    fn test_matches_translates_only_wildcards(text in "[a-z*?%_]{0,12}") {
        let rendered = sql::matches(sql::name("code"), &text).render(&GenericDialect).unwrap();
        let expected: Vec<PatternToken> = text
            .chars()
            .map(|c| match c {
                '*' => PatternToken::AnyRun,
                '?' => PatternToken::AnyOne,
                other => PatternToken::Literal(other),
            })
            .collect();
        prop_assert_eq!(decode_pattern(&rendered), expected);
    }

    #[test]
    fn test_junctions_absorb_and_unwrap(leaves in proptest::collection::vec(arb_leaf(), 0..5)) {
        let rendered: Vec<String> = leaves
            .iter()
            .map(|leaf| leaf.render(&GenericDialect).unwrap())
            .collect();

        let and = sql::and(leaves.clone()).render(&GenericDialect).unwrap();
        let or = sql::or(leaves.clone()).render(&GenericDialect).unwrap();

        match rendered.len() {
            0 => {
                prop_assert_eq!(and, "");
                prop_assert_eq!(or, "");
            }
            1 => {
                prop_assert_eq!(&and, &rendered[0]);
                prop_assert_eq!(&or, &rendered[0]);
            }
            _ => {
                prop_assert_eq!(and, rendered.join(" AND "));
                prop_assert_eq!(or, rendered.join(" OR "));
            }
        }
    }

    #[test]
    fn test_rendering_is_deterministic(query in arb_select()) {
        for engine in SqlEngine::ALL {
            let b = builder(engine);
            let first = query.render(b).unwrap();
            let second = query.render(b).unwrap();
            prop_assert_eq!(normalize_aliases(&first), normalize_aliases(&second));
            if engine != SqlEngine::MsSql {
                prop_assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_mssql_paging_has_one_window(query in arb_select(), limit in 1u64.., offset in 1u64..) {
        let query = query.set_limit(limit).set_offset(offset);
        let result = query.render(&MsSqlDialect);

        match limit.checked_add(offset) {
            Some(top) => {
                let sql = result.unwrap();
                prop_assert_eq!(sql.matches("ROW_NUMBER()").count(), 1);
                prop_assert!(sql.contains(&format!("TOP {top} ")), "{}", sql);
                prop_assert!(sql.ends_with(&format!(" > {offset}")), "{}", sql);
            }
            None => prop_assert!(
                matches!(result, Err(RenderError::InvalidStatement { .. })),
                "{:?}",
                result
            ),
        }
    }
}
