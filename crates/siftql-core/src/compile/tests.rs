use super::*;
use crate::{
    error::ErrorDetails,
    model::{AttributePath, Choice, ChoiceKind, ChoiceTable, FilterModel, FilterOperator as Op},
    predicate::{CompareOp, Pattern},
    types::{Date, DateTime},
    value::Value,
};

fn catalog() -> FilterCatalog {
    FilterCatalog::builder()
        .filters([
            FilterModel::integer("id"),
            FilterModel::integer("d_id").sources(["id", "author.id"]),
            FilterModel::float("amazon_rating").operators([Op::Ge, Op::Lt]),
            FilterModel::boolean("author.is_male").nullable(),
            FilterModel::date("written").nullable(),
            FilterModel::datetime("published.at").source("published_at"),
            FilterModel::string("title").searchable().nullable(),
            FilterModel::string("url").source("publishing_url"),
            FilterModel::string("isbn")
                .operators([Op::Lt, Op::Le, Op::Gt, Op::Ge])
                .nullable(),
            FilterModel::choice(
                "status",
                ChoiceTable::new(
                    ChoiceKind::Text,
                    [
                        Choice::text("planning").with_repr("Planning"),
                        Choice::text("writing").with_repr("Writing"),
                    ],
                ),
            ),
            FilterModel::choice(
                "github_stars",
                ChoiceTable::new(
                    ChoiceKind::Int,
                    [Choice::int(1).with_repr("one"), Choice::int(100)],
                ),
            ),
        ])
        .build()
        .unwrap()
}

fn compiler() -> FilterCompiler {
    FilterCompiler::new(catalog())
}

fn path(raw: &str) -> AttributePath {
    AttributePath::parse(raw).unwrap()
}

fn details(name: &str, op: Op, raw: &str) -> ErrorDetails {
    ErrorDetails::new(Some(name), op, raw)
}

#[test]
fn equality_and_negation() {
    let c = compiler();

    assert_eq!(
        c.compile("id", Op::Eq, "1").unwrap(),
        Predicate::eq(path("id"), Value::Int(1))
    );
    assert_eq!(
        c.compile("id", Op::Ne, "1").unwrap(),
        Predicate::ne(path("id"), Value::Int(1))
    );
}

#[test]
fn ordering_operators_map_to_comparisons() {
    let c = compiler();
    let cases = [
        (Op::Lt, CompareOp::Lt),
        (Op::Le, CompareOp::Lte),
        (Op::Gt, CompareOp::Gt),
        (Op::Ge, CompareOp::Gte),
    ];

    for (op, cmp) in cases {
        assert_eq!(
            c.compile("written", op, "2019-02-12").unwrap(),
            Predicate::compare(
                path("written"),
                cmp,
                Value::Date(Date::new_checked(2019, 2, 12).unwrap())
            ),
            "{op}"
        );
    }
}

#[test]
fn undeclared_ordering_echoes_the_operator() {
    let c = compiler();

    for op in [Op::Gt, Op::Le] {
        assert_eq!(
            c.compile("amazon_rating", op, "1.23"),
            Err(FilterError::Lookup(details("amazon_rating", op, "1.23")))
        );
    }
    assert!(c.compile("amazon_rating", Op::Ge, "1.23").is_ok());
    assert!(c.compile("amazon_rating", Op::Lt, "1.23").is_ok());
}

#[test]
fn search_is_rejected_where_not_declared() {
    let c = compiler();

    assert_eq!(
        c.compile("id", Op::Like, "1*"),
        Err(FilterError::Lookup(details("id", Op::Like, "1*")))
    );
    assert!(c.compile("url", Op::ILike, "*x*").is_err());
}

#[test]
fn value_errors_echo_raw_input() {
    let c = compiler();
    let cases = [
        ("id", "1.5"),
        ("id", "str"),
        ("amazon_rating", "2012-01-01"),
        ("author.is_male", "True"),
        ("written", "2019-02-12T10:02:00"),
        ("written", "2019-27-1"),
        ("published.at", "2019-02-12"),
        ("status", "unknown"),
        ("github_stars", "2"),
    ];

    for (name, raw) in cases {
        assert_eq!(
            c.compile(name, Op::Eq, raw),
            Err(FilterError::Value(details(name, Op::Eq, raw))),
            "{name} = {raw}"
        );
    }
}

#[test]
fn quoted_strings_equal_bare_strings() {
    let c = compiler();
    let bare = c.compile("title", Op::Eq, "abc").unwrap();

    assert_eq!(c.compile("title", Op::Eq, "'abc'").unwrap(), bare);
    assert_eq!(c.compile("title", Op::Eq, "\"abc\"").unwrap(), bare);
}

#[test]
fn wildcard_search_compiles_patterns() {
    let c = compiler();
    let cases = [
        ("value", Pattern::Exact("value".into())),
        ("*value", Pattern::Suffix("value".into())),
        ("value*", Pattern::Prefix("value".into())),
        ("'*value*'", Pattern::Contains("value".into())),
        ("val*ue", Pattern::Regex("^val(.*?)ue$".into())),
        ("*", Pattern::Regex(".*".into())),
    ];

    for (raw, pattern) in cases {
        assert_eq!(
            c.compile("title", Op::Like, raw).unwrap(),
            Predicate::matches(path("title"), pattern.clone(), TextMode::Cs),
            "{raw}"
        );
        assert_eq!(
            c.compile("title", Op::ILike, raw).unwrap(),
            Predicate::matches(path("title"), pattern, TextMode::Ci),
            "{raw}"
        );
    }
}

#[test]
fn adjacent_wildcards_are_value_errors() {
    let c = compiler();

    for raw in ["value**value", "**v"] {
        assert_eq!(
            c.compile("title", Op::Like, raw),
            Err(FilterError::Value(details("title", Op::Like, raw)))
        );
    }
}

#[test]
fn sentinels_compile_to_state_checks() {
    let c = compiler();

    assert_eq!(
        c.compile("written", Op::Eq, "null()").unwrap(),
        Predicate::IsNull {
            path: path("written")
        }
    );
    assert_eq!(
        c.compile("written", Op::Ne, "null()").unwrap(),
        Predicate::not(Predicate::IsNull {
            path: path("written")
        })
    );
    assert_eq!(
        c.compile("title", Op::Eq, "empty()").unwrap(),
        Predicate::IsEmpty {
            path: path("title")
        }
    );
    assert_eq!(
        c.compile("title", Op::Ne, "empty()").unwrap(),
        Predicate::not(Predicate::IsEmpty {
            path: path("title")
        })
    );
}

#[test]
fn quoted_sentinels_are_literals() {
    let c = compiler();

    assert_eq!(
        c.compile("title", Op::Eq, "'null()'").unwrap(),
        Predicate::eq(path("title"), Value::text("null()"))
    );
}

#[test]
fn misplaced_sentinels_are_lookup_errors() {
    let c = compiler();
    let cases = [
        ("written", Op::Gt, "null()"),
        ("title", Op::Like, "empty()"),
        ("id", Op::Eq, "null()"),
        ("written", Op::Eq, "empty()"),
        ("author.is_male", Op::Ne, "empty()"),
    ];

    for (name, op, raw) in cases {
        assert_eq!(
            c.compile(name, op, raw),
            Err(FilterError::Lookup(details(name, op, raw))),
            "{name} {op} {raw}"
        );
    }
}

#[test]
fn sentinels_never_order() {
    let c = compiler();

    assert!(c.compile("isbn", Op::Eq, "null()").is_ok());
    assert!(c.compile("isbn", Op::Eq, "empty()").is_ok());
    assert!(c.compile("isbn", Op::Lt, "978").is_ok());

    for op in [Op::Lt, Op::Le, Op::Gt, Op::Ge] {
        for raw in ["null()", "empty()"] {
            assert_eq!(
                c.compile("isbn", op, raw),
                Err(FilterError::Lookup(details("isbn", op, raw))),
                "isbn {op} {raw}"
            );
        }
    }
}

#[test]
fn choices_accept_value_or_representation() {
    let c = compiler();
    let planning = Predicate::eq(path("status"), Value::text("planning"));

    assert_eq!(c.compile("status", Op::Eq, "planning").unwrap(), planning);
    assert_eq!(c.compile("status", Op::Eq, "Planning").unwrap(), planning);
    assert_eq!(c.compile("status", Op::Eq, "'Planning'").unwrap(), planning);

    let one = Predicate::eq(path("github_stars"), Value::Int(1));
    assert_eq!(c.compile("github_stars", Op::Eq, "1").unwrap(), one);
    assert_eq!(c.compile("github_stars", Op::Eq, "one").unwrap(), one);
    assert_eq!(
        c.compile("github_stars", Op::Ne, "100").unwrap(),
        Predicate::ne(path("github_stars"), Value::Int(100))
    );
}

#[test]
fn nested_names_accept_either_separator() {
    let c = compiler();

    assert_eq!(
        c.compile("author.is_male", Op::Eq, "true").unwrap(),
        c.compile("author__is_male", Op::Eq, "true").unwrap()
    );
    assert_eq!(
        c.compile("author__is_male", Op::Eq, "false").unwrap(),
        Predicate::eq(path("author.is_male"), Value::Bool(false))
    );
}

#[test]
fn source_overrides_change_the_path() {
    let c = compiler();

    assert_eq!(
        c.compile("published.at", Op::Ge, "2019-02-12T10:02:00+03:00").unwrap(),
        Predicate::compare(
            path("published_at"),
            CompareOp::Gte,
            Value::DateTime(DateTime::new_checked(2019, 2, 12, 7, 2, 0).unwrap())
        )
    );
    assert_eq!(
        c.compile("url", Op::Eq, "http://x").unwrap(),
        Predicate::eq(path("publishing_url"), Value::text("http://x"))
    );
}

#[test]
fn multi_source_filters_match_any_source() {
    let c = compiler();
    let any = Predicate::Or(vec![
        Predicate::eq(path("id"), Value::Int(3)),
        Predicate::eq(path("author.id"), Value::Int(3)),
    ]);

    assert_eq!(c.compile("d_id", Op::Eq, "3").unwrap(), any);
    assert_eq!(c.compile("d_id", Op::Ne, "3").unwrap(), Predicate::not(any));
}

#[test]
fn unknown_filters_fail_without_a_hook() {
    let c = compiler();

    assert_eq!(
        c.compile("invalid", Op::Eq, "value"),
        Err(FilterError::not_implemented("invalid"))
    );
}

#[test]
fn ignored_filters_match_everything() {
    let config = CompilerConfig::default().ignore("search").ignore("ordering");
    let c = compiler().with_config(&config);

    assert_eq!(c.compile("search", Op::Eq, "x").unwrap(), Predicate::True);
    assert_eq!(c.compile("ordering", Op::Like, "**").unwrap(), Predicate::True);
    assert!(c.compile("select", Op::Eq, "x").is_err());
}

#[test]
fn ignore_fallback_covers_every_unknown_name() {
    let config = CompilerConfig::default().unknown_filter_action(UnknownFilterAction::Ignore);
    let c = compiler().with_config(&config);

    assert_eq!(c.compile("anything", Op::Gt, "1").unwrap(), Predicate::True);
    // registered names still validate
    assert!(c.compile("id", Op::Eq, "x").is_err());
}

#[test]
fn custom_hook_receives_the_triple_verbatim() {
    let c = compiler().with_custom_filter(|name: &str, op: Op, raw: &str| {
        (name == "author__name" && op == Op::Eq).then(|| Predicate::eq(path("author.name"), raw.into()))
    });

    assert_eq!(
        c.compile("author__name", Op::Eq, "'Ann'").unwrap(),
        Predicate::eq(path("author.name"), Value::text("'Ann'"))
    );
    assert_eq!(
        c.compile("author__name", Op::Ne, "Ann"),
        Err(FilterError::not_implemented("author__name"))
    );
}

#[test]
fn compiler_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FilterCompiler>();
}
