//! Coverage tests for the query builder and the transform configuration.

use mik_filter::prelude::*;
use mik_filter::{AND, OR};
use std::sync::Arc;

fn members(node: &Node) -> &[Node] {
    node.get(OR).and_then(Node::as_list).unwrap()
}

mod equality_tests {
    use super::*;

    #[test]
    fn test_bool_and_numbers_pass_through() {
        let query = FilteringQuery::new()
            .filter("published", true)
            .filter("views", 42)
            .filter("score", 4.5);
        let built = build(&query, None);

        assert_eq!(
            built.conditions(),
            [
                Node::entry("published", Node::from(Value::Bool(true))),
                Node::entry("views", Node::from(Value::Int(42))),
                Node::entry("score", Node::from(Value::Float(4.5))),
            ]
        );
    }

    #[test]
    fn test_list_on_nested_path() {
        let query =
            FilteringQuery::new().filter("author.profile.department.region", vec!["US", "EU"]);
        let built = build(&query, None);

        let or = members(&built.conditions()[0]);
        assert_eq!(or.len(), 2);
        assert_eq!(
            or[0],
            fold("author.profile.department.region", Node::from("US"))
        );
        assert_eq!(or[0].depth(), 4);
    }

    #[test]
    fn test_each_list_filter_gets_its_own_or() {
        let query = FilteringQuery::new()
            .filter("status", vec!["draft", "review"])
            .filter("lang", vec!["en", "fr"]);
        let built = build(&query, None);

        assert_eq!(built.conditions().len(), 2);
        assert!(built.conditions().iter().all(Node::is_or_group));
    }

    #[test]
    fn test_where_always_has_and() {
        let built = build(&FilteringQuery::new(), None);
        assert_eq!(built.where_clause, Node::and(vec![]));
        assert!(built.where_clause.get(AND).is_some());
    }
}

mod search_tests {
    use super::*;

    #[test]
    fn test_single_search_not_wrapped() {
        let built = build(&FilteringQuery::new().search("author.name", "ada"), None);
        let condition = &built.conditions()[0];

        assert!(!condition.is_or_group());
        assert_eq!(
            condition.pointer(["author", "name", "contains"]),
            Some(&Node::from("ada"))
        );
    }

    #[test]
    fn test_multiple_searches_one_or_in_insertion_order() {
        let query = FilteringQuery::new()
            .search("title", "rust")
            .search("author.name", "rust");
        let built = build(&query, None);

        assert_eq!(built.conditions().len(), 1);
        let or = members(&built.conditions()[0]);
        assert!(or[0].get("title").is_some());
        assert!(or[1].get("author").is_some());
    }

    #[test]
    fn test_search_list_is_or_of_terms() {
        let built = build(&FilteringQuery::new().search("title", vec!["rust", "wasm"]), None);
        let or = members(&built.conditions()[0]);
        assert_eq!(or.len(), 2);
        assert_eq!(
            or[1].pointer(["title", "contains"]),
            Some(&Node::from("wasm"))
        );
    }

    #[test]
    fn test_sensitive_default_from_specification() {
        let spec = QuerySpecification::new().default_search_mode(SearchMode::Sensitive);
        let built = QueryBuilder::new()
            .specification(&spec)
            .build(&FilteringQuery::new().search("title", "Rust"));
        assert_eq!(
            built.conditions()[0].pointer(["title", "mode"]),
            Some(&Node::from("sensitive"))
        );
    }
}

mod range_tests {
    use super::*;

    #[test]
    fn test_dates_pass_through_as_strings() {
        let query = FilteringQuery::new().range(
            "createdAt",
            "2024-01-01T00:00:00Z",
            "2024-12-31T23:59:59Z",
        );
        let built = build(&query, None);
        let leaf = built.conditions()[0].get("createdAt").unwrap();

        assert_eq!(leaf.get("gte"), Some(&Node::from("2024-01-01T00:00:00Z")));
        assert_eq!(leaf.get("lte"), Some(&Node::from("2024-12-31T23:59:59Z")));
    }

    #[test]
    fn test_nested_range() {
        let built = build(&FilteringQuery::new().range("a.b.c", 1, 5), None);
        assert_eq!(
            built.conditions()[0].pointer(["a", "b", "c", "gte"]),
            Some(&Node::from(Value::Int(1)))
        );
    }

    #[test]
    fn test_same_key_twice_appends_twice() {
        let query = FilteringQuery::new()
            .range("price", 1, 10)
            .range("price", 5, 20);
        let built = build(&query, None);
        assert_eq!(built.conditions().len(), 2);
    }

    #[test]
    fn test_fully_open_range_is_skipped() {
        let query = FilteringQuery::new().range("price", Value::Null, Value::Null);
        assert!(build(&query, None).conditions().is_empty());
    }
}

mod pagination_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let built = build(&FilteringQuery::new(), None);
        assert_eq!((built.take, built.skip), (10, 0));
    }

    #[test]
    fn test_rows_without_page() {
        let built = build(&FilteringQuery::new().rows(25), None);
        assert_eq!((built.take, built.skip), (25, 0));
    }

    #[test]
    fn test_page_and_rows() {
        let built = build(&FilteringQuery::new().page(4).rows(25), None);
        assert_eq!((built.take, built.skip), (25, 75));
    }

    #[test]
    fn test_page_zero_saturates() {
        let built = build(&FilteringQuery::new().page(0), None);
        assert_eq!(built.skip, 0);
    }

    #[test]
    fn test_page_info_from_results() {
        let built = build(&FilteringQuery::new().page(2).rows(10), None);
        let info = PageInfo::new(10, Pagination::resolve(Some(2), Some(10))).with_total(35);

        assert_eq!(built.skip, 10);
        assert_eq!(info.page, 2);
        assert!(info.has_prev);
        assert!(info.has_next);
        assert_eq!(info.total_pages, Some(4));
    }
}

mod transform_tests {
    use super::*;

    #[test]
    fn test_empty_config_matches_plain_build() {
        let query = FilteringQuery::new()
            .filter("tags.name", vec!["rust", "wasm"])
            .search("title", "x")
            .range("price", 1, 2)
            .order_by("author.name", SortOrder::Desc)
            .page(2);
        let config = TransformConfig::new();

        assert_eq!(
            QueryBuilder::new().transform(&config).build(&query),
            build(&query, None)
        );
    }

    #[test]
    fn test_field_remap_applies_to_every_stage() {
        let config = TransformConfig::new().map_field("author", "author.name");
        let query = FilteringQuery::new()
            .filter("author", "ada")
            .order_by("author", SortOrder::Asc);
        let built = QueryBuilder::new().transform(&config).build(&query);

        assert_eq!(
            built.conditions()[0].pointer(["author", "name"]),
            Some(&Node::from("ada"))
        );
        assert_eq!(
            built.order_by.unwrap().pointer(["author", "name"]),
            Some(&Node::from("asc"))
        );
    }

    #[test]
    fn test_handlers_keyed_by_remapped_path() {
        let config = TransformConfig::new()
            .map_field("mail", "email")
            .field("email", FieldHandler::new().operator("equals"));
        let built = QueryBuilder::new()
            .transform(&config)
            .build(&FilteringQuery::new().filter("mail", "a@b.c"));

        assert_eq!(
            built.conditions()[0].pointer(["email", "equals"]),
            Some(&Node::from("a@b.c"))
        );
    }

    #[test]
    fn test_search_mode_override_beats_specification() {
        let spec = QuerySpecification::new().default_search_mode(SearchMode::Insensitive);
        let config = TransformConfig::new()
            .field("sku", FieldHandler::new().search_mode(SearchMode::Sensitive));
        let query = FilteringQuery::new().search("sku", "AB").search("title", "ab");
        let built = QueryBuilder::new()
            .specification(&spec)
            .transform(&config)
            .build(&query);

        let or = members(&built.conditions()[0]);
        assert_eq!(
            or[0].pointer(["sku", "mode"]),
            Some(&Node::from("sensitive"))
        );
        assert_eq!(
            or[1].pointer(["title", "mode"]),
            Some(&Node::from("insensitive"))
        );
    }

    #[test]
    fn test_custom_leaf_transformer() {
        let config = TransformConfig::new().field(
            "title",
            FieldHandler::new().transformer(|_: FieldPath<'_>, request: LeafRequest<'_>| {
                match request {
                    LeafRequest::Contains { value, .. } => Some(Node::entry(
                        "startsWith",
                        Node::from(value.clone()),
                    )),
                    _ => None,
                }
            }),
        );
        let query = FilteringQuery::new()
            .filter("title", "exact")
            .search("title", "pre");
        let built = QueryBuilder::new().transform(&config).build(&query);

        // Declined requests fall back to the default leaf
        assert_eq!(
            built.conditions()[0],
            Node::entry("title", Node::from("exact"))
        );
        assert_eq!(
            built.conditions()[1].pointer(["title", "startsWith"]),
            Some(&Node::from("pre"))
        );
    }

    #[test]
    fn test_quantified_relation() {
        let config = TransformConfig::new()
            .relation("tags", RelationHandler::Quantified(Quantifier::Some));
        let built = QueryBuilder::new()
            .transform(&config)
            .build(&FilteringQuery::new().filter("tags.name", "rust"));

        assert_eq!(
            built.conditions()[0].pointer(["tags", "some", "name"]),
            Some(&Node::from("rust"))
        );
    }

    #[test]
    fn test_quantifier_applies_per_hop() {
        let config = TransformConfig::new()
            .relation("posts", RelationHandler::Quantified(Quantifier::Every))
            .relation("author", RelationHandler::Quantified(Quantifier::Is));
        let built = QueryBuilder::new()
            .transform(&config)
            .build(&FilteringQuery::new().range("posts.author.age", 18, Value::Null));

        assert_eq!(
            built.conditions()[0].pointer(["posts", "every", "author", "is", "age", "gte"]),
            Some(&Node::from(Value::Int(18)))
        );
    }

    #[test]
    fn test_custom_relation_wrapper() {
        let wrapper = |relation: &str, inner: Node| {
            Node::entry(relation, Node::map([("where", inner), ("take", Node::from(Value::Int(1)))]))
        };
        let config =
            TransformConfig::new().relation("orders", RelationHandler::Custom(Arc::new(wrapper)));
        let built = QueryBuilder::new()
            .transform(&config)
            .build(&FilteringQuery::new().filter("orders.total", 100));

        let orders = built.conditions()[0].get("orders").unwrap();
        assert_eq!(
            orders.pointer(["where", "total"]),
            Some(&Node::from(Value::Int(100)))
        );
        assert_eq!(orders.get("take"), Some(&Node::from(Value::Int(1))));
    }

    #[test]
    fn test_relation_handlers_skip_order_by() {
        let config = TransformConfig::new()
            .relation("posts", RelationHandler::Quantified(Quantifier::Some));
        let built = QueryBuilder::new()
            .transform(&config)
            .build(&FilteringQuery::new().order_by("posts.createdAt", SortOrder::Desc));

        assert_eq!(
            built.order_by,
            Some(fold("posts.createdAt", Node::from("desc")))
        );
    }
}

mod validate_then_build_tests {
    use super::*;

    #[test]
    fn test_invalid_request_still_builds() {
        let spec = QuerySpecification::new()
            .allow_fields(&["status"])
            .forbid_fields(&["password"])
            .max_page_size(5);
        let query = FilteringQuery::new().filter("password", "x").rows(50);

        let err = spec.validate(&query).into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field 'password' is forbidden; Rows cannot exceed maximum page size of 5"
        );

        let built = build(&query, Some(&spec));
        assert_eq!(built.take, 50);
        assert_eq!(built.conditions().len(), 1);
    }

    #[test]
    fn test_validator_uses_request_paths_not_remapped() {
        let spec = QuerySpecification::new().allow_fields(&["author"]);
        let query = FilteringQuery::new().filter("author", "ada");
        assert!(spec.validate(&query).warnings.is_empty());

        let config = TransformConfig::new().map_field("author", "author.name");
        let built = QueryBuilder::new()
            .specification(&spec)
            .transform(&config)
            .build(&query);
        assert!(built.conditions()[0].pointer(["author", "name"]).is_some());
    }
}
