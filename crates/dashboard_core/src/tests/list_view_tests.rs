use super::*;
use crate::repository::generate_orders;
use crate::test_support::{ids, order, with_priority, with_start};
use proptest::prelude::*;

fn pair() -> Vec<Order> {
    vec![
        with_start(with_priority(order("A"), Priority::High), "2024-01-01"),
        with_start(with_priority(order("B"), Priority::Low), "2024-02-01"),
    ]
}

#[test]
fn priority_filter_with_default_sort() {
    let orders = pair();
    let filter = ListFilter {
        priority: Some(Priority::High),
        ..ListFilter::default()
    };
    let rows = view(&orders, &filter, SortState::default());
    assert_eq!(ids(&rows), vec!["A"]);
}

#[test]
fn default_sort_is_newest_start_date_first() {
    let orders = pair();
    let rows = view(&orders, &ListFilter::default(), SortState::default());
    assert_eq!(ids(&rows), vec!["B", "A"]);
    assert_eq!(
        SortState::default(),
        SortState::new(SortField::StartDate, SortDirection::Desc)
    );
}

#[test]
fn list_query_also_searches_service_id() {
    let mut orders = pair();
    orders[1].service_id = "SVC-777".into();
    let filter = ListFilter {
        query: "svc-777".to_string(),
        ..ListFilter::default()
    };
    assert_eq!(ids(&view(&orders, &filter, SortState::default())), vec!["B"]);
}

#[test]
fn predicates_are_anded() {
    let mut orders = pair();
    orders[0].journey = Journey::Cease;
    let filter = ListFilter {
        query: "customer".to_string(),
        priority: Some(Priority::High),
        journey: Some(Journey::Provide),
    };
    assert!(view(&orders, &filter, SortState::default()).is_empty());

    let filter = ListFilter {
        journey: Some(Journey::Cease),
        ..filter
    };
    assert_eq!(ids(&view(&orders, &filter, SortState::default())), vec!["A"]);
}

#[test]
fn toggling_same_field_flips_and_new_field_resets_to_ascending() {
    let start = SortState::default();
    let flipped = start.toggled(SortField::StartDate);
    assert_eq!(flipped.direction, SortDirection::Asc);
    assert_eq!(flipped.toggled(SortField::StartDate), start);

    let other = flipped.toggled(SortField::CustomerName);
    assert_eq!(other, SortState::new(SortField::CustomerName, SortDirection::Asc));
    let other = start.toggled(SortField::Progress);
    assert_eq!(other.direction, SortDirection::Asc);
}

#[test]
fn unparsable_dates_sort_after_valid_ones_and_keep_input_order() {
    let orders = vec![
        with_start(order("bad1"), "not a date"),
        with_start(order("mid"), "2024-03-01"),
        with_start(order("bad2"), ""),
        with_start(order("early"), "2023-12-31"),
    ];
    let asc = SortState::new(SortField::StartDate, SortDirection::Asc);
    assert_eq!(
        ids(&view(&orders, &ListFilter::default(), asc)),
        vec!["early", "mid", "bad1", "bad2"]
    );
    let desc = SortState::new(SortField::StartDate, SortDirection::Desc);
    assert_eq!(
        ids(&view(&orders, &ListFilter::default(), desc)),
        vec!["bad1", "bad2", "mid", "early"]
    );
}

#[test]
fn missing_completion_dates_behave_like_unparsable_ones() {
    let mut done = order("done");
    done.completion_date = Some("2024-05-01".to_string());
    let orders = vec![order("open"), done];
    let asc = SortState::new(SortField::CompletionDate, SortDirection::Asc);
    assert_eq!(
        ids(&view(&orders, &ListFilter::default(), asc)),
        vec!["done", "open"]
    );
}

#[test]
fn progress_sorts_numerically() {
    let mut a = order("a");
    a.progress = 9;
    let mut b = order("b");
    b.progress = 10;
    let mut c = order("c");
    c.progress = 100;
    let orders = vec![c, a, b];
    let asc = SortState::new(SortField::Progress, SortDirection::Asc);
    assert_eq!(ids(&view(&orders, &ListFilter::default(), asc)), vec!["a", "b", "c"]);
}

#[test]
fn text_sort_ignores_case_before_exact_text() {
    let mut lower = order("1");
    lower.customer_name = "acme".to_string();
    let mut upper = order("2");
    upper.customer_name = "Acme".to_string();
    let mut bravo = order("3");
    bravo.customer_name = "Bravo".to_string();
    let orders = vec![bravo, upper, lower];
    let asc = SortState::new(SortField::CustomerName, SortDirection::Asc);
    assert_eq!(ids(&view(&orders, &ListFilter::default(), asc)), vec!["1", "2", "3"]);
}

#[test]
fn lowercase_sorts_before_uppercase_on_equal_letters() {
    assert_eq!(compare_text("acme", "Acme"), Ordering::Less);
    assert_eq!(compare_text("Acme", "acme"), Ordering::Greater);
    assert_eq!(compare_text("acme", "acme"), Ordering::Equal);
    assert_eq!(compare_text("Acme", "bravo"), Ordering::Less);
}

#[test]
fn priority_sorts_by_its_text() {
    let orders = vec![
        with_priority(order("m"), Priority::Medium),
        with_priority(order("h"), Priority::High),
        with_priority(order("l"), Priority::Low),
    ];
    let asc = SortState::new(SortField::Priority, SortDirection::Asc);
    assert_eq!(ids(&view(&orders, &ListFilter::default(), asc)), vec!["h", "l", "m"]);
}

#[test]
fn parses_timestamps_in_supported_shapes() {
    assert!(parse_timestamp("2024-01-01").is_some());
    assert!(parse_timestamp("2024-01-01T10:30:00").is_some());
    assert!(parse_timestamp("2024-01-01T10:30:00Z").is_some());
    assert_eq!(parse_timestamp("01/02/2024"), None);
    assert!(parse_timestamp("2024-01-02") > parse_timestamp("2024-01-01"));
}

#[test]
fn active_filter_count_and_clear() {
    let mut filter = ListFilter {
        query: "x".to_string(),
        priority: None,
        journey: Some(Journey::Modify),
    };
    assert_eq!(filter.active_count(), 2);
    filter.clear();
    assert_eq!(filter, ListFilter::default());
    assert_eq!(filter.active_count(), 0);
}

#[test]
fn whitespace_query_is_not_an_active_filter() {
    let orders = pair();
    let filter = ListFilter {
        query: "   ".to_string(),
        ..ListFilter::default()
    };
    assert_eq!(filter.active_count(), 0);
    assert_eq!(view(&orders, &filter, SortState::default()).len(), 2);
}

#[test]
fn summary_line_pluralises_on_total() {
    assert_eq!(summary_line(0, 1), "0 of 1 order");
    assert_eq!(summary_line(2, 5), "2 of 5 orders");
}

#[test]
fn sort_fields_parse_from_cli_spellings() {
    assert_eq!(SortField::parse("start_date"), Some(SortField::StartDate));
    assert_eq!(SortField::parse("customer-name"), Some(SortField::CustomerName));
    assert_eq!(SortField::parse("Phase"), Some(SortField::ProjectProgression));
    assert_eq!(SortField::parse("colour"), None);
}

#[test]
fn list_state_memoizes_until_inputs_change() {
    let orders = generate_orders();
    let mut state = ListViewState::new();
    let first: Vec<_> = state.rows(&orders).iter().map(|o| o.id.clone()).collect();
    let again: Vec<_> = state.rows(&orders).iter().map(|o| o.id.clone()).collect();
    assert_eq!(first, again);
    assert_eq!(first.len(), orders.len());

    state.filter.priority = Some(Priority::Low);
    let low = state.rows(&orders);
    assert!(low.iter().all(|o| o.priority == Priority::Low));
    assert!(low.len() < orders.len());

    state.clear_filters();
    state.toggle_sort(SortField::Id);
    let by_id: Vec<_> = state.rows(&orders).iter().map(|o| o.id.to_string()).collect();
    let mut sorted = by_id.clone();
    sorted.sort();
    assert_eq!(by_id, sorted);
}

#[test]
fn list_state_recomputes_for_a_different_bucket() {
    let first_bucket = vec![
        with_start(order("a1"), "2024-01-01"),
        with_start(order("a2"), "2024-02-01"),
        with_start(order("a3"), "2024-03-01"),
        with_start(order("a4"), "2024-04-01"),
    ];
    let second_bucket = vec![
        with_start(order("b1"), "2024-01-01"),
        with_start(order("b2"), "2024-05-01"),
    ];
    let mut state = ListViewState::new();
    assert_eq!(ids(&state.rows(&first_bucket)), vec!["a4", "a3", "a2", "a1"]);
    assert_eq!(ids(&state.rows(&second_bucket)), vec!["b2", "b1"]);
    assert_eq!(ids(&state.rows(&first_bucket)), vec!["a4", "a3", "a2", "a1"]);
}

fn arb_order() -> impl Strategy<Value = Order> {
    (
        "[A-Z]{1,3}",
        prop::sample::select(vec!["2024-01-01", "2024-02-15", "2023-11-30", "garbage", ""]),
        0i32..=100,
        prop::sample::select(Priority::ALL.to_vec()),
        prop::sample::select(Journey::ALL.to_vec()),
    )
        .prop_map(|(name, start, progress, priority, journey)| {
            let mut o = with_start(order(&name), start);
            o.customer_name = name;
            o.progress = progress;
            o.priority = priority;
            o.journey = journey;
            o
        })
}

fn arb_field() -> impl Strategy<Value = SortField> {
    prop::sample::select(vec![
        SortField::Id,
        SortField::CustomerName,
        SortField::StartDate,
        SortField::CompletionDate,
        SortField::Journey,
        SortField::Priority,
        SortField::Progress,
    ])
}

fn arb_direction() -> impl Strategy<Value = SortDirection> {
    prop::sample::select(vec![SortDirection::Asc, SortDirection::Desc])
}

fn relabel(mut orders: Vec<Order>) -> Vec<Order> {
    for (pos, order) in orders.iter_mut().enumerate() {
        order.id = format!("#{pos:03}").as_str().into();
    }
    orders
}

proptest! {
    #[test]
    fn unfiltered_view_is_a_permutation(
        orders in prop::collection::vec(arb_order(), 0..20),
        field in arb_field(),
        direction in arb_direction(),
    ) {
        let orders = relabel(orders);
        let rows = view(&orders, &ListFilter::default(), SortState::new(field, direction));
        let mut got = ids(&rows);
        got.sort();
        let mut expected: Vec<String> = orders.iter().map(|o| o.id.to_string()).collect();
        expected.sort();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn sorting_is_ordered_and_stable(
        orders in prop::collection::vec(arb_order(), 0..20),
        field in arb_field(),
        direction in arb_direction(),
    ) {
        let orders = relabel(orders);
        let rows = view(&orders, &ListFilter::default(), SortState::new(field, direction));
        for window in rows.windows(2) {
            let ordering = direction.apply(compare_by(field, window[0], window[1]));
            prop_assert_ne!(ordering, Ordering::Greater);
            if ordering == Ordering::Equal {
                // relabelled ids encode input position
                prop_assert!(window[0].id < window[1].id);
            }
        }
    }

    #[test]
    fn toggled_direction_reverses_distinct_keys(
        progresses in prop::collection::btree_set(0i32..=100, 0..15),
    ) {
        let orders: Vec<Order> = progresses
            .iter()
            .map(|p| {
                let mut o = order(&format!("p{p}"));
                o.progress = *p;
                o
            })
            .collect();
        let asc = SortState::new(SortField::Progress, SortDirection::Asc);
        let desc = asc.toggled(SortField::Progress);
        let mut forward = ids(&view(&orders, &ListFilter::default(), asc));
        let backward = ids(&view(&orders, &ListFilter::default(), desc));
        forward.reverse();
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(desc.toggled(SortField::Progress), asc);
    }

    #[test]
    fn every_row_satisfies_the_filter(
        orders in prop::collection::vec(arb_order(), 0..20),
        query in "[a-c]{0,2}",
        priority in prop::option::of(prop::sample::select(Priority::ALL.to_vec())),
    ) {
        let filter = ListFilter { query, priority, journey: None };
        let rows = view(&orders, &filter, SortState::default());
        prop_assert!(rows.iter().all(|o| filter.matches(o)));
        let expected = orders.iter().filter(|o| filter.matches(o)).count();
        prop_assert_eq!(rows.len(), expected);
    }
}
