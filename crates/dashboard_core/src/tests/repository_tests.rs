use super::*;

#[test]
fn generates_every_planned_bucket_without_drift() {
    let repository = OrderRepository::generate();
    assert_eq!(repository.orders().len(), 54);
    assert!(repository.count_drift().is_empty());

    for section in repository.sections() {
        for sub in &section.subcategories {
            assert!(sub.count_matches_orders(), "{} drifted", sub.name);
            assert!(!sub.orders.is_empty(), "{} is empty", sub.name);
        }
    }
}

#[test]
fn section_counts_sum_their_subcategories() {
    let repository = OrderRepository::generate();
    let counts: Vec<_> = repository
        .sections()
        .iter()
        .map(|section| (section.title.as_str(), section.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("Orders on Track", 37),
            ("Orders on Delay", 8),
            ("Orders which got stuck", 9),
        ]
    );
}

#[test]
fn generation_is_deterministic_with_unique_ids() {
    let first = generate_orders();
    let second = generate_orders();
    assert_eq!(first, second);

    let mut ids: Vec<_> = first.iter().map(|order| order.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), first.len());
}

#[test]
fn subcategory_always_belongs_to_its_category() {
    for order in generate_orders() {
        assert_eq!(
            Category::for_subcategory(&order.subcategory).map(Category::title),
            Some(order.category.as_str())
        );
    }
}

#[test]
fn conditional_fields_follow_category() {
    for order in generate_orders() {
        assert_eq!(order.delay_reason.is_some(), order.is_delayed(), "{}", order.id);
        assert_eq!(order.queue_name.is_some(), order.is_stuck(), "{}", order.id);
        assert_eq!(
            order.cc_date.is_some(),
            order.subcategory == OR_DELAYED,
            "{}",
            order.id
        );
    }
}

#[test]
fn index_lookups_match_linear_scan() {
    let repository = OrderRepository::generate();
    let expected: Vec<_> = repository
        .orders()
        .iter()
        .enumerate()
        .filter(|(_, order)| order.subcategory == "Triage Orders")
        .map(|(pos, _)| pos)
        .collect();
    let index = OrderIndex::build(repository.orders());
    assert_eq!(index.subcategory("Triage Orders"), expected);
    assert_eq!(index.category("Orders on Delay").len(), 8);
    assert!(index.subcategory("missing").is_empty());
}

#[test]
fn orders_outside_vocabulary_land_in_no_section() {
    let mut orders = generate_orders();
    orders[0].subcategory = "Made Up Bucket".to_string();
    let repository = OrderRepository::from_orders(orders);

    let placed: usize = repository
        .sections()
        .iter()
        .map(|section| section.orders().count())
        .sum();
    assert_eq!(placed, 53);
    assert_eq!(repository.orders().len(), 54);

    let drift = repository.count_drift();
    assert_eq!(
        drift,
        vec![CountDrift {
            subcategory: "Order under Validation".to_string(),
            planned: 5,
            actual: 4,
        }]
    );
}

#[test]
fn lookups_report_unknown_keys() {
    let repository = OrderRepository::generate();
    let first_id = repository.orders()[0].id.clone();
    assert_eq!(
        repository.find_order(first_id.as_str()).map(|order| &order.id),
        Ok(&first_id)
    );
    assert_eq!(
        repository.find_order("ORD-0"),
        Err(DashboardError::UnknownOrder("ORD-0".to_string()))
    );

    let (title, sub) = repository.subcategory(CP_DELAYED).expect("bucket");
    assert_eq!(title, "Orders on Delay");
    assert_eq!(sub.count, 5);
    assert!(matches!(
        repository.subcategory("nope"),
        Err(DashboardError::UnknownSubcategory(_))
    ));
}

#[test]
fn order_filed_under_the_wrong_category_lands_in_no_section() {
    let mut orders = generate_orders();
    let stray = orders
        .iter_mut()
        .find(|order| order.subcategory == "Triage Orders")
        .expect("triage order");
    stray.category = Category::Stuck.title().to_string();
    let stray_id = stray.id.clone();
    let repository = OrderRepository::from_orders(orders);

    assert!(repository
        .sections()
        .iter()
        .flat_map(|section| section.orders())
        .all(|order| order.id != stray_id));
    assert!(repository.find_order(stray_id.as_str()).is_ok());
}
