use chrono::NaiveDate;
use dashboard_core::{
    export, list_view, search, DashboardSession, DashboardTab, ListContext, ListFilter, NavEvent,
    OrderRepository, Settings, SortDirection, SortField, SortState, TabContent, ViewState,
};
use shared::{Category, Priority};

fn open_card(session: &mut DashboardSession, name: &str) -> ListContext {
    let (title, sub) = session
        .repository()
        .subcategory(name)
        .expect("subcategory");
    let ctx = ListContext::new(sub.clone(), title);
    session.dispatch(NavEvent::SelectCard(ctx.clone()));
    ctx
}

#[test]
fn drill_down_and_back_out_acceptance() {
    let mut session = DashboardSession::new(OrderRepository::generate(), Settings::default());
    session.set_active_tab(DashboardTab::Delayed);

    let TabContent::Section(section) = session.tab_content() else {
        panic!("delayed tab should have orders");
    };
    assert_eq!(section.title, Category::Delayed.title());
    assert_eq!(section.subcategories.len(), 2);

    let ctx = open_card(&mut session, "OR Delayed Orders");
    assert_eq!(session.view(), &ViewState::OrderList(ctx.clone()));

    let order = session.list_rows()[0].clone();
    session.dispatch(NavEvent::SelectOrder(order.clone()));
    session.dispatch(NavEvent::SelectTask(order.clone()));
    assert_eq!(session.view().list_context(), Some(&ctx));

    session.dispatch(NavEvent::Back);
    assert_eq!(
        session.view(),
        &ViewState::OrderDetail {
            order,
            return_to: Some(ctx.clone()),
        }
    );
    session.dispatch(NavEvent::Back);
    assert_eq!(session.view(), &ViewState::OrderList(ctx));
    session.dispatch(NavEvent::Back);
    assert_eq!(session.view(), &ViewState::Dashboard);
}

#[test]
fn search_from_order_detail_resets_to_filtered_dashboard() {
    let mut session = DashboardSession::new(OrderRepository::generate(), Settings::default());
    open_card(&mut session, "Orders in Build");
    let order = session.list_rows()[0].clone();
    session.dispatch(NavEvent::SelectOrder(order.clone()));

    session.dispatch(NavEvent::Search(order.id.to_string()));
    assert_eq!(session.view(), &ViewState::Dashboard);

    let surviving: Vec<_> = session
        .sections()
        .iter()
        .flat_map(|section| section.orders())
        .collect();
    assert_eq!(surviving, vec![&order]);
    match session.tab_content() {
        TabContent::Section(section) => {
            assert_eq!(section.subcategories[0].name, "Orders in Build");
            // declared counts survive filtering
            assert_eq!(section.count, 37);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn dashboard_search_then_list_filter_narrows_twice() {
    let repository = OrderRepository::generate();
    let filtered = search::filter_sections(repository.sections(), "planning");
    let section = filtered
        .iter()
        .find(|s| s.title == Category::OnTrack.title())
        .expect("on track survives");

    for sub in &section.subcategories {
        let filter = ListFilter {
            priority: Some(Priority::High),
            ..ListFilter::default()
        };
        let rows = list_view::view(&sub.orders, &filter, SortState::default());
        assert!(rows.len() <= sub.orders.len());
        for order in rows {
            assert_eq!(order.priority, Priority::High);
            assert!(search::matches_dashboard_query(order, "planning"));
        }
    }
}

#[test]
fn export_of_a_sorted_stuck_bucket() {
    let repository = OrderRepository::generate();
    let (title, sub) = repository
        .subcategory("Product Support Group")
        .expect("bucket");
    assert_eq!(title, Category::Stuck.title());

    let sort = SortState::new(SortField::Progress, SortDirection::Desc);
    let rows = list_view::view(&sub.orders, &ListFilter::default(), sort);
    let text = export::to_delimited_text(&sub.orders, &rows);
    let mut lines = text.lines();
    let header = lines.next().expect("header");
    assert!(header.ends_with("Notes,Queue Name,Business Days in Queue"));
    assert!(!header.contains("Delay Reason"));

    let progress: Vec<i32> = lines
        .map(|line| line.split(',').nth(9).expect("progress").parse().expect("number"))
        .collect();
    let mut expected = progress.clone();
    expected.sort_by(|a, b| b.cmp(a));
    assert_eq!(progress, expected);

    let date = NaiveDate::from_ymd_opt(2025, 2, 14).expect("date");
    assert_eq!(
        export::export_filename(&sub.name, date),
        "product_support_group_orders_2025-02-14.csv"
    );
}
