mod common;

use common::{sample_report, MockBackend};
use finview::api::types::Market;
use finview::report::{ReportController, StatementType, StatementView};
use std::sync::Arc;

fn controller_with(backend: &Arc<MockBackend>) -> ReportController {
    ReportController::new(backend.clone())
}

#[tokio::test]
async fn test_search_renders_stock_info_and_balance_sheet() {
    let backend = Arc::new(MockBackend::default().with_report("Moutai", sample_report()));
    let mut controller = controller_with(&backend);

    controller.search("  Moutai ", Some(Market::AShare)).await;

    let view = controller.view();
    assert!(!view.loading);
    assert!(view.result_visible);
    assert!(view.error.is_none());
    assert!(view.stock_info_html.contains("<h3>Kweichow Moutai</h3>"));
    assert!(view.stock_info_html.contains(">A-Share<"));
    assert!(view.stock_info_html.contains(">SH600519<"));
    assert!(view
        .report_html
        .contains("<th>REPORT_DATE</th><th>TOTAL_ASSETS</th><th>NET_PROFIT</th>"));
    assert!(view.report_html.contains(r#"<td class="number positive">1.25亿</td>"#));
    assert!(view.report_html.contains(r#"<td class="number negative">-300.00万</td>"#));
    assert!(view.report_html.contains(r#"<td class="number">0.00亿</td>"#));
    assert!(view.report_html.contains("<td>-</td>"));
    assert!(view.report_html.contains("<td>2024-12-31</td>"));
}

#[tokio::test]
async fn test_switching_tabs_does_not_refetch() {
    let backend = Arc::new(MockBackend::default().with_report("Moutai", sample_report()));
    let mut controller = controller_with(&backend);
    controller.search("Moutai", None).await;

    controller.select_statement(StatementType::Indicator);
    assert_eq!(controller.view().active_tab, StatementType::Indicator);
    assert!(controller.view().report_html.contains(r#"<td class="number positive">12.5%</td>"#));

    controller.select_statement(StatementType::Income);
    let html = &controller.view().report_html;
    assert!(html.contains("No Income Statement data"));
    assert!(html.contains("income statement unavailable"));

    controller.select_statement(StatementType::CashFlow);
    match controller.statement_view() {
        Some(StatementView::NoData { statement, error }) => {
            assert_eq!(statement, StatementType::CashFlow);
            assert!(error.is_none());
        }
        other => panic!("expected empty cash flow, got {:?}", other),
    }

    assert_eq!(backend.report_calls(), 1);
}

#[tokio::test]
async fn test_backend_failure_message_is_shown_verbatim() {
    let backend = Arc::new(MockBackend::default());
    let mut controller = controller_with(&backend);

    controller.search("<Unknown>", None).await;

    let view = controller.view();
    assert!(!view.result_visible);
    assert!(!view.loading);
    assert_eq!(view.error.as_deref(), Some("Company not found: <Unknown>"));
    assert_eq!(
        view.error_html().unwrap(),
        "<div class=\"error-message\">Company not found: &lt;Unknown&gt;</div>"
    );
}

#[tokio::test]
async fn test_blank_company_issues_no_request() {
    let backend = Arc::new(MockBackend::default());
    let mut controller = controller_with(&backend);

    assert!(controller.begin_search("   ", None).is_none());
    controller.search("", None).await;

    assert_eq!(backend.report_calls(), 0);
    assert!(!controller.view().loading);
    assert!(controller.view().error.is_none());
}

#[tokio::test]
async fn test_superseded_search_is_discarded() {
    let mut other = sample_report();
    other.stock_info.name = "Tencent".to_string();
    other.stock_info.market = "HK".to_string();
    other.stock_info.symbol = None;
    let backend = Arc::new(
        MockBackend::default()
            .with_report("Moutai", sample_report())
            .with_report("Tencent", other),
    );
    let mut controller = controller_with(&backend);

    let first = controller.begin_search("Moutai", None).unwrap();
    assert!(controller.view().loading);
    let second = controller.begin_search("Tencent", Some(Market::HongKong)).unwrap();

    let second = second.resolve().await;
    controller.finish_search(second);
    let first = first.resolve().await;
    controller.finish_search(first);

    let record = controller.current().unwrap();
    assert_eq!(record.stock_info.name, "Tencent");
    assert!(controller.view().stock_info_html.contains(">Hong Kong<"));
    assert!(controller.view().stock_info_html.contains(">600519<"));
}

#[tokio::test]
async fn test_new_search_hides_previous_error() {
    let backend = Arc::new(MockBackend::default().with_report("Moutai", sample_report()));
    let mut controller = controller_with(&backend);

    controller.search("nobody", None).await;
    assert!(controller.view().error.is_some());

    let pending = controller.begin_search("Moutai", None).unwrap();
    assert!(controller.view().error.is_none());
    assert!(!controller.view().result_visible);
    let completed = pending.resolve().await;
    controller.finish_search(completed);
    assert!(controller.view().result_visible);
}
