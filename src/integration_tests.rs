#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use crate::app_system::MarketSystem;
    use crate::auth::AuthState;
    use crate::catalog::{BrowseParams, CategoryFilter, SortKey};
    use crate::config::MarketConfig;
    use crate::domain::{Category, Celebrity, Occasion, RequestStatus, User, VideoRequest};
    use crate::pages::{
        BrowsePage, DashboardPage, DashboardView, RequestForm, SubmitError, UNKNOWN_CELEBRITY,
    };
    use crate::shell::{AppShell, Route, ShellView};

    fn celebrity(id: &str, name: &str, category: Category, price_cents: u64, rating: f64) -> Celebrity {
        let mut c = Celebrity::new(id, name, category, price_cents);
        c.rating = rating;
        c
    }

    fn start(catalog: Vec<Celebrity>) -> MarketSystem {
        MarketSystem::new(&MarketConfig::default(), catalog)
    }

    #[tokio::test]
    async fn test_browse_from_url() {
        let system = start(vec![
            celebrity("c1", "Ann", Category::Sports, 10_000, 4.9),
            celebrity("c2", "Bo", Category::Music, 5_000, 4.5),
            celebrity("c3", "Cy", Category::Sports, 60_000, 4.7),
        ]);

        let Some(Route::Browse(params)) = Route::parse("/browse?category=Sports") else {
            panic!("Expected browse route");
        };
        assert_eq!(params, BrowseParams::new(None, CategoryFilter::Only(Category::Sports)));

        let mut query = BrowsePage::query_for(&params, 500);
        let page = BrowsePage::load(&system.celebrity_client, query.clone(), 50).await;
        let ids: Vec<_> = page.results.iter().map(|c| c.id.as_str()).collect();
        // c3 costs more than the slider ceiling
        assert_eq!(ids, vec!["c1"]);

        query.sort = SortKey::PriceAsc;
        query.category = CategoryFilter::All;
        let page = BrowsePage::load(&system.celebrity_client, query, 50).await;
        let ids: Vec<_> = page.results.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c1"]);
        assert_eq!(page.summary(), "2 celebrities found");

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_then_dashboard_lists_order() {
        let system = start(vec![celebrity("c1", "Ann", Category::Sports, 12_550, 4.9)]);
        let mut shell = AppShell::mount(&system.auth_store);
        shell.wait_ready().await;
        assert_matches!(shell.render("/dashboard"), ShellView::Page { .. });

        let ann = system.celebrity_client.find("c1").await.unwrap().unwrap();
        let form = RequestForm {
            occasion: "Graduation".into(),
            recipient_name: "Kim".into(),
            custom_message: "Congrats!".into(),
            special_instructions: "  ".into(),
        };

        // Signed out: nothing is written.
        let err = system.submitter().submit(&ann, &form).await.unwrap_err();
        assert_matches!(err, SubmitError::Auth(_));
        assert!(system.request_client.list_for_user("u1").await.unwrap().is_empty());

        system
            .auth_client
            .login(User::new("u1", "kim@example.com"))
            .await
            .unwrap();
        let done = system.submitter().submit(&ann, &form).await.unwrap();
        assert_eq!(done.navigate_to, Route::Dashboard);
        assert!(done.request.id.starts_with("req_"));
        assert_eq!(done.request.price_paid_cents, 12_550);
        assert_eq!(done.request.special_instructions, None);

        let mut dashboard = DashboardPage::mount(&system.auth_store, system.aggregator());
        let view = dashboard.refresh().await.cloned().unwrap();
        let DashboardView::Orders(buckets) = view else {
            panic!("Expected orders");
        };
        assert_eq!(buckets.all.len(), 1);
        assert_eq!(buckets.pending.len(), 1);
        assert!(buckets.completed.is_empty());
        let order = &buckets.all[0];
        assert_eq!(order.celebrity_name, "Ann");
        assert_eq!(order.headline(), "Graduation for Kim");
        assert_eq!(order.price_text(), "$126");

        drop(dashboard);
        drop(shell);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_dashboard_placeholder_for_missing_celebrity() {
        let system = start(vec![celebrity("c1", "Ann", Category::Music, 5_000, 4.0)]);
        let orphan = VideoRequest {
            id: "req_orphan".into(),
            user_id: "u1".into(),
            celebrity_id: "gone".into(),
            occasion: Occasion::Wedding,
            recipient_name: "Lee".into(),
            custom_message: "Cheers".into(),
            special_instructions: None,
            price_paid_cents: 9_000,
            status: RequestStatus::Completed,
            video_url: Some("https://videos/orphan.mp4".into()),
            created_at: Utc::now(),
            completed_at: Some(Utc::now()),
        };
        system.request_client.create_video_request(orphan).await.unwrap();

        let signed_in = AuthState::resolved(Some(User::new("u1", "lee@example.com")));
        let DashboardView::Orders(buckets) = system.aggregator().view(&signed_in).await else {
            panic!("Expected orders");
        };
        assert_eq!(buckets.completed.len(), 1);
        assert_eq!(buckets.all[0].celebrity_name, UNKNOWN_CELEBRITY);

        let other = AuthState::resolved(Some(User::new("u2", "x@example.com")));
        assert_eq!(system.aggregator().view(&other).await, DashboardView::Empty);

        system.shutdown().await.unwrap();
    }
}
