mod domain;
mod clients;
mod messages;
mod records;

mod app_system;
mod auth;
mod catalog;
mod config;
mod error;
mod format;
mod pages;
mod shell;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

mod actor_framework;

use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, MarketSystem};
use crate::catalog::{snap_to_slider, CategoryFilter, PriceRange, SortKey, TRENDING_SEARCHES};
use crate::config::MarketConfig;
use crate::domain::{Category, User};
use crate::pages::{
    search_target, BrowsePage, DashboardPage, DashboardView, HomePage, ProfilePage, RequestForm,
    RequestPage,
};
use crate::shell::{AppShell, AuthAction, Route, ShellView};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = MarketConfig::load().map_err(|e| e.to_string())?;
    let catalog = config.load_catalog().map_err(|e| e.to_string())?;

    info!("Starting shoutout marketplace");
    let system = MarketSystem::new(&config, catalog);

    let mut shell = AppShell::mount(&system.auth_store);
    shell.wait_ready().await;

    // Home: featured picks and the hero search
    let span = tracing::info_span!("home");
    let target = async {
        let home = HomePage::load(&system.celebrity_client, &config).await;
        let categories: Vec<_> = CategoryFilter::choices().map(|c| c.label()).collect();
        info!(
            featured = home.featured.len(),
            ?categories,
            trending = ?TRENDING_SEARCHES,
            "Home rendered"
        );
        let live = home.matching("lark", CategoryFilter::All);
        info!(matches = live.len(), "Hero search preview");
        search_target("", CategoryFilter::Only(Category::Sports))
    }
    .instrument(span)
    .await;

    // Browse: the URL the hero search produced
    let span = tracing::info_span!("browse", path = %target);
    let picked = async {
        let Some(Route::Browse(params)) = Route::parse(&target.to_path()) else {
            warn!("Search target did not resolve to the browse page");
            return None;
        };
        let query = BrowsePage::query_for(&params, config.price_ceiling_dollars);
        let page = BrowsePage::load(&system.celebrity_client, query, config.catalog_limit).await;
        info!(summary = %page.summary(), "Browse rendered");

        // Narrow by dragging the slider and re-sorting by price.
        let mut narrowed = page.query.clone();
        let max_dollars = snap_to_slider(190, config.price_ceiling_dollars);
        narrowed.price = PriceRange::from_dollars(0, max_dollars);
        narrowed.sort = SortKey::PriceAsc;
        let cheaper = BrowsePage::load(&system.celebrity_client, narrowed, config.catalog_limit).await;
        info!(
            max_dollars,
            sort = cheaper.query.sort.label(),
            summary = %cheaper.summary(),
            "Browse refined"
        );

        let trending = Route::Browse(page.params().with_search(TRENDING_SEARCHES[0]));
        info!(next = %trending, "Trending chip");

        page.results.first().map(|c| c.id.clone())
    }
    .instrument(span)
    .await;

    let Some(celebrity_id) = picked else {
        system.shutdown().await?;
        return Err("Catalog has no sports celebrities".to_string());
    };

    // Profile, then sign in and request a video
    let span = tracing::info_span!("request_flow", celebrity_id = %celebrity_id);
    let submitted = async {
        if let ProfilePage::Profile(view) =
            ProfilePage::load(&system.celebrity_client, &celebrity_id).await
        {
            info!(price = %view.price, response_time = %view.response_time, "Profile rendered");
        }

        system
            .auth_client
            .login(User::new("user_demo", "fan@example.com"))
            .await
            .map_err(|e| e.to_string())?;
        shell.sync().await;
        if let ShellView::Page { header, .. } = shell.render(&Route::Dashboard.to_path()) {
            if let AuthAction::SignOut { email } = &header.auth_action {
                info!(%email, signed_in_nav = header.shows("My Orders"), "Header updated");
            }
        }

        let RequestPage::Form { celebrity, .. } =
            RequestPage::load(&system.celebrity_client, &celebrity_id).await
        else {
            return Err(format!("Celebrity {celebrity_id} not found"));
        };

        let form = RequestForm {
            occasion: "Birthday".into(),
            recipient_name: "Sam".into(),
            custom_message: "Happy birthday from your biggest fan!".into(),
            special_instructions: String::new(),
        };
        match system.submitter().submit(&celebrity, &form).await {
            Ok(done) => {
                info!(
                    request_id = %done.request.id,
                    next = %done.navigate_to,
                    toast = %done.notification.title,
                    "Request submitted"
                );
                Ok(true)
            }
            Err(e) => {
                error!(error = %e, toast = %e.notification().title, "Request failed");
                Ok(false)
            }
        }
    }
    .instrument(span)
    .await?;

    // Dashboard
    let span = tracing::info_span!("dashboard");
    async {
        let mut dashboard = DashboardPage::mount(&system.auth_store, system.aggregator());
        match dashboard.refresh().await {
            Some(DashboardView::Orders(buckets)) => {
                for order in &buckets.all {
                    info!(
                        celebrity = %order.celebrity_name,
                        headline = %order.headline(),
                        status = order.status_text(),
                        paid = %order.price_text(),
                        ordered = %order.ordered_on(),
                        "Order"
                    );
                }
                info!(
                    pending = buckets.pending.len(),
                    completed = buckets.completed.len(),
                    cancelled = buckets.cancelled().count(),
                    "Dashboard rendered"
                );
            }
            Some(other) => info!(view = ?other, submitted, "Dashboard rendered"),
            None => warn!("Auth store closed before the dashboard loaded"),
        }
    }
    .instrument(span)
    .await;

    match system.auth_client.logout().await {
        Ok(()) => {
            shell.sync().await;
            info!(signed_in = system.auth_store.current().user.is_some(), "Signed out");
        }
        Err(e) => error!(error = %e, "Sign out failed"),
    }

    drop(shell);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
