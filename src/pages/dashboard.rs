use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, error, info, instrument, warn};

use crate::auth::{AuthState, AuthStore, AuthSubscription};
use crate::clients::{CelebrityClient, VideoRequestClient};
use crate::domain::{Celebrity, Occasion, RequestStatus, VideoRequest};
use crate::error::DataError;
use crate::format::{format_date, format_price, status_label};

pub const UNKNOWN_CELEBRITY: &str = "Unknown Celebrity";

/// One order row: the request joined with its celebrity's name and picture.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub id: String,
    pub celebrity_id: String,
    pub celebrity_name: String,
    pub celebrity_image: Option<String>,
    pub occasion: Occasion,
    pub recipient_name: String,
    pub custom_message: String,
    pub price_paid_cents: u64,
    pub status: RequestStatus,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl OrderView {
    /// Joins `request` with its celebrity, or the placeholder when unresolved.
    pub fn join(request: VideoRequest, celebrity: Option<&Celebrity>) -> Self {
        let (celebrity_name, celebrity_image) = match celebrity {
            Some(c) => (c.name.clone(), c.profile_image_url.clone()),
            None => (UNKNOWN_CELEBRITY.to_string(), None),
        };
        Self {
            id: request.id,
            celebrity_id: request.celebrity_id,
            celebrity_name,
            celebrity_image,
            occasion: request.occasion,
            recipient_name: request.recipient_name,
            custom_message: request.custom_message,
            price_paid_cents: request.price_paid_cents,
            status: request.status,
            video_url: request.video_url,
            created_at: request.created_at,
            completed_at: request.completed_at,
        }
    }

    pub fn headline(&self) -> String {
        format!("{} for {}", self.occasion, self.recipient_name)
    }

    pub fn status_text(&self) -> &'static str {
        status_label(self.status)
    }

    pub fn price_text(&self) -> String {
        format_price(self.price_paid_cents)
    }

    pub fn ordered_on(&self) -> String {
        format_date(&self.created_at)
    }
}

/// Dashboard tabs. Cancelled orders only appear under `all`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBuckets {
    pub all: Vec<OrderView>,
    pub pending: Vec<OrderView>,
    pub completed: Vec<OrderView>,
}

impl OrderBuckets {
    pub fn partition(all: Vec<OrderView>) -> Self {
        let pending = all.iter().filter(|o| o.status.is_open()).cloned().collect();
        let completed = all
            .iter()
            .filter(|o| o.status == RequestStatus::Completed)
            .cloned()
            .collect();
        Self {
            all,
            pending,
            completed,
        }
    }

    pub fn cancelled(&self) -> impl Iterator<Item = &OrderView> {
        self.all
            .iter()
            .filter(|o| o.status == RequestStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashboardView {
    #[default]
    Loading,
    SignInRequired,
    Empty,
    Orders(OrderBuckets),
}

/// Builds the order list for a user from the two collections.
#[derive(Clone, Debug)]
pub struct OrderAggregator {
    requests: VideoRequestClient,
    celebrities: CelebrityClient,
}

impl OrderAggregator {
    pub fn new(requests: VideoRequestClient, celebrities: CelebrityClient) -> Self {
        Self {
            requests,
            celebrities,
        }
    }

    /// The user's orders, newest first, each joined with its celebrity.
    ///
    /// Only the request listing can fail this call. Celebrity lookups degrade to
    /// the placeholder per order.
    #[instrument(skip(self))]
    pub async fn orders_for(&self, user_id: &str) -> Result<Vec<OrderView>, DataError> {
        let requests = self.requests.list_for_user(user_id).await?;

        let mut seen = HashSet::new();
        let ids: Vec<String> = requests
            .iter()
            .filter(|r| seen.insert(r.celebrity_id.as_str()))
            .map(|r| r.celebrity_id.clone())
            .collect();

        let resolved = self.resolve_celebrities(&ids).await;
        let orders: Vec<OrderView> = requests
            .into_iter()
            .map(|request| {
                let celebrity = resolved.get(&request.celebrity_id);
                OrderView::join(request, celebrity)
            })
            .collect();

        info!(
            orders = orders.len(),
            celebrities = ids.len(),
            resolved = resolved.len(),
            "Orders aggregated"
        );
        Ok(orders)
    }

    /// One batched lookup; if that call fails, each id is looked up on its own,
    /// concurrently, and only the ids whose lookup fails go unresolved.
    async fn resolve_celebrities(&self, ids: &[String]) -> HashMap<String, Celebrity> {
        match self.celebrities.find_many(ids).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "Batched celebrity lookup failed, resolving individually");
                let lookups = ids.iter().map(|id| async move {
                    let result = self.celebrities.find(id).await;
                    (id, result)
                });

                let mut found = HashMap::new();
                for (id, result) in join_all(lookups).await {
                    match result {
                        Ok(Some(celebrity)) => {
                            found.insert(id.clone(), celebrity);
                        }
                        Ok(None) => debug!(celebrity_id = %id, "Celebrity not found"),
                        Err(e) => {
                            error!(celebrity_id = %id, error = %e, "Error loading celebrity for request")
                        }
                    }
                }
                found
            }
        }
    }

    /// Dashboard content for an auth state. A failed listing shows as no orders.
    pub async fn view(&self, auth: &AuthState) -> DashboardView {
        if auth.is_loading {
            return DashboardView::Loading;
        }
        let Some(user) = &auth.user else {
            return DashboardView::SignInRequired;
        };

        let orders = match self.orders_for(&user.id).await {
            Ok(orders) => orders,
            Err(e) => {
                error!(error = %e, "Error loading requests");
                Vec::new()
            }
        };

        if orders.is_empty() {
            DashboardView::Empty
        } else {
            DashboardView::Orders(OrderBuckets::partition(orders))
        }
    }
}

/// The "My Orders" page: reloads whenever the signed-in user changes.
#[derive(Debug)]
pub struct DashboardPage {
    subscription: AuthSubscription,
    aggregator: OrderAggregator,
    view: DashboardView,
}

impl DashboardPage {
    pub fn mount(store: &AuthStore, aggregator: OrderAggregator) -> Self {
        Self {
            subscription: store.subscribe(),
            aggregator,
            view: DashboardView::Loading,
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Waits for the next auth notification and rebuilds the view from it.
    /// Returns `None` once the auth store is gone.
    pub async fn refresh(&mut self) -> Option<&DashboardView> {
        let auth = self.subscription.next().await?;
        self.view = self.aggregator.view(&auth).await;
        Some(&self.view)
    }
}
