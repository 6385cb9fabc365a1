//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use chrono::Utc;
use pressroom_core::{ContactStatus, Money, ReviewStatus};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    components::{Cell, Layout},
    error::AppError,
    filters,
    models::{ContactSubmission, FlashSale, Order, ProductReview, SalePhase},
    resources::{Resource, orders::status_badge},
    state::AppState,
};

const RECENT_ORDERS: usize = 5;

/// One headline number.
#[derive(Debug, Clone)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub href: String,
    pub icon: &'static str,
}

impl StatCard {
    fn new(label: &'static str, value: impl ToString, href: impl Into<String>, icon: &'static str) -> Self {
        Self {
            label,
            value: value.to_string(),
            href: href.into(),
            icon,
        }
    }
}

/// Recent order view for the dashboard.
#[derive(Debug, Clone)]
pub struct RecentOrderView {
    pub number: String,
    pub href: String,
    pub customer_name: String,
    pub total: String,
    pub status: Cell,
    pub placed: String,
}

impl From<&Order> for RecentOrderView {
    fn from(order: &Order) -> Self {
        Self {
            number: order.number.clone(),
            href: order.show_path(),
            customer_name: order.customer_name.clone(),
            total: order.total().to_string(),
            status: status_badge(order.status),
            placed: order.created_at.format("%b %-d, %Y %H:%M").to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub stats: Vec<StatCard>,
    pub recent_orders: Vec<RecentOrderView>,
    pub error: Option<String>,
}

/// Everything the dashboard summarizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub products: usize,
    pub orders: usize,
    pub users: usize,
    pub pending_reviews: usize,
    pub new_contacts: usize,
    pub running_sales: usize,
    pub revenue: Money,
}

impl DashboardSummary {
    #[must_use]
    pub fn compute(
        products: usize,
        users: usize,
        orders: &[Order],
        reviews: &[ProductReview],
        contacts: &[ContactSubmission],
        sales: &[FlashSale],
    ) -> Self {
        let now = Utc::now();
        Self {
            products,
            orders: orders.len(),
            users,
            pending_reviews: reviews
                .iter()
                .filter(|r| r.status == ReviewStatus::Pending)
                .count(),
            new_contacts: contacts
                .iter()
                .filter(|c| c.status == ContactStatus::New)
                .count(),
            running_sales: sales
                .iter()
                .filter(|s| s.phase(now) == SalePhase::Running)
                .count(),
            revenue: orders.iter().filter(|o| o.is_paid()).map(Order::total).sum(),
        }
    }

    fn cards(&self) -> Vec<StatCard> {
        vec![
            StatCard::new("Products", self.products, "/products", "ph-package"),
            StatCard::new("Orders", self.orders, "/orders", "ph-receipt"),
            StatCard::new("Revenue", self.revenue, "/orders?payment_status=paid", "ph-currency-dollar"),
            StatCard::new("Users", self.users, "/users", "ph-users"),
            StatCard::new("Pending reviews", self.pending_reviews, "/reviews?status=pending", "ph-star"),
            StatCard::new("New messages", self.new_contacts, "/contacts?status=new", "ph-envelope"),
            StatCard::new("Running sales", self.running_sales, "/flash-sales?phase=running", "ph-lightning"),
        ]
    }
}

/// The most recent orders, newest first.
fn recent_orders(mut orders: Vec<Order>) -> Vec<RecentOrderView> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders.iter().take(RECENT_ORDERS).map(RecentOrderView::from).collect()
}

/// Dashboard page handler.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, session: Session) -> DashboardTemplate {
    let store = state.store();
    let loaded = tokio::try_join!(
        store.products().count(),
        store.users().count(),
        store.orders().all(),
        store.reviews().all(),
        store.contacts().all(),
        store.flash_sales().all(),
    );

    let (stats, recent, error) = match loaded {
        Ok((products, users, orders, reviews, contacts, sales)) => {
            let summary =
                DashboardSummary::compute(products, users, &orders, &reviews, &contacts, &sales);
            (summary.cards(), recent_orders(orders), None)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load dashboard");
            let message = format!("Could not load the dashboard. {}", AppError::from(e).public_message());
            (Vec::new(), Vec::new(), Some(message))
        }
    };

    DashboardTemplate {
        layout: Layout::with_flashes(&session, "/", "Dashboard", None).await,
        stats,
        recent_orders: recent,
        error,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::store::Fixtures;

    #[test]
    fn test_summary_counts_seed_data() {
        let fixtures = Fixtures::builtin().unwrap();
        let summary = DashboardSummary::compute(
            fixtures.products.len(),
            fixtures.users.len(),
            &fixtures.orders,
            &fixtures.reviews,
            &fixtures.contacts,
            &fixtures.flash_sales,
        );

        assert_eq!(summary.orders, fixtures.orders.len());
        assert_eq!(summary.new_contacts, 3);
        let paid: Money = fixtures
            .orders
            .iter()
            .filter(|o| o.is_paid())
            .map(Order::total)
            .sum();
        assert_eq!(summary.revenue, paid);
        assert!(summary.pending_reviews <= fixtures.reviews.len());
    }

    #[test]
    fn test_recent_orders_newest_first_and_capped() {
        let orders = Fixtures::builtin().unwrap().orders;
        let newest = orders.iter().map(|o| o.created_at).max().unwrap();
        let recent = recent_orders(orders.clone());
        assert_eq!(recent.len(), orders.len().min(RECENT_ORDERS));
        let first = orders.iter().find(|o| o.number == recent[0].number).unwrap();
        assert_eq!(first.created_at, newest);
    }
}
