//! Generic list, detail and form handlers shared by every resource.
//!
//! Every handler follows the same failure pattern: a failed list load renders
//! the page with an error banner, a failed mutation flashes an error and
//! redirects, and a validation failure re-renders the form with HTTP 422.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    components::{
        BulkAction, Cell, ColumnView, DataTableConfig, DetailRow, DetailSection, FilterView,
        Flash, FormField, Layout, OptionView, attach_errors, flash,
    },
    config::ALLOWED_PAGE_SIZES,
    error::AppError,
    filters,
    models::Product,
    query::{ListQuery, Page},
    resources::Resource,
    state::AppState,
    store::{ReferenceData, StoreError},
    validation::{FormData, ValidationErrors},
};

/// Register the HTML and JSON routes of a resource.
pub fn resource_routes<R: Resource>() -> Router<AppState> {
    let base = R::index_path();
    Router::new()
        .route(&base, get(index::<R>).post(create::<R>))
        .route(&format!("{base}/new"), get(new_form::<R>))
        .route(&format!("{base}/bulk"), post(bulk::<R>))
        .route(&format!("{base}/{{id}}"), get(show::<R>).post(update::<R>))
        .route(&format!("{base}/{{id}}/edit"), get(edit_form::<R>))
        .route(&format!("{base}/{{id}}/delete"), post(delete::<R>))
        .route(&format!("/api{base}"), get(api_index::<R>))
        .route(&format!("/api{base}/{{id}}"), get(api_show::<R>))
}

// =============================================================================
// Templates
// =============================================================================

/// One table row: the record id and its visible cells.
#[derive(Debug, Clone)]
pub struct RowView {
    pub id: i32,
    pub cells: Vec<Cell>,
}

/// Pagination footer.
#[derive(Debug, Clone)]
pub struct Pager {
    pub total: usize,
    pub first: usize,
    pub last: usize,
    pub page: usize,
    pub total_pages: usize,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

/// List page.
#[derive(Template, WebTemplate)]
#[template(path = "resource/index.html")]
pub struct IndexTemplate {
    pub layout: Layout,
    pub slug: &'static str,
    /// DOM id of the table.
    pub table_id: String,
    pub singular: &'static str,
    pub creatable: bool,
    pub columns: Vec<ColumnView>,
    pub filters: Vec<FilterView>,
    pub rows: Vec<RowView>,
    pub bulk_actions: Vec<BulkAction>,
    pub search: String,
    pub search_placeholder: String,
    pub sort: String,
    pub dir: &'static str,
    pub per_page_options: Vec<OptionView>,
    pub filtered: bool,
    pub empty_icon: String,
    pub empty_title: String,
    pub empty_description: Option<String>,
    pub pager: Pager,
    pub error: Option<String>,
    /// Current list URL, posted with bulk actions to come back to.
    pub return_to: String,
}

/// Detail page.
#[derive(Template, WebTemplate)]
#[template(path = "resource/show.html")]
pub struct ShowTemplate {
    pub layout: Layout,
    pub singular: &'static str,
    pub edit_href: String,
    pub delete_action: String,
    pub back_href: String,
    pub rows: Vec<DetailRow>,
    pub sections: Vec<DetailSection>,
}

/// Create and edit form.
#[derive(Template, WebTemplate)]
#[template(path = "resource/form.html")]
pub struct FormTemplate {
    pub layout: Layout,
    pub action: String,
    pub submit_label: &'static str,
    pub cancel_href: String,
    pub fields: Vec<FormField>,
    pub error_count: usize,
}

/// Full-page error for detail and form routes.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub layout: Layout,
    pub status: u16,
    pub message: String,
    pub back_href: String,
}

// =============================================================================
// Helpers
// =============================================================================

fn new_path<R: Resource>() -> String {
    format!("{}/new", R::index_path())
}

fn record_path<R: Resource>(id: i32) -> String {
    format!("{}/{id}", R::index_path())
}

fn edit_path<R: Resource>(id: i32) -> String {
    format!("{}/{id}/edit", R::index_path())
}

/// "product" / "3 products"
fn count_noun<R: Resource>(count: usize) -> String {
    if count == 1 {
        format!("1 {}", R::SINGULAR.to_lowercase())
    } else {
        format!("{count} {}", R::PLURAL.to_lowercase())
    }
}

async fn load_refs<R: Resource>(state: &AppState) -> Result<ReferenceData, StoreError> {
    if R::NEEDS_REFERENCES {
        state.store().reference_data().await
    } else {
        Ok(ReferenceData::default())
    }
}

async fn load_products<R: Resource>(state: &AppState) -> Result<Vec<Product>, StoreError> {
    if R::NEEDS_PRODUCTS {
        state.store().products().all().await
    } else {
        Ok(Vec::new())
    }
}

/// Render a full-page error, reporting server-side failures.
async fn error_page<R: Resource>(session: &Session, path: &str, error: AppError) -> Response {
    let status = error.status();
    if status.is_server_error() {
        let event_id = sentry::capture_error(&error);
        tracing::error!(
            error = %error,
            sentry_event_id = %event_id,
            resource = R::SLUG,
            "Failed to load page"
        );
    }

    let title = status.canonical_reason().unwrap_or("Error");
    let template = ErrorTemplate {
        layout: Layout::with_flashes(session, path, title, None).await,
        status: status.as_u16(),
        message: error.public_message(),
        back_href: R::index_path(),
    };
    (status, template).into_response()
}

/// Flash a failed mutation and redirect.
async fn mutation_failed(session: &Session, action: &str, error: &StoreError, to: &str) -> Response {
    tracing::error!(error = %error, action, "Mutation failed");
    let message = match error {
        StoreError::Unavailable(_) => format!("Could not {action}: the data service is unavailable"),
        _ => format!("Could not {action}: {error}"),
    };
    flash::push(session, Flash::error(message)).await;
    Redirect::to(to).into_response()
}

fn form_template<R: Resource>(
    layout: Layout,
    action: String,
    cancel_href: String,
    values: &FormData,
    refs: &ReferenceData,
    errors: Option<&ValidationErrors>,
) -> FormTemplate {
    let mut fields = R::form_fields(values, refs);
    if let Some(errors) = errors {
        attach_errors(&mut fields, errors);
    }
    FormTemplate {
        layout,
        submit_label: if action == R::index_path() { "Create" } else { "Save changes" },
        action,
        cancel_href,
        fields,
        error_count: errors.map_or(0, ValidationErrors::len),
    }
}

fn index_template<R: Resource>(
    layout: Layout,
    config: &DataTableConfig,
    query: &ListQuery,
    page: Page<R>,
    error: Option<String>,
) -> IndexTemplate {
    let visible = config.visible_indices();
    let pager = Pager {
        total: page.total,
        first: page.first_item(),
        last: page.last_item(),
        page: page.page,
        total_pages: page.total_pages,
        prev_href: page.has_prev().then(|| query.page_href(page.page - 1)),
        next_href: page.has_next().then(|| query.page_href(page.page + 1)),
    };
    let rows = page
        .items
        .iter()
        .map(|record| {
            let cells = record.cells();
            RowView {
                id: record.id(),
                cells: visible.iter().filter_map(|i| cells.get(*i).cloned()).collect(),
            }
        })
        .collect();

    IndexTemplate {
        layout,
        slug: R::SLUG,
        table_id: config.table_id.clone(),
        singular: R::SINGULAR,
        creatable: R::CREATABLE,
        columns: config.column_views(query),
        filters: config.filter_views(query),
        rows,
        bulk_actions: config.bulk_actions.clone(),
        search: query.q.clone(),
        search_placeholder: config.search_placeholder.clone(),
        sort: query.sort.clone().unwrap_or_default(),
        dir: query.dir.as_str(),
        per_page_options: ALLOWED_PAGE_SIZES
            .iter()
            .map(|size| OptionView {
                value: size.to_string(),
                label: format!("{size} per page"),
                selected: *size == query.per_page,
            })
            .collect(),
        filtered: query.is_filtered(),
        empty_icon: config.empty_icon.clone(),
        empty_title: config.empty_title.clone(),
        empty_description: config.empty_description.clone(),
        return_to: format!("{}{}", R::index_path(), query.page_href(page.page)),
        pager,
        error,
    }
}

/// Accept `return_to` only when it points back into this resource's list.
fn safe_return_to<R: Resource>(return_to: &str) -> String {
    let base = R::index_path();
    let stays_on_list = return_to
        .strip_prefix(&base)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('?'));
    if stays_on_list {
        return_to.to_string()
    } else {
        base
    }
}

/// Ids posted as repeated `ids` fields and/or comma-separated lists.
fn parse_ids(form: &FormData) -> Option<Vec<i32>> {
    form.all("ids")
        .iter()
        .flat_map(|raw| raw.split(','))
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| raw.parse::<i32>().ok())
        .collect()
}

// =============================================================================
// HTML handlers
// =============================================================================

#[instrument(skip_all, fields(resource = R::SLUG))]
async fn index<R: Resource>(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let query = ListQuery::from_pairs(&params, state.config().page_size);
    let config = R::table_config();
    let layout = Layout::with_flashes(&session, &R::index_path(), R::PLURAL, None).await;

    let (page, error) = match R::table(state.store()).all().await {
        Ok(rows) => (query.apply(rows), None),
        Err(e) => {
            tracing::error!(error = %e, resource = R::SLUG, "Failed to load list");
            (
                Page::paginate(Vec::new(), 1, query.per_page),
                Some(format!(
                    "Could not load {}. {}",
                    R::PLURAL.to_lowercase(),
                    AppError::from(e).public_message()
                )),
            )
        }
    };

    index_template::<R>(layout, &config, &query, page, error).into_response()
}

#[instrument(skip_all, fields(resource = R::SLUG, id))]
async fn show<R: Resource>(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Response {
    let loaded = tokio::try_join!(R::table(state.store()).get(id), load_products::<R>(&state));
    let (record, products) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => return error_page::<R>(&session, &record_path::<R>(id), e.into()).await,
    };

    let mut sections = record.detail_sections();
    sections.extend(record.product_sections(&products));
    let label = record.label();
    let template = ShowTemplate {
        layout: Layout::with_flashes(&session, &record.show_path(), label.clone(), Some(&label))
            .await,
        singular: R::SINGULAR,
        edit_href: edit_path::<R>(id),
        delete_action: format!("{}/delete", record.show_path()),
        back_href: R::index_path(),
        rows: record.detail_rows(),
        sections,
    };
    template.into_response()
}

#[instrument(skip_all, fields(resource = R::SLUG))]
async fn new_form<R: Resource>(State(state): State<AppState>, session: Session) -> Response {
    let path = new_path::<R>();
    if !R::CREATABLE {
        let error = AppError::NotFound(format!("{} cannot be created here", R::PLURAL));
        return error_page::<R>(&session, &path, error).await;
    }

    let refs = match load_refs::<R>(&state).await {
        Ok(refs) => refs,
        Err(e) => return error_page::<R>(&session, &path, e.into()).await,
    };

    let layout =
        Layout::with_flashes(&session, &path, format!("New {}", R::SINGULAR.to_lowercase()), None)
            .await;
    form_template::<R>(layout, R::index_path(), R::index_path(), &R::blank_form(), &refs, None)
        .into_response()
}

#[instrument(skip_all, fields(resource = R::SLUG))]
async fn create<R: Resource>(
    State(state): State<AppState>,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let path = new_path::<R>();
    if !R::CREATABLE {
        let error = AppError::NotFound(format!("{} cannot be created here", R::PLURAL));
        return error_page::<R>(&session, &path, error).await;
    }

    let form = FormData::from(pairs);
    let action = format!("create {}", R::SINGULAR.to_lowercase());
    let refs = match load_refs::<R>(&state).await {
        Ok(refs) => refs,
        Err(e) => return mutation_failed(&session, &action, &e, &path).await,
    };

    let record = match R::from_form(&form, None, &refs) {
        Ok(record) => record,
        Err(errors) => {
            tracing::info!(errors = errors.len(), "Form validation failed");
            let layout = Layout::with_flashes(
                &session,
                &path,
                format!("New {}", R::SINGULAR.to_lowercase()),
                None,
            )
            .await;
            let template =
                form_template::<R>(layout, R::index_path(), R::index_path(), &form, &refs, Some(&errors));
            return (StatusCode::UNPROCESSABLE_ENTITY, template).into_response();
        }
    };

    match R::table(state.store()).insert(record).await {
        Ok(created) => {
            flash::push(&session, Flash::success(format!("{} created", R::SINGULAR))).await;
            Redirect::to(&created.show_path()).into_response()
        }
        Err(e) => mutation_failed(&session, &action, &e, &path).await,
    }
}

#[instrument(skip_all, fields(resource = R::SLUG, id))]
async fn edit_form<R: Resource>(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Response {
    let path = edit_path::<R>(id);
    let loaded = tokio::try_join!(R::table(state.store()).get(id), load_refs::<R>(&state));
    let (record, refs) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => return error_page::<R>(&session, &path, e.into()).await,
    };

    let label = record.label();
    let layout =
        Layout::with_flashes(&session, &path, format!("Edit {label}"), Some(&label)).await;
    form_template::<R>(layout, record.show_path(), record.show_path(), &record.to_form(), &refs, None)
        .into_response()
}

#[instrument(skip_all, fields(resource = R::SLUG, id))]
async fn update<R: Resource>(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let path = edit_path::<R>(id);
    let action = format!("update {}", R::SINGULAR.to_lowercase());
    let table = R::table(state.store());

    let loaded = tokio::try_join!(table.get(id), load_refs::<R>(&state));
    let (existing, refs) = match loaded {
        Ok(loaded) => loaded,
        Err(e @ StoreError::NotFound { .. }) => {
            return error_page::<R>(&session, &path, e.into()).await;
        }
        Err(e) => return mutation_failed(&session, &action, &e, &path).await,
    };

    let form = FormData::from(pairs);
    let record = match R::from_form(&form, Some(&existing), &refs) {
        Ok(record) => record,
        Err(errors) => {
            tracing::info!(errors = errors.len(), "Form validation failed");
            let label = existing.label();
            let layout =
                Layout::with_flashes(&session, &path, format!("Edit {label}"), Some(&label)).await;
            let template = form_template::<R>(
                layout,
                existing.show_path(),
                existing.show_path(),
                &form,
                &refs,
                Some(&errors),
            );
            return (StatusCode::UNPROCESSABLE_ENTITY, template).into_response();
        }
    };

    match table.replace(id, record).await {
        Ok(updated) => {
            flash::push(&session, Flash::success(format!("{} updated", R::SINGULAR))).await;
            Redirect::to(&updated.show_path()).into_response()
        }
        Err(e) => mutation_failed(&session, &action, &e, &path).await,
    }
}

#[instrument(skip_all, fields(resource = R::SLUG, id))]
async fn delete<R: Resource>(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Response {
    let action = format!("delete {}", R::SINGULAR.to_lowercase());
    match R::table(state.store()).delete(id).await {
        Ok(_) => {
            flash::push(&session, Flash::success(format!("{} deleted", R::SINGULAR))).await;
            Redirect::to(&R::index_path()).into_response()
        }
        Err(e @ StoreError::NotFound { .. }) => {
            mutation_failed(&session, &action, &e, &R::index_path()).await
        }
        Err(e) => mutation_failed(&session, &action, &e, &record_path::<R>(id)).await,
    }
}

#[instrument(skip_all, fields(resource = R::SLUG))]
async fn bulk<R: Resource>(
    State(state): State<AppState>,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = FormData::from(pairs);
    let back = safe_return_to::<R>(form.get("return_to"));
    let action = form.get("action");

    let known = R::table_config().find_bulk_action(action).is_some();
    let update = R::bulk_update(action);
    if !known || (action != "delete" && update.is_none()) {
        tracing::warn!(action, "Unknown bulk action");
        flash::push(&session, Flash::error(format!("Unknown bulk action '{action}'"))).await;
        return Redirect::to(&back).into_response();
    }

    let ids = match parse_ids(&form) {
        Some(ids) if !ids.is_empty() => ids,
        Some(_) => {
            let message = format!("Select at least one {}", R::SINGULAR.to_lowercase());
            flash::push(&session, Flash::error(message)).await;
            return Redirect::to(&back).into_response();
        }
        None => {
            flash::push(&session, Flash::error("Invalid selection")).await;
            return Redirect::to(&back).into_response();
        }
    };

    let table = R::table(state.store());
    let result = match update {
        Some(f) => table.update_many(&ids, f).await.map(|n| (n, "updated")),
        None => table.delete_many(&ids).await.map(|n| (n, "deleted")),
    };

    match result {
        Ok((count, verb)) => {
            tracing::info!(action, requested = ids.len(), count, "Bulk action applied");
            let message = format!("{} {verb}", count_noun::<R>(count));
            flash::push(&session, Flash::success(message)).await;
            Redirect::to(&back).into_response()
        }
        Err(e) => {
            let what = format!("{action} {}", R::PLURAL.to_lowercase());
            mutation_failed(&session, &what, &e, &back).await
        }
    }
}

// =============================================================================
// JSON handlers
// =============================================================================

#[instrument(skip_all, fields(resource = R::SLUG))]
async fn api_index<R: Resource>(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Page<R>>, AppError> {
    let query = ListQuery::from_pairs(&params, state.config().page_size);
    let rows = R::table(state.store()).all().await?;
    Ok(Json(query.apply(rows)))
}

#[instrument(skip_all, fields(resource = R::SLUG, id))]
async fn api_show<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<R>, AppError> {
    Ok(Json(R::table(state.store()).get(id).await?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Product;

    #[test]
    fn test_return_to_stays_on_list() {
        assert_eq!(safe_return_to::<Product>("/products?page=2"), "/products?page=2");
        assert_eq!(safe_return_to::<Product>("/products"), "/products");
        assert_eq!(safe_return_to::<Product>("https://evil.example"), "/products");
        assert_eq!(safe_return_to::<Product>("/products-archive"), "/products");
        assert_eq!(safe_return_to::<Product>("/orders"), "/products");
    }

    #[test]
    fn test_parse_ids_accepts_repeated_and_comma_separated() {
        let form = FormData::new().with("ids", "1, 2").with_all("ids", ["5"]);
        assert_eq!(parse_ids(&form), Some(vec![1, 2, 5]));
        assert_eq!(parse_ids(&FormData::new()), Some(Vec::new()));
        assert_eq!(parse_ids(&FormData::new().with("ids", "1,x")), None);
    }

    #[test]
    fn test_count_noun() {
        assert_eq!(count_noun::<Product>(1), "1 product");
        assert_eq!(count_noun::<Product>(3), "3 products");
    }
}
