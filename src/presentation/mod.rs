//! Presentation - server-rendered HTML for the dashboard.
//!
//! Pages read the document on every request, exactly like the JSON API.
//! Form posts redirect back to the record browser with the outcome encoded in
//! the query string.

mod browser;
mod html;
mod pages;

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::analytics::{descriptive, predictive, prescriptive, Dataset};
use crate::collection::{Collection, Record};
use crate::repository::{CollectionRepository, RepositoryError};
use crate::store::DocumentStore;

pub use browser::{form_fields, record_from_form, Flash, FormError};

type Repo<S> = State<Arc<CollectionRepository<S>>>;

pub fn router<S: DocumentStore + 'static>(repo: Arc<CollectionRepository<S>>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analytics/descriptive", get(descriptive_page::<S>))
        .route("/analytics/predictive", get(predictive_page::<S>))
        .route("/analytics/prescriptive", get(prescriptive_page::<S>))
        .route("/database", get(database_page::<S>))
        .route("/database/:collection", post(create_from_form::<S>))
        .route("/database/:collection/:id/delete", post(delete_from_form::<S>))
        .with_state(repo)
}

fn failure(err: impl std::fmt::Display) -> Response {
    tracing::error!(error = %err, "page render failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(html::page("Error", "Unable to load database", "")),
    )
        .into_response()
}

fn load<S: DocumentStore>(repo: &CollectionRepository<S>) -> Result<Dataset, Response> {
    repo.snapshot()
        .map(|snapshot| Dataset::from_snapshot(&snapshot))
        .map_err(failure)
}

async fn index() -> Html<String> {
    Html(pages::index())
}

async fn descriptive_page<S: DocumentStore + 'static>(State(repo): Repo<S>) -> Response {
    match load(&repo) {
        Ok(data) => Html(pages::descriptive(&descriptive::report(&data))).into_response(),
        Err(response) => response,
    }
}

async fn predictive_page<S: DocumentStore + 'static>(State(repo): Repo<S>) -> Response {
    let today = chrono::Local::now().date_naive();
    match load(&repo) {
        Ok(data) => Html(pages::predictive(&predictive::report(&data, today))).into_response(),
        Err(response) => response,
    }
}

async fn prescriptive_page<S: DocumentStore + 'static>(State(repo): Repo<S>) -> Response {
    match load(&repo) {
        Ok(data) => Html(pages::prescriptive(&prescriptive::report(&data))).into_response(),
        Err(response) => response,
    }
}

#[derive(Debug, Default, Deserialize)]
struct BrowserQuery {
    collection: Option<String>,
    created: Option<i64>,
    deleted: Option<i64>,
    error: Option<String>,
}

impl BrowserQuery {
    fn flash(&self) -> Option<Flash> {
        if let Some(id) = self.created {
            Some(Flash::Created(id))
        } else if let Some(id) = self.deleted {
            Some(Flash::Deleted(id))
        } else {
            self.error.as_deref().map(|code| Flash::Failed(error_message(code)))
        }
    }
}

/// Failure codes carried in the redirect query, and their messages.
fn error_message(code: &str) -> String {
    match code {
        "capacity" => format!(
            "Cannot add more than {} records to this table. Delete a record first.",
            crate::repository::MAX_RECORDS_PER_COLLECTION
        ),
        "invalid" => "Some fields could not be read; numeric fields need numbers.".to_string(),
        "empty" => FormError::Empty.to_string(),
        "no-sample" => {
            "No sample data available for this table, please add a record via JSON.".to_string()
        }
        "not-found" => "That record no longer exists.".to_string(),
        _ => "The request could not be completed.".to_string(),
    }
}

async fn database_page<S: DocumentStore + 'static>(
    State(repo): Repo<S>,
    Query(query): Query<BrowserQuery>,
) -> Response {
    let active = query
        .collection
        .as_deref()
        .and_then(|name| name.parse::<Collection>().ok())
        .unwrap_or(Collection::Products);

    let records = match repo.list(active) {
        Ok(records) => records,
        Err(err) => return failure(err),
    };
    let seed: Option<&Record> = records.first();
    let flash = query.flash();
    Html(browser::render(active, &records, seed, flash.as_ref())).into_response()
}

fn back_to(collection: Collection, outcome: &str) -> Redirect {
    Redirect::to(&format!(
        "/database?collection={}&{}",
        collection.name(),
        outcome
    ))
}

async fn create_from_form<S: DocumentStore + 'static>(
    State(repo): Repo<S>,
    Path(collection): Path<String>,
    Form(submitted): Form<Vec<(String, String)>>,
) -> Response {
    let Ok(collection) = collection.parse::<Collection>() else {
        return Redirect::to("/database").into_response();
    };

    let seed = match repo.list(collection) {
        Ok(records) => records.into_iter().next(),
        Err(err) => return failure(err),
    };
    let Some(seed) = seed else {
        return back_to(collection, "error=no-sample").into_response();
    };

    let payload = match record_from_form(&seed, &submitted) {
        Ok(payload) => payload,
        Err(reason) => {
            tracing::debug!(%collection, %reason, "form rejected");
            let code = match reason {
                FormError::Empty => "error=empty",
                FormError::NotANumber(_) => "error=invalid",
            };
            return back_to(collection, code).into_response();
        }
    };

    match repo.insert(collection, payload) {
        Ok(record) => {
            let id = crate::collection::record_id(&record).unwrap_or(0);
            back_to(collection, &format!("created={}", id)).into_response()
        }
        Err(RepositoryError::CapacityExceeded { .. }) => {
            back_to(collection, "error=capacity").into_response()
        }
        Err(err) => failure(err),
    }
}

async fn delete_from_form<S: DocumentStore + 'static>(
    State(repo): Repo<S>,
    Path((collection, id)): Path<(String, i64)>,
) -> Response {
    let Ok(collection) = collection.parse::<Collection>() else {
        return Redirect::to("/database").into_response();
    };
    match repo.delete(collection, id) {
        Ok(_) => back_to(collection, &format!("deleted={}", id)).into_response(),
        Err(RepositoryError::NotFound { .. }) => {
            back_to(collection, "error=not-found").into_response()
        }
        Err(err) => failure(err),
    }
}
