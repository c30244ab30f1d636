use crate::errors::AppError;
use crate::models::{DateKeyRequest, FieldValueRequest, FormField, StoreSnapshot, SubmitForm};
use crate::state::AppState;
use crate::store::EntryStore;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    Html(render_index(&store.snapshot()))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(payload): Form<SubmitForm>,
) -> Redirect {
    let mut store = state.store.lock().await;
    store.update_field(FormField::Date, payload.date);
    store.update_field(FormField::Distance, payload.distance);
    apply_submit(&mut store);
    Redirect::to("/")
}

pub async fn delete_row(
    State(state): State<AppState>,
    Form(payload): Form<DateKeyRequest>,
) -> Redirect {
    let mut store = state.store.lock().await;
    apply_remove(&mut store, &payload.date);
    Redirect::to("/")
}

pub async fn edit_row(
    State(state): State<AppState>,
    Form(payload): Form<DateKeyRequest>,
) -> Redirect {
    let mut store = state.store.lock().await;
    apply_edit(&mut store, &payload.date);
    Redirect::to("/")
}

pub async fn get_entries(State(state): State<AppState>) -> Json<StoreSnapshot> {
    let store = state.store.lock().await;
    Json(store.snapshot())
}

pub async fn update_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Json(payload): Json<FieldValueRequest>,
) -> Result<Json<StoreSnapshot>, AppError> {
    let field = field
        .parse::<FormField>()
        .map_err(|_| AppError::bad_request("field must be 'date' or 'distance'"))?;

    let mut store = state.store.lock().await;
    store.update_field(field, payload.value);
    Ok(Json(store.snapshot()))
}

pub async fn submit(State(state): State<AppState>) -> Json<StoreSnapshot> {
    let mut store = state.store.lock().await;
    apply_submit(&mut store);
    Json(store.snapshot())
}

pub async fn remove(
    State(state): State<AppState>,
    Json(payload): Json<DateKeyRequest>,
) -> Json<StoreSnapshot> {
    let mut store = state.store.lock().await;
    apply_remove(&mut store, &payload.date);
    Json(store.snapshot())
}

pub async fn edit(
    State(state): State<AppState>,
    Json(payload): Json<DateKeyRequest>,
) -> Json<StoreSnapshot> {
    let mut store = state.store.lock().await;
    apply_edit(&mut store, &payload.date);
    Json(store.snapshot())
}

fn apply_submit(store: &mut EntryStore) {
    if store.submit() {
        debug!(entries = store.entries().len(), "entry recorded");
    } else {
        debug!("submission ignored");
    }
}

fn apply_remove(store: &mut EntryStore, date: &str) {
    store.remove(date);
    debug!(date, "date removed");
}

fn apply_edit(store: &mut EntryStore, date: &str) {
    if let Some(row) = store.find(date) {
        store.edit(&row);
        debug!(date, distance = row.distance, "row loaded into form");
    }
}
