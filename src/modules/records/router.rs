use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    create_record, delete_record, list_facet_options, list_records, update_record,
};
use crate::state::AppState;

pub fn init_records_router() -> Router<AppState> {
    Router::new()
        .route("/{entity}", get(list_records).post(create_record))
        .route("/{entity}/facets/{field}", get(list_facet_options))
        .route("/{entity}/{id}", put(update_record).delete(delete_record))
}
