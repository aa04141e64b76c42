use actix_web::{get, web, HttpResponse, Responder};
use blockmirror_api_schema::v1::error::V1ErrorResponse;

use crate::state::ApiState;

pub const ERROR_MESSAGE: &str = "Error fetching page blocks or downloading images";

#[get("/page/{id}/blocks")]
pub async fn v1_get_page_blocks(
    state: web::Data<ApiState>,
    path: web::Path<String>,
) -> impl Responder {
    let page_id = path.into_inner();

    match state.pipeline.get_enriched_blocks(&page_id).await {
        Ok(blocks) => HttpResponse::Ok().json(blocks),
        Err(err) => {
            log::error!("failed to enrich blocks of page {}: {}", page_id, err);
            HttpResponse::InternalServerError().json(V1ErrorResponse {
                code: err.code().to_string(),
                message: ERROR_MESSAGE.to_string(),
            })
        }
    }
}
