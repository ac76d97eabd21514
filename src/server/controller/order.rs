use actix_web::{get, post, web, HttpResponse, Responder};
use log::{error, info, warn};
use crate::server::controller::error::CustomError;
use crate::server::database::store::StoreError;
use crate::server::model::order::{CreateOrderRequest, CreateOrderResponse, GetOrderResponse, NewOrder};
use crate::server::state::AppState;

#[post("/create_order/")]
/// Place an order, the total is computed here and never taken from the client
async fn create_order(
    req: web::Json<CreateOrderRequest>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let order = NewOrder::new(req.into_inner().foods).map_err(|e| {
        warn!("create_order rejected, {}", e);
        CustomError::BadRequest(e.to_string())
    })?;
    match data.store().insert(&order).await {
        Ok(order_id) => {
            info!("order created, order_id={}, total_price={}", order_id, order.total_price());
            Ok(HttpResponse::Created().json(CreateOrderResponse::new(order_id, order)))
        }
        Err(e) => {
            error!("create_order failed, {}", e);
            Err(e.into())
        }
    }
}

#[get("/get_order/{order_id}")]
async fn get_order(
    order_id: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<web::Json<GetOrderResponse>, CustomError> {
    match data.store().find_by_id(&order_id).await {
        Ok(Some(order)) => Ok(web::Json(order.into())),
        Ok(None) => {
            warn!("order not found, order_id={}", order_id);
            Err(CustomError::NotFound)
        }
        Err(e @ StoreError::InvalidId(_)) => {
            warn!("get_order failed, {}", e);
            Err(e.into())
        }
        Err(e) => {
            error!("get_order failed, {}", e);
            Err(e.into())
        }
    }
}
