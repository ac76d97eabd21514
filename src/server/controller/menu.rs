use actix_web::{post, web};
use log::error;
use crate::server::controller::error::CustomError;
use crate::server::menu::extractor::{self, MenuExtract};
use crate::server::model::restaurant::{RestaurantMenuResponse, RestaurantQuery};
use crate::server::state::AppState;

#[post("/restaurant-menu/")]
/// Fetch a restaurant's menu upstream and return its flattened sections, info and offers
async fn get_menu(
    query: web::Json<RestaurantQuery>,
    data: web::Data<AppState>,
) -> Result<web::Json<RestaurantMenuResponse>, CustomError> {
    let doc = data.menu_client().fetch(&query).await.map_err(|e| {
        error!("get_menu failed, restaurant_id={}, {}", query.restaurant_id, e);
        CustomError::from(e)
    })?;
    let MenuExtract {
        restaurant_info,
        offers,
        menu_sections,
    } = extractor::extract(&doc);

    Ok(web::Json(RestaurantMenuResponse {
        restaurant_menu: menu_sections,
        restaurant_info,
        offers,
    }))
}
