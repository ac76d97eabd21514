use actix_web::web;
use crate::server::controller::error::CustomError;
use crate::server::controller::menu::get_menu;
use crate::server::controller::order::{create_order, get_order};

/// Register every endpoint, malformed json bodies answer 400 with a `detail`
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| CustomError::BadRequest(err.to_string()).into()),
    )
    .service(create_order)
    .service(get_order)
    .service(get_menu);
}
