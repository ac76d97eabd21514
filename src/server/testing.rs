//! Test helpers shared by the controller and upstream tests

use actix_web::{web, App, HttpResponse, HttpServer};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use crate::server::database::memory::MemoryOrderStore;
use crate::server::menu::upstream::MenuClient;
use crate::server::model::config::UpstreamConfig;
use crate::server::state::AppState;

/// Serve `handler` for every path on an ephemeral local port, returns `http://addr`.
/// Must be called from within an actix system, e.g. `#[actix_web::test]`.
pub(crate) fn spawn_menu_api<F, Fut>(handler: F) -> String
where
    F: Fn() -> Fut + Clone + Send + 'static,
    Fut: Future<Output = HttpResponse> + 'static,
{
    let server = HttpServer::new(move || App::new().default_service(web::to(handler.clone())))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("failed to bind fake menu api");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

pub(crate) fn menu_client(url_template: &str, timeout: Duration) -> MenuClient {
    MenuClient::new(&UpstreamConfig {
        url_template: url_template.to_string(),
        timeout,
        accept_invalid_certs: false,
    })
    .expect("failed to build menu client")
}

/// State over an empty in-memory store
pub(crate) fn app_state(url_template: &str) -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Arc::new(MemoryOrderStore::default()),
        menu_client(url_template, Duration::from_secs(2)),
    ))
}
