//! main file for the server

mod controller;
mod database;
mod menu;
pub mod model;
mod routes;
mod state;
#[cfg(test)]
mod testing;
mod util;

use std::sync::Arc;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{Context, Error};
use log::info;
use crate::server::database::memory::MemoryOrderStore;
use crate::server::database::postgres::PgOrderStore;
use crate::server::database::store::OrderStore;
use crate::server::menu::upstream::MenuClient;
use crate::server::model::config::{ServerConfig, StoreKind};
use crate::server::state::AppState;

/// Run the server until it is stopped, then release the order store
pub async fn run(ServerConfig { addr, store, upstream }: ServerConfig) -> Result<(), Error> {
    let order_store: Arc<dyn OrderStore> = match store.kind {
        StoreKind::Postgres => Arc::new(
            PgOrderStore::connect(&store)
                .await
                .context("failed to initialize the order store")?,
        ),
        StoreKind::Memory => {
            info!("using the in-memory order store, orders are lost on restart");
            Arc::new(MemoryOrderStore::default())
        }
    };
    let menu_client = MenuClient::new(&upstream).context("failed to build the menu api client")?;
    let data = web::Data::new(AppState::new(order_store.clone(), menu_client));

    info!("listening on {}", addr);
    let served = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(routes::configure)
    })
        .bind(addr)?
        .run()
        .await;

    info!("server stopped, closing the order store");
    order_store.close().await;
    served.context("server exited with an error")
}
