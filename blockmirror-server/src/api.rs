use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};

use crate::state::ApiState;

use self::v1::page_blocks::v1_get_page_blocks;

pub mod v1;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(v1_get_page_blocks);
}

/// Binds the server without starting it. Returns the bound port, which
/// differs from the requested one when port 0 is asked for.
pub fn build_server(state: ApiState, addr: (&str, u16)) -> std::io::Result<(Server, u16)> {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .configure(configure)
    })
    .bind(addr)?;
    let port = server
        .addrs()
        .first()
        .map(|addr| addr.port())
        .unwrap_or(addr.1);
    Ok((server.run(), port))
}

pub async fn run_server(state: ApiState, addr: (&str, u16)) -> std::io::Result<()> {
    let (server, _port) = build_server(state, addr)?;
    server.await
}
