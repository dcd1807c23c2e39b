use std::path::PathBuf;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};

/// Starts a throwaway upstream on an ephemeral port that answers every
/// request with `status` and `body`. Must be called inside an actix runtime.
pub fn spawn_stub(status: StatusCode, body: &'static str) -> String {
    let server = HttpServer::new(move || {
        App::new().default_service(web::to(move || async move {
            HttpResponse::build(status).body(body)
        }))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind stub server");

    let url = format!("http://{}", server.addrs()[0]);
    actix_web::rt::spawn(server.run());
    url
}

/// Writes a truncated feed document to a per-test file under the temp dir.
pub fn write_corrupt_sample(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "subway-status-{}-{}.xml",
        name,
        std::process::id()
    ));
    std::fs::write(&path, "<service><subway><line><name>A,C,E</name>")
        .expect("Failed to write corrupt sample");
    path
}
