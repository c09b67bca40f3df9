mod post;

use std::sync::Arc;

use dorm_move_client::{ClientConfig, Context, RegisterDescriptor, User};

use crate::{db::Db, Store};

/// Serves a fresh in-memory store on an ephemeral port and returns a
/// client connected to it.
fn serve() -> (Context, Arc<Store>) {
    let store = Arc::new(Store::new(Db::default()));

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(crate::router(store.clone()).into_make_service());
    tokio::spawn(server);

    let cx = Context::new(&ClientConfig::new(format!("http://{addr}"))).unwrap();
    (cx, store)
}

fn registration(name: &str, email: &str, password: &str) -> RegisterDescriptor {
    RegisterDescriptor {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        phone: "010-1234-5678".to_string(),
        gender: "female".to_string(),
        dormitory: "Hanul Hall".to_string(),
        student_id: "20230001".to_string(),
    }
}

async fn register(cx: &Context, name: &str, email: &str) -> User {
    cx.register(&registration(name, email, "password123"))
        .await
        .unwrap()
}
