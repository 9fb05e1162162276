#[tokio::main]
async fn main() {
    openhouse_server::start_server().await;
}
