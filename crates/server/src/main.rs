#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dbsage_server::start().await
}
