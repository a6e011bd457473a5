#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_api::start_server().await
}
