#[tokio::main]
async fn main() {
    batch_cases::start(std::env::args()).await;
}
