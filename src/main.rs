#[tokio::main]
async fn main() {
    if let Err(e) = ids_batch_client::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
