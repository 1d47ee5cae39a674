#[tokio::main]
async fn main() {
    if let Err(e) = carlot::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
