#[tokio::main]
async fn main() {
    let code = raffle_admin::app::startup::startup().await;
    // Exit directly: a pending blocking stdin read would otherwise hold up runtime shutdown
    std::process::exit(code);
}
