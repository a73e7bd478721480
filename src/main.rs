#[tokio::main]
async fn main() {
    if let Err(err) = clockodo_mcp::mcp::server::run_stdio().await {
        match err.hint.as_deref() {
            Some(hint) => eprintln!("clockodo-mcp: {}\n{}", err, hint),
            None => eprintln!("clockodo-mcp: {}", err),
        }
        std::process::exit(1);
    }
}
