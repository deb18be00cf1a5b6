use clap::Parser;

use pyramid_server::server::create_router;

/// Reference API server for the Formula Pyramid puzzle.
#[derive(Parser)]
#[command(name = "pyramid-server", version)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 3001)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    println!("Starting Formula Pyramid API server...");

    let app = create_router();
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .unwrap();
    println!(
        "Server is running on port {}. Press Ctrl+C to stop.",
        args.port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("\nStopping server...");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
}
