use forge_migrate::forge_migrate_main;
use std::process::exit;

#[tokio::main]
async fn main() {
    println!(concat!(
        env!("CARGO_PKG_NAME"),
        " ",
        env!("CARGO_PKG_VERSION")
    ));
    match forge_migrate_main().await {
        Ok(report) => {
            // Per-repo failures keep exit 0 unless nothing succeeded at all.
            if report.total() > 0 && report.succeeded() == 0 {
                exit(1);
            }
            exit(0);
        }
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    };
}
