// Lambda bootstrap entry point for the digest agent

use lambda_runtime::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    fraud_digest::setup_logging();
    run(service_fn(fraud_digest::worker::handler)).await
}
