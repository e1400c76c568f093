// Lambda bootstrap entry point for the Slack notification actions

use lambda_runtime::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    slack_notify::setup_logging();

    run(service_fn(slack_notify::handler)).await
}
