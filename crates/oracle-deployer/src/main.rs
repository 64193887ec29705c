use {clap::Parser, std::process::ExitCode};

#[tokio::main]
async fn main() -> ExitCode {
    let args = oracle_deployer::arguments::Arguments::parse();
    observe::tracing::initialize(&args.logging.observe_config());
    tracing::info!("running oracle deployer with validated arguments:\n{}", args);

    match oracle_deployer::run(args).await {
        Ok(report) => {
            tracing::info!(
                root = ?report.root,
                implementation = ?report.implementation,
                factory = ?report.factory,
                oracle = ?report.oracle,
                oracle_deployed = report.oracle_deployed,
                registered = ?report.registered,
                "deployment finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(?err, "deployment failed");
            ExitCode::FAILURE
        }
    }
}
