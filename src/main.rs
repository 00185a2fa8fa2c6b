use anyhow::Result;
use dc::{env, logging, Options};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let start_dir = std::env::current_dir()?;

    // Preload .env before parsing so ENVIRONMENT / DC_COMPOSE_BIN defaults see it
    let dotenv = env::load_dotenv(&start_dir);

    let opts = Options::from_env();
    logging::init_logger(opts.verbose);

    match dotenv {
        Ok(Some(path)) => tracing::debug!("Loaded {}", path.display()),
        Ok(None) => {}
        Err(e) => tracing::warn!("Ignoring .env: {e}"),
    }
    tracing::debug!("Options: {:?}", opts);

    match dc::run(&start_dir, &opts).await {
        Ok(code) => Ok(ExitCode::from(u8::try_from(code).unwrap_or(1))),
        Err(e) => {
            eprintln!("error | {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
