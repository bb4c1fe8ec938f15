//! MAPI conversion handler.
//!
//! Reads a JSON request from stdin and writes a JSON response to stdout.
//!
//! ```bash
//! echo '{"content": "..."}' | mapi-handler convert.from-openapi
//! ```

use anyhow::{Context, Result};
use mapi_cli::handler::handle;
use mapi_cli::runner::init_logging;
use mapi_core::cli::ExitCode;
use tokio::io::{AsyncReadExt, stdin};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(false)?;

    let capability = std::env::args().nth(1);
    let mut input = String::new();
    if capability.is_some() {
        stdin()
            .read_to_string(&mut input)
            .await
            .context("failed to read request from stdin")?;
    }

    let output = handle(capability.as_deref(), &input).await;
    println!("{}", output.to_json());

    let exit_code = if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::ERROR
    };
    std::process::exit(exit_code.as_i32());
}
