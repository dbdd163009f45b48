//! Schema command handler.

use cloudbeaver_core::CloudBeaverProvider;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let provider = CloudBeaverProvider::new(env!("CARGO_PKG_VERSION"));
    let out = output::render_schemas(global.output, &provider.schemas())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
