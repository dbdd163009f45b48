//! Shared helpers for command handlers.

use std::time::Duration;

use cloudbeaver_api::CloudBeaverClient;
use cloudbeaver_config::{EnvSnapshot, ProviderConfig, configure, load_provider_config};
use cloudbeaver_core::{ConnectOptions, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Declared provider configuration: config file, then flag overrides.
pub fn declared_config(global: &GlobalOpts) -> Result<ProviderConfig, CliError> {
    let base = match &global.config {
        Some(path) => load_provider_config(path)?,
        None => ProviderConfig::default(),
    };
    Ok(base.with_overrides(
        global.host.clone(),
        global.username.clone(),
        global.password.clone(),
    ))
}

/// Resolve configuration against the environment and open a session.
pub async fn connect(global: &GlobalOpts) -> Result<Session<CloudBeaverClient>, CliError> {
    let config = declared_config(global)?;
    let env = EnvSnapshot::capture();
    let options = ConnectOptions {
        timeout: Duration::from_secs(global.timeout),
        accept_invalid_certs: global.insecure,
    };
    Ok(configure(&config, &env, &options).await?)
}
