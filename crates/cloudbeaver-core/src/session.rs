// ── Session ──
//
// One resolved connection context plus the capability client built from
// it. Both are shared read-only by every resource and data source handed
// out; nothing mutates them after construction.

use std::sync::Arc;

use cloudbeaver_api::{CloudBeaverClient, TransportConfig};
use tracing::{debug, info};

use crate::client::TeamClient;
use crate::config::{ConnectOptions, ConnectionContext};
use crate::datasource::TeamDataSource;
use crate::error::CoreError;
use crate::resource::TeamResource;

pub struct Session<C> {
    context: Arc<ConnectionContext>,
    client: Arc<C>,
}

impl<C> Clone for Session<C> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: TeamClient> Session<C> {
    /// Wrap an already-built client.
    pub fn new(context: ConnectionContext, client: C) -> Self {
        Self {
            context: Arc::new(context),
            client: Arc::new(client),
        }
    }

    pub fn context(&self) -> &ConnectionContext {
        &self.context
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn team_resource(&self) -> TeamResource<C> {
        TeamResource::new(Arc::clone(&self.client))
    }

    pub fn team_data_source(&self) -> TeamDataSource<C> {
        TeamDataSource::new(Arc::clone(&self.client))
    }
}

impl Session<CloudBeaverClient> {
    /// Build the HTTP client for `context` and open an admin session.
    pub async fn connect(
        context: ConnectionContext,
        options: &ConnectOptions,
    ) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            accept_invalid_certs: options.accept_invalid_certs,
            timeout: options.timeout,
            cookie_jar: None,
        }
        .with_cookie_jar();

        let client = CloudBeaverClient::new(
            context.host(),
            context.username(),
            context.password().clone(),
            &transport,
        )?;
        debug!(endpoint = %client.endpoint(), "opening session");

        client.login().await?;
        info!(host = context.host(), "connected to CloudBeaver");

        Ok(Self::new(context, client))
    }
}
