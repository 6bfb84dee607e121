// API version discovery
//
// `SYNO.API.Info` reports the highest version the station supports for
// each API family. The table is cached until explicitly refreshed or
// invalidated; there is no expiry.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Error;
use crate::models::ApiInfoTable;
use crate::operation::Operation;
use crate::transport::{Params, Transport};

/// Discovery itself is always spoken at version 1.
const DISCOVERY_VERSION: u32 = 1;

/// Sent for APIs the table doesn't list. Every Web API accepts version 1;
/// if the API is truly missing the station answers with code 102.
const FALLBACK_VERSION: u32 = 1;

/// Maximum supported version per API name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ApiVersionTable(BTreeMap<String, u32>);

impl ApiVersionTable {
    pub fn get(&self, api: &str) -> Option<u32> {
        self.0.get(api).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, v)| (name.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for ApiVersionTable {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Process-local cache of the last discovered [`ApiVersionTable`].
///
/// Handed out as `Arc` so repeated cache hits return the same instance.
#[derive(Debug, Default)]
pub struct VersionCache {
    table: Option<Arc<ApiVersionTable>>,
}

impl VersionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached(&self) -> Option<&Arc<ApiVersionTable>> {
        self.table.as_ref()
    }

    /// Forget the table; the next lookup queries the station.
    pub fn invalidate(&mut self) {
        debug!("api version cache invalidated");
        self.table = None;
    }

    /// Return the version table, querying the station unless `use_cached`
    /// and a table is already held. A failed query leaves the cache as it was.
    pub async fn get_versions(
        &mut self,
        transport: &Transport,
        use_cached: bool,
    ) -> Result<Arc<ApiVersionTable>, Error> {
        if use_cached {
            if let Some(ref table) = self.table {
                debug!("api version cache hit");
                return Ok(Arc::clone(table));
            }
        }
        debug!(use_cached, "api version cache miss, querying station");

        let params = Params::new(Operation::QueryApiVersion, DISCOVERY_VERSION).with("query", "ALL");
        let infos: ApiInfoTable = transport
            .query(Operation::QueryApiVersion, &params)
            .await
            .map_err(|cause| Error::from_cause(Operation::QueryApiVersion, cause))?;

        let table: Arc<ApiVersionTable> = Arc::new(
            infos
                .into_iter()
                .map(|(name, info)| (name, info.max_version))
                .collect(),
        );
        debug!(apis = table.len(), "api version table replaced");
        self.table = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Version to send for `operation`'s API.
    pub(crate) async fn version_of(
        &mut self,
        transport: &Transport,
        operation: Operation,
        use_cached: bool,
    ) -> Result<u32, Error> {
        let table = self.get_versions(transport, use_cached).await?;
        Ok(table.get(operation.api()).unwrap_or_else(|| {
            warn!(
                api = operation.api(),
                version = FALLBACK_VERSION,
                "api missing from version table, using fallback"
            );
            FALLBACK_VERSION
        }))
    }
}
