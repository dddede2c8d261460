//! Build trigger endpoint.

use tracing::info;

use caprover_core::constants::{paths, NAMESPACE};
use caprover_core::error::CaproverResult;

use crate::client::CaproverClient;

impl CaproverClient {
    /// Trigger a rebuild through the app's push webhook token.
    ///
    /// The token travels percent-encoded in the query string; no body is sent.
    pub async fn force_build(&self, token: &str) -> CaproverResult<()> {
        info!("triggering build");
        let url = self.url_with_query(
            paths::TRIGGER_BUILD,
            &[("namespace", NAMESPACE), ("token", token)],
        )?;
        self.post_checked_url(url, None).await
    }
}
