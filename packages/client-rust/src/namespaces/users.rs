//! Users: `GET /v1/users`.
//!
//! The one GET-paginated endpoint: continuation rides the query string
//! instead of a request body.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use folio_core::{Page, PageParams, User};

use crate::client::{Client, PagedCapability};
use crate::error::Result;
use crate::namespaces::paths;
use crate::operator::{decode_envelope, PagedRequest, ResultStream};
use crate::registry::keys;
use crate::transport::{ApiRequest, RawResponse};

/// Workspace member calls, resolved through the [`keys::USERS`] capability.
pub struct UsersNamespace<'a> {
    client: &'a Client,
}

impl<'a> UsersNamespace<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn capability(&self) -> Result<Arc<PagedCapability<User>>> {
        self.client.registry().get_typed(keys::USERS)
    }

    /// Every workspace member across all pages. All-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns a capability error before any network activity when user
    /// listing is not registered, otherwise the first error the fetch loop
    /// hits.
    pub async fn list_all(&self, cancel: &CancellationToken) -> Result<Vec<User>> {
        let capability = self.capability()?;
        let cancel = self.client.effective_cancel(cancel);
        let request = ListUsers {
            page: PageParams::default(),
        };
        capability.paginated().collect_all(&cancel, request).await
    }

    /// One page of members plus the cursor to resume from.
    ///
    /// # Errors
    ///
    /// Returns a capability error before any network activity when user
    /// listing is not registered, otherwise any error from the single fetch.
    pub async fn first_page(
        &self,
        cancel: &CancellationToken,
        page: PageParams,
    ) -> Result<Page<User>> {
        let capability = self.capability()?;
        let cancel = self.client.effective_cancel(cancel);
        capability
            .one_shot()
            .execute(&cancel, ListUsers { page })
            .await
    }

    /// Members as an incremental stream. A missing capability yields a
    /// one-element closed sequence carrying the error.
    #[must_use]
    pub fn stream(&self, cancel: &CancellationToken) -> ResultStream<User> {
        match self.capability() {
            Ok(capability) => {
                let cancel = self.client.effective_cancel(cancel);
                let request = ListUsers {
                    page: PageParams::default(),
                };
                capability.paginated().stream(&cancel, request)
            }
            Err(err) => ResultStream::failed(err),
        }
    }
}

/// The user-listing request: pure continuation state, no body.
struct ListUsers {
    page: PageParams,
}

impl PagedRequest for ListUsers {
    type Item = User;

    fn initial_page(&self) -> PageParams {
        self.page.clone()
    }

    fn page_request(&self, page: &PageParams) -> Result<ApiRequest> {
        Ok(ApiRequest::get(paths::USERS).with_query(page.query_pairs()))
    }

    fn decode_page(&self, raw: &RawResponse) -> Result<Page<Self::Item>> {
        decode_envelope(raw)
    }
}
