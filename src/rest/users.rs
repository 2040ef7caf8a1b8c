//! User lookup and search.

use tracing::debug;

use crate::context::Context;
use crate::error::TetrioError;
use crate::rest::TetrioRestClient;
use crate::rest::endpoints::{self, MAX_USERNAME_LEN};
use crate::types::{FullUser, PartialUser};

impl TetrioRestClient {
    /// Look up a user by username.
    ///
    /// Usernames are matched case-insensitively. Names longer than
    /// [`MAX_USERNAME_LEN`] bytes are rejected without a request, and an
    /// unknown name fails with [`TetrioError::NoSuchUser`].
    pub async fn get_user(&self, ctx: &Context, username: &str) -> Result<FullUser, TetrioError> {
        if username.len() > MAX_USERNAME_LEN {
            return Err(TetrioError::InvalidUsername {
                len: username.len(),
                max: MAX_USERNAME_LEN,
            });
        }

        match self.get(ctx, &endpoints::user(username)).await {
            Err(TetrioError::Remote(err)) if err.is_no_such_user() => {
                debug!(username, "user lookup miss");
                Err(TetrioError::NoSuchUser {
                    username: username.to_string(),
                    source: err,
                })
            }
            result => result,
        }
    }

    /// Find the user linked to an external account id, such as a Discord
    /// snowflake.
    ///
    /// Fails with [`TetrioError::NoLinkedUser`] when no account is linked.
    pub async fn search_user(
        &self,
        ctx: &Context,
        external_id: &str,
    ) -> Result<PartialUser, TetrioError> {
        let user: Option<PartialUser> = self.get(ctx, &endpoints::user_search(external_id)).await?;
        match user {
            Some(user) if !user.id.is_empty() => Ok(user),
            _ => Err(TetrioError::NoLinkedUser {
                id: external_id.to_string(),
            }),
        }
    }
}
