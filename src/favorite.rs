use crate::client::{Client, Transport};
use crate::error::{Error, Result};
use crate::request::{JsonBody, PostId};

use reqwest::Method;

impl<T: Transport> Client<T> {
    /// Add the post with the given ID to the favorites of the logged in user.
    ///
    /// ```no_run
    /// # use danbooru::client::Client;
    /// # use danbooru::request::PostId;
    /// # #[tokio::main]
    /// # async fn main() -> danbooru::error::Result<()> {
    /// let mut client = Client::new("danbooru.donmai.us", "MyProject/1.0 (by username)")?;
    /// client.login("username", "api key");
    ///
    /// match client.add_favorite(PostId(8595)).await {
    ///     Err(e) if e.is_throttled() => println!("slow down"),
    ///     r => r?,
    /// }
    /// # Ok(()) }
    /// ```
    ///
    /// Errors from the transport are returned as they are. Other errors describe the operation,
    /// e.g. `add favorite 8595: HTTP 429 Too Many Requests`, and can still be matched against
    /// [`ResponseError`](crate::response::ResponseError)s.
    pub async fn add_favorite(&self, post_id: PostId) -> Result<()> {
        match self
            .call(
                Method::POST,
                "/favorites.json",
                Some(JsonBody::post_id(post_id)),
            )
            .await
        {
            Ok(_) => Ok(()),
            Err(e @ Error::Transport(_)) => Err(e),
            Err(e) => Err(e.context(format!("add favorite {}", post_id))),
        }
    }
}
