//! Client for the [Danbooru](https://danbooru.donmai.us) API and other booru-style image boards
//! speaking the same protocol.
//!
//! ## Usage
//!
//! First, create a [`Client`] for the host you want to talk to. You have to provide a descriptive
//! User-Agent for your project.
//!
//! ```no_run
//! # use danbooru::client::Client;
//! # fn main() -> Result<(), danbooru::error::Error> {
//! let mut client = Client::new("danbooru.donmai.us", "MyProject/1.0 (by username)")?;
//! client.login("username", "api key");
//! # Ok(()) }
//! ```
//!
//! Requests always go to `https://<host>`. They are authenticated with HTTP Basic authentication
//! when both a login and an API key are set.
//!
//! Now it's ready to go! For example you can add post #8595 to your favorites like this:
//!
//! ```no_run
//! # use danbooru::client::Client;
//! # use danbooru::request::PostId;
//! # #[tokio::main]
//! # async fn main() -> Result<(), danbooru::error::Error> {
//! # let client = Client::new("danbooru.donmai.us", "MyProject/1.0 (by username)")?;
//! client.add_favorite(PostId(8595)).await?;
//! # Ok(()) }
//! ```
//!
//! ## Errors
//!
//! Every API response is expected to be a JSON envelope:
//!
//! ```text
//! { "success": false, "message": "...", "backtrace": ["..."] }
//! ```
//!
//! A response with an error status and an unsuccessful envelope becomes a
//! [`ResponseError`]. Response errors compare equal when their status codes do, which is how you
//! tell that you are being throttled:
//!
//! ```no_run
//! # use danbooru::client::Client;
//! # use danbooru::request::PostId;
//! use danbooru::response::ResponseError;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), danbooru::error::Error> {
//! # let client = Client::new("danbooru.donmai.us", "MyProject/1.0 (by username)")?;
//! if let Err(e) = client.add_favorite(PostId(8595)).await {
//!     if e == ResponseError::THROTTLED {
//!         // back off and try again later
//!     }
//!     eprintln!("{:#}", e);
//! }
//! # Ok(()) }
//! ```
//!
//! `danbooru` never retries requests and doesn't rate limit itself; that's up to you.
//!
//! [`Client`]: client/struct.Client.html
//! [`ResponseError`]: response/struct.ResponseError.html

/// Client related structures.
pub mod client;

/// Error management.
pub mod error;

/// Request building.
pub mod request;

/// Response parsing.
pub mod response;

mod favorite;

#[cfg(test)]
mod testing;
