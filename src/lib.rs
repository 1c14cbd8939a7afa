//! Typed async Rust client for the [Koios](https://koios.rest) Cardano REST API.
//!
//! This crate provides network selection, optional bearer-token
//! authentication, response models mirroring the Koios OpenAPI schemas, and
//! an async client with a pluggable transport/middleware chain.
//!
//! # Features
//!
//! - **`types` and `network` modules** — Response models and the network
//!   table. Available with no additional features.
//! - **`client` module** (enabled by default) — An async REST client built
//!   on `reqwest`, with a [`Transport`] seam for test doubles and a
//!   [`Middleware`] chain for request decoration.
//!
//! # Quick start
//!
//! ```no_run
//! use koios_client::{KoiosClient, Network};
//!
//! #[tokio::main]
//! async fn main() -> koios_client::Result<()> {
//!     let client = KoiosClient::new(Network::Mainnet)?;
//!     let tip = client.tip().await?;
//!     println!("epoch {} at block {}", tip[0].epoch_no, tip[0].block_no);
//!     Ok(())
//! }
//! ```
//!
//! # Authentication
//!
//! Public Koios instances accept unauthenticated requests at a reduced rate
//! limit. Pass a bearer token explicitly or source it from the process
//! environment:
//!
//! ```no_run
//! use koios_client::{KoiosClient, Network};
//!
//! # fn main() -> koios_client::Result<()> {
//! let client = KoiosClient::builder(Network::Preprod)
//!     .api_key_from_env("KOIOS_API_TOKEN")
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Transport`]: transport::Transport
//! [`Middleware`]: middleware::Middleware

pub mod error;
pub mod network;
pub mod types;

pub use error::{Error, Result};
pub use network::Network;
pub use types::*;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod middleware;
#[cfg(feature = "client")]
pub mod transport;

#[cfg(feature = "client")]
pub use client::{ClientBuilder, KoiosClient};
#[cfg(feature = "client")]
pub use middleware::{BearerAuth, Middleware, Next};
#[cfg(feature = "client")]
pub use transport::{ReqwestTransport, Request, Response, Transport, TransportError};
