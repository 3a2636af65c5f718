//! Client for the Dynatrace extension and monitoring-configuration API.
//!
//! Each method of [`DynatraceClient`] maps to exactly one endpoint: build the
//! URL, send one authenticated request, check the status, decode the JSON.
//! There is no retry, rate limiting or caching. Schema download is the only
//! composite operation and runs its requests strictly in sequence.
//!
//! # Architecture
//!
//! - [`client`]: [`DynatraceClient`] and its per-endpoint operations
//! - [`schemas`]: schema version resolution and bulk download
//! - [`pages`]: lazy iteration over `nextPageKey`-paged lists
//! - [`transport`]: the [`Transport`] seam and the reqwest implementation
//! - [`http`]: client construction and URL helpers
//!
//! # Request Flow
//!
//! ```text
//! client.acquire_extensions()
//!     ↓
//! 1. endpoint_url(base_url, ["api", "v2", "extensions"])
//!     ↓
//! 2. Transport::execute(GET + Authorization: Api-Token ...)
//!     ↓
//! 3. non-2xx → ApiError::Status { status, body }
//!     ↓
//! 4. decode page, follow nextPageKey until exhausted
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use dtcli_api::DynatraceClient;
//!
//! # fn main() -> Result<(), dtcli_api::ApiError> {
//! let client = DynatraceClient::from_dev_tenant("abc12345", "dt0c01.TOKEN")?;
//!
//! for extension in client.extensions() {
//!     let extension = extension?;
//!     println!("{} {}", extension["extensionName"], extension["version"]);
//! }
//!
//! match client.acquire_environment_configuration("com.dynatrace.extension.demo")? {
//!     Some(config) => println!("active version: {}", config["version"]),
//!     None => println!("not activated"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Downloading Schemas
//!
//! ```no_run
//! use dtcli_api::DynatraceClient;
//!
//! # fn main() -> Result<(), dtcli_api::ApiError> {
//! let client = DynatraceClient::from_tenant_url("https://abc12345.live.dynatrace.com", "dt0c01.TOKEN")?;
//! let report = client.download_schemas("latest", "schemas")?;
//! println!("{} files for {}", report.files.len(), report.version);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod pages;
pub mod schemas;
pub mod transport;

pub use client::DynatraceClient;
pub use error::ApiError;
pub use pages::Pages;
pub use schemas::{SchemaDownload, SchemaManifest, SchemaVersions, resolve_schema_version};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
