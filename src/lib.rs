#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]

//! A URI parser and component model following IETF [RFC 3986], with a
//! builder that understands URI template placeholders.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! The pieces fit together as follows:
//!
//! - [`parse_uri`] (or a configured [`Parser`]) splits text into a flat
//!   [`UriRecord`]. It is lenient enough to accept `{name}` placeholders in
//!   any component, including the host and port.
//! - [`UriComponentsBuilder`] is populated from a record or by setters and
//!   builds immutable [`UriComponents`].
//! - [`UriComponents`] can be [encoded], [normalized] and [expanded], then
//!   rendered with [`to_uri_string`] or converted to a strictly validated
//!   [`Uri`] with [`to_uri`].
//!
//! [encoded]: UriComponents::encode
//! [normalized]: UriComponents::normalize
//! [expanded]: UriComponents::expand
//! [`to_uri_string`]: UriComponents::to_uri_string
//! [`to_uri`]: UriComponents::to_uri
//!
//! # Examples
//!
//! ```
//! use uri_components::{template::positional, UriComponentsBuilder};
//!
//! let uri = UriComponentsBuilder::from_uri_string("https://example.com/hotels/{hotel}")?
//!     .query_param("q", ["bed & breakfast"])
//!     .build(false)?
//!     .expand(positional(["Grand Budapest"]))?
//!     .encode()
//!     .to_uri()?;
//!
//! assert_eq!(
//!     uri.as_str(),
//!     "https://example.com/hotels/Grand%20Budapest?q=bed%20%26%20breakfast"
//! );
//! # Ok::<_, uri_components::UriError>(())
//! ```
//!
//! # Feature flags
//!
//! All features are disabled by default.
//!
//! - `serde`: Implements `Serialize` and `Deserialize` for [`Uri`] and
//!   [`UriComponents`] as strings.
//!
//! # Logging
//!
//! Events are emitted with [`tracing`] at the `trace` and `debug` levels.
//! The crate never installs a subscriber.
//!
//! [`tracing`]: https://docs.rs/tracing

extern crate alloc;

pub mod component;
pub mod normalize;
pub mod pct_enc;
pub mod template;

mod builder;
mod components;
mod error;
mod fmt;
mod parse;
mod path;
mod query;
mod uri;

pub use builder::UriComponentsBuilder;
pub use components::{HierarchicalUriComponents, OpaqueUriComponents, UriComponents};
pub use error::{UriError, UriErrorKind};
pub use parse::{parse_uri, Parser, UriRecord};
pub use path::PathComponent;
pub use query::{Iter as QueryParamsIter, QueryParams};
pub use uri::Uri;
