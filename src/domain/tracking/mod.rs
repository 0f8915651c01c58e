//! Pure tracking-link core.
//!
//! Everything here is a total, stateless function: slugging free text,
//! canonicalizing UTM fields, filtering custom parameters, deriving the
//! tracking parameters of a link type and assembling the destination URL.
//!
//! # Flow
//!
//! 1. [`NormalizedFields::from_raw`] canonicalizes caller input
//! 2. [`build_tracking_params`] derives the parameter set for the link type
//! 3. [`sanitize`] strips reserved keys from custom parameters
//! 4. [`build_full_url`] joins everything into the final URL

pub mod governance;
pub mod normalizer;
pub mod params;
pub mod slugger;
pub mod url_builder;

pub use governance::{RESERVED_PARAMS, is_reserved, sanitize};
pub use normalizer::{NormalizedFields, normalize_campaign, normalize_utm, normalize_utm_term};
pub use params::{QueryParams, TrackingParamSet, build_tracking_params};
pub use slugger::{SlugCharset, slug, slug_with};
pub use url_builder::build_full_url;
