//! Builder error types

use nosograph_domain::EndpointCode;
use nosograph_gatekeeper::DisclosureError;
use thiserror::Error;

/// Errors that abort a build
#[derive(Error, Debug)]
pub enum BuildError {
    /// A count failed the disclosure check
    #[error("Disclosure check failed: {0}")]
    Disclosure(#[from] DisclosureError),

    /// A statistics row referenced an endpoint the registry does not know
    #[error("Missing endpoint reference: '{code}' is not in the endpoint definitions")]
    MissingEndpointReference {
        /// The unknown code
        code: EndpointCode,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
