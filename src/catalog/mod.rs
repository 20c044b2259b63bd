pub mod rest_countries;
pub mod source;
pub mod types;

pub use rest_countries::{DEFAULT_ENDPOINT, RestCountriesSource};
pub use source::{CountrySource, SourceError};
pub use types::{ApiCountry, Country};
