pub mod epa;
pub mod google_geocoding;

pub use epa::EpaWaterDirectory;
pub use google_geocoding::GoogleGeocodingProvider;
