pub mod google;

pub use google::GoogleAirQualityProvider;
