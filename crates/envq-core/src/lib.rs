pub mod coordinates;
pub mod error;
pub mod quality;
pub mod report;
pub mod score;
pub mod substance;
pub mod traits;

pub use coordinates::*;
pub use error::{QualityError, redact_secrets};
pub use quality::*;
pub use report::*;
pub use score::*;
pub use substance::*;
pub use traits::*;
