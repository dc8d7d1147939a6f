//! Domain services
pub mod display;
pub mod surcharge;
pub mod weight_resolution;

pub use display::{BreakdownFormatter, DisplayBreakdown, DisplayLocale};
pub use surcharge::{InvalidInput, LineItem, PricingError, PricingResult, WeightSurchargePricer};
pub use weight_resolution::{CatalogLineItem, ProductWeight, VariantWeight, WeightResolutionChain, WeightSource, WeightStep};
