pub mod news;
pub mod price;
pub mod snapshot;

pub use news::NewsDigest;
pub use price::{PricePoint, PriceSeries};
pub use snapshot::{SnapshotOptions, Variant};
