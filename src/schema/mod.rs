pub mod dataset;
pub mod types;
pub mod write;

pub use types::{
    CountryRecord, Dataset, FormerCountry, Metadata, Successor, Transition, TransitionType,
    ValidityPeriod,
};
pub use write::write_dataset;
