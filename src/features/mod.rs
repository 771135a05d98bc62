/// Feature construction for the prediction pipeline
///
/// Raw employee attributes are validated, optional fields are filled with
/// documented defaults, and the result is encoded into the fixed-order
/// numeric vector both models were trained against.
pub mod employee;
pub mod encoder;

pub use employee::{EmployeeRecord, FeatureDefaults};
pub use encoder::{DepartmentEncoding, FeatureEncoder, FEATURE_COLUMNS, FEATURE_COUNT};
