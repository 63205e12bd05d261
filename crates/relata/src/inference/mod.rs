//! Inference: the gateway boundary and strategies that populate schemas.

mod delimited;
mod detect;
mod fixed;
mod traits;

pub use delimited::{DelimitedConfig, DelimitedInference, DelimitedInferrer, DirectoryGateway};
pub use detect::{
    ColumnProfile, detect_value_type, foreign_key_stem, is_identifier_name, is_null_token,
    pluralize, profile_column,
};
pub use fixed::{FixedInference, FixedInferrer};
pub use traits::{Gateway, Inference, Inferrer};
