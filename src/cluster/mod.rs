mod generator;
mod normalize;
mod types;
mod validate;

pub use generator::{generate_cluster, GenerationError};
pub use normalize::normalize;
pub use types::{
    ClusterRequest, ClusterResult, ContentType, KeywordInfo, RawClusterResult, RawKeywordInfo,
};
pub use validate::{validate, KeywordFormRequest, ValidationError};
