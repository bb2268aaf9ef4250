pub mod ids;
pub mod response;

pub use ids::deserialize_optional_id;
pub use response::ApiResponse;
