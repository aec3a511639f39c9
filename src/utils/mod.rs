pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod relations;
pub mod response;
pub mod soft_delete;
