pub mod assistant_dto;
pub mod auth_dto;
pub mod career_dto;
pub mod tree_dto;
