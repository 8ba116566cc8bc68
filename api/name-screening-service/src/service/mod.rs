pub mod file_screening_service;
pub mod name_normalization_service;
pub mod screening_service;
pub mod screening_store_service;
pub mod similarity_service;
