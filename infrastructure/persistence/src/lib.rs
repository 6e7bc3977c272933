pub mod db;
pub mod error;
pub mod product {
    pub mod entity;
    pub mod repository;
}
