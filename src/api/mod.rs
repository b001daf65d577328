pub mod excel;
pub mod models;
pub mod response;
pub mod routes;
