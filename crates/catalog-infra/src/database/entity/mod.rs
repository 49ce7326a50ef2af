//! SeaORM entities and their domain conversions.

pub mod category;
pub mod product;
pub mod user;
