pub mod amap_api;
pub mod as_the_crow_flies;
pub mod distance_oracle;
pub mod matrix_builder;
pub mod travel_matrices;
