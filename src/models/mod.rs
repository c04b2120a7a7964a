pub mod normalize;
pub mod product;

pub use product::{NewProduct, Product, ProductChanges, ProductPayload};
