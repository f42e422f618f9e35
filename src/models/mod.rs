pub mod filter;
pub mod manga;
