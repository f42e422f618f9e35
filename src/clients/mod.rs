pub mod jikan;
