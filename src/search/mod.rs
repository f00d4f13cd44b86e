pub mod filter;

pub use filter::filter;
