pub mod blocks;

pub use blocks::{Block, BlockUsage, BlocksResponse, BurnRate, Projection, TokenCounts};
