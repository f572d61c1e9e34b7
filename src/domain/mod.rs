// Domain types and value objects
pub mod candle;
pub mod timeframe;
pub mod universe;

// Re-export commonly used types
pub use candle::Candle;
pub use timeframe::Timeframe;
pub use universe::Universe;
