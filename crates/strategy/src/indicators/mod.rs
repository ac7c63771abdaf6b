pub mod ema;
pub mod momentum;
pub mod volatility;
pub mod volume;

pub use ema::Ema;
pub use momentum::Momentum;
pub use volatility::AverageTrueRange;
pub use volume::VolumeMa;
