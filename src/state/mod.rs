pub mod fx;

pub use fx::{FloatHeart, FxState, HeartDrop, Shower};
