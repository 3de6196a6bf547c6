mod model_matcher;
pub use model_matcher::*;
