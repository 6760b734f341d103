pub mod indicator;
pub mod resolve;

pub mod util;
