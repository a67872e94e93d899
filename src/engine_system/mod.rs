pub mod inputs;
pub mod model;
pub mod results;
