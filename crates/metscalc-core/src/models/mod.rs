pub mod demographics;
pub mod derived;
pub mod inputs;
pub mod params;
pub mod result;
