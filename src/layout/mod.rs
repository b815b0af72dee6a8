//! Layout engine seam and the step driver.

pub mod algorithm;
pub mod driver;
