pub mod chrome;
pub mod driver;
pub mod locator;
pub mod lookup;

pub use chrome::{ChromeDom, ElementRef};
pub use driver::DomDriver;
pub use locator::Locator;
pub use lookup::Lookup;
