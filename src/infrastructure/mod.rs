pub mod js_executor;
pub mod wait;

pub use js_executor::JsExecutor;
pub use wait::Waiter;
