pub mod classifier;
pub mod dispatch;
pub mod messaging;
pub mod responder;
