mod category;
mod sender;

pub use category::EventCategory;
pub use sender::{PushError, PushMessage, PushReceipt, PushSender};
