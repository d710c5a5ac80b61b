mod probe;

pub use probe::{SessionIdentity, SessionProbe, SessionState};
