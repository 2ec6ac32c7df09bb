use std::default::Default;

/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Sends a snapshot Request as soon as a transport is attached
    pub request_snapshot_on_connect: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_snapshot_on_connect: true,
        }
    }
}
