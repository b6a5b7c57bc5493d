//! Construction options for [`ByteStream`](crate::ByteStream).

use bytes::Bytes;

/// Options applied when a stream is created.
#[derive(Debug, Clone, Default)]
pub struct StreamConfig {
    /// Payload written at construction. The cursor is rewound to 0 afterwards.
    pub initial_value: Option<Bytes>,
    /// Bytes to reserve up front. Goes through the normal resize policy,
    /// so the resulting capacity is `capacity_hint + 1`.
    pub capacity_hint: usize,
}

impl StreamConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preloaded payload.
    pub fn with_initial_value(mut self, value: impl Into<Bytes>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    /// Set the up-front reservation.
    pub fn with_capacity_hint(mut self, bytes: usize) -> Self {
        self.capacity_hint = bytes;
        self
    }
}
