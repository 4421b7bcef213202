//! Provider configuration.

/// Tuning knobs for the notification provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Initial capacity of the subscriber cache.
    pub subscriber_capacity: usize,
    /// Capacity hint for the observer-id list built per dispatch. The list
    /// grows past this; it is not a cap on recipients.
    pub observer_capacity: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            subscriber_capacity: 16,
            observer_capacity: 255,
        }
    }
}
