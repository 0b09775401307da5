/// Trait that transport adapters implement for their connections
///
/// The core never touches the wire: everything it knows about a connected
/// client goes through this capability. Delivery is fire-and-forget; failure
/// handling stays on the transport's side of the seam.
pub trait Connection: Send + Sync {
    /// Deliver one named event with an opaque payload to this client
    fn send(&self, event: &str, payload: serde_json::Value);

    /// Subscribe this client to a named broadcast channel
    fn join(&self, channel: &str);

    /// Unsubscribe this client from a named broadcast channel
    fn leave(&self, channel: &str);
}
