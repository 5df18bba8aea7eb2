use crate::client::FirebaseError;
use crate::models::FcmMessage;
use std::future::Future;

/// Something that can deliver a single FCM message
///
/// Implemented by [`FirebaseClient`](crate::FirebaseClient); the dispatcher is
/// generic over this so it can be exercised without the network.
pub trait PushSender: Send + Sync {
    /// Sends one message and returns the FCM message name on success.
    fn send(
        &self,
        message: &FcmMessage,
    ) -> impl Future<Output = Result<String, FirebaseError>> + Send;
}
