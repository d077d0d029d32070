use crate::UserId;

/// One channel subscription edge, as accepted by
/// `POST /api/v1/subscriptions/subscribe`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Subscription {
    pub channel_id: UserId,
    pub subscriber_id: UserId,
}
