pub mod apns_voip;
pub mod device_store;
pub mod fcm_dispatch;
pub mod router;
pub mod token_resolver;

pub use apns_voip::{ApnsVoipClient, RealtimePushDispatcher};
pub use device_store::{DeviceStore, PgDeviceStore};
pub use fcm_dispatch::{FcmLegacyClient, OrdinaryPushDispatcher};
pub use router::{classify, NotificationRouter};
pub use token_resolver::RecipientTokenResolver;
