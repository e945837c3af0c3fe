pub mod click_event;
pub mod open_event;
pub mod tracked_link;
pub mod tracked_message;

pub use click_event::Entity as ClickEventEntity;
pub use open_event::Entity as OpenEventEntity;
pub use tracked_link::Entity as TrackedLinkEntity;
pub use tracked_message::Entity as TrackedMessageEntity;
