//! # Outbound Payload Building
//!
//! Pure builders turning a [`Message`] or [`SyncInfo`] into the
//! representation handed to the notify primitive. Mandatory attributes are
//! set unconditionally; optional attributes only when present on the
//! source value.

use shared_types::representation::{
    attr, MESSAGE_COLLECTION_URI, SYNC_COLLECTION_URI,
};
use shared_types::{Message, ResourceRepresentation, SyncInfo};

/// Build the outbound representation of a message.
#[must_use]
pub fn message_representation(message: &Message) -> ResourceRepresentation {
    let mut rep = ResourceRepresentation::new(MESSAGE_COLLECTION_URI);
    rep.set_int(attr::MESSAGE_ID, message.message_id as i64);
    rep.set_text(attr::PROVIDER_ID, &message.provider_id);

    if let Some(message_type) = message.message_type {
        rep.set_int(attr::TYPE, message_type.code());
    }
    if let Some(ttl) = message.ttl {
        rep.set_int(attr::TTL, ttl as i64);
    }
    if let Some(date_time) = &message.date_time {
        rep.set_text(attr::DATE_TIME, date_time);
    }
    if let Some(title) = &message.title {
        rep.set_text(attr::TITLE, title);
    }
    if let Some(content_text) = &message.content_text {
        rep.set_text(attr::CONTENT_TEXT, content_text);
    }
    if let Some(source_name) = &message.source_name {
        rep.set_text(attr::SOURCE_NAME, source_name);
    }
    rep
}

/// Build the outbound representation of a sync event.
#[must_use]
pub fn sync_representation(sync: &SyncInfo) -> ResourceRepresentation {
    let mut rep = ResourceRepresentation::new(SYNC_COLLECTION_URI);
    rep.set_text(attr::PROVIDER_ID, &sync.provider_id);
    rep.set_int(attr::MESSAGE_ID, sync.message_id as i64);
    rep.set_int(attr::STATE, sync.state.code());
    rep
}
