//! Collection bindings for the domain types, so they can be queried by field name.

use crate::actor_framework::{Entity, FieldValue};
use crate::domain::{Celebrity, VideoRequest};

pub const CELEBRITIES: &str = "celebrities";
pub const VIDEO_REQUESTS: &str = "videoRequests";

/// Cents beyond `i64::MAX` clamp rather than wrap, so ordering holds.
fn cents_field(cents: u64) -> FieldValue {
    FieldValue::Int(i64::try_from(cents).unwrap_or(i64::MAX))
}

impl Entity for Celebrity {
    const COLLECTION: &'static str = CELEBRITIES;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "category" => self.category.label().into(),
            "bio" => self.bio.as_str().into(),
            "priceCents" => cents_field(self.price_cents),
            "profileImageUrl" => self.profile_image_url.clone().into(),
            "rating" => self.rating.into(),
            "totalReviews" => FieldValue::Int(self.total_reviews.into()),
            "responseTimeHours" => FieldValue::Int(self.response_time_hours.into()),
            "isFeatured" => self.is_featured.into(),
            _ => return None,
        };
        Some(value)
    }
}

impl Entity for VideoRequest {
    const COLLECTION: &'static str = VIDEO_REQUESTS;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.as_str().into(),
            "userId" => self.user_id.as_str().into(),
            "celebrityId" => self.celebrity_id.as_str().into(),
            "occasion" => self.occasion.label().into(),
            "recipientName" => self.recipient_name.as_str().into(),
            "pricePaidCents" => cents_field(self.price_paid_cents),
            "status" => self.status.as_str().into(),
            "videoUrl" => self.video_url.clone().into(),
            "createdAt" => self.created_at.into(),
            "completedAt" => self.completed_at.into(),
            _ => return None,
        };
        Some(value)
    }
}
