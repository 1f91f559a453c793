use std::fmt;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::load_celebrity;
use crate::clients::{AuthClient, CelebrityClient, VideoRequestClient};
use crate::domain::{Celebrity, Occasion, RequestStatus, UnknownOccasion, VideoRequest};
use crate::error::{AuthError, DataError};
use crate::format::{format_price, format_response_time};
use crate::shell::{Notification, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Occasion,
    RecipientName,
    CustomMessage,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequiredField::Occasion => "occasion",
            RequiredField::RecipientName => "recipient name",
            RequiredField::CustomMessage => "message",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),
    #[error(transparent)]
    UnknownOccasion(#[from] UnknownOccasion),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The request form exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestForm {
    pub occasion: String,
    pub recipient_name: String,
    pub custom_message: String,
    pub special_instructions: String,
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    pub occasion: Occasion,
    pub recipient_name: String,
    pub custom_message: String,
    pub special_instructions: Option<String>,
}

impl RequestForm {
    /// Whitespace-only input counts as empty.
    pub fn validate(&self) -> Result<ValidRequest, ValidationError> {
        let occasion = self.occasion.trim();
        let recipient_name = self.recipient_name.trim();
        let custom_message = self.custom_message.trim();

        let missing: Vec<RequiredField> = [
            (occasion, RequiredField::Occasion),
            (recipient_name, RequiredField::RecipientName),
            (custom_message, RequiredField::CustomMessage),
        ]
        .into_iter()
        .filter(|(value, _)| value.is_empty())
        .map(|(_, field)| field)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let special_instructions = self.special_instructions.trim();
        Ok(ValidRequest {
            occasion: occasion.parse()?,
            recipient_name: recipient_name.to_string(),
            custom_message: custom_message.to_string(),
            special_instructions: (!special_instructions.is_empty())
                .then(|| special_instructions.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Remote(#[from] DataError),
}

impl SubmitError {
    /// The toast shown for this failure. The form stays as it was.
    pub fn notification(&self) -> Notification {
        match self {
            SubmitError::Invalid(ValidationError::MissingFields(_)) => {
                Notification::failure("Missing Information", "Please fill in all required fields.")
            }
            SubmitError::Invalid(ValidationError::UnknownOccasion(_)) => Notification::failure(
                "Invalid Occasion",
                "Please choose an occasion from the list.",
            ),
            SubmitError::Auth(AuthError::Unauthenticated) => {
                Notification::failure("Sign In Required", "Please sign in to request a video.")
            }
            SubmitError::Auth(_) | SubmitError::Remote(_) => Notification::failure(
                "Error",
                "Failed to submit your request. Please try again.",
            ),
        }
    }
}

/// A request that reached the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Submitted {
    pub request: VideoRequest,
    pub navigate_to: Route,
    pub notification: Notification,
}

/// Fresh request id. Unique at the boundary, and sortable by creation time.
pub fn new_request_id() -> String {
    format!("req_{}", Uuid::now_v7().simple())
}

/// Turns a filled-in form into one `videoRequests` record.
#[derive(Clone, Debug)]
pub struct RequestSubmitter {
    requests: VideoRequestClient,
    auth: AuthClient,
}

impl RequestSubmitter {
    pub fn new(requests: VideoRequestClient, auth: AuthClient) -> Self {
        Self { requests, auth }
    }

    /// Validates locally, then issues exactly one create call. Nothing goes over
    /// the wire when validation fails.
    #[instrument(skip(self, celebrity, form), fields(celebrity_id = %celebrity.id))]
    pub async fn submit(
        &self,
        celebrity: &Celebrity,
        form: &RequestForm,
    ) -> Result<Submitted, SubmitError> {
        let valid = form.validate().map_err(|e| {
            debug!(error = %e, "Request form rejected");
            e
        })?;

        let user = self.auth.me().await.map_err(|e| {
            error!(error = %e, "Could not resolve current user");
            e
        })?;

        let record = VideoRequest {
            id: new_request_id(),
            user_id: user.id,
            celebrity_id: celebrity.id.clone(),
            occasion: valid.occasion,
            recipient_name: valid.recipient_name,
            custom_message: valid.custom_message,
            special_instructions: valid.special_instructions,
            price_paid_cents: celebrity.price_cents,
            status: RequestStatus::Pending,
            video_url: None,
            created_at: Utc::now(),
            completed_at: None,
        };

        let request = self.requests.create_video_request(record).await.map_err(|e| {
            error!(error = %e, "Error submitting request");
            e
        })?;

        info!(request_id = %request.id, "Video request submitted");
        Ok(Submitted {
            notification: Notification::success(
                "Request Submitted!",
                format!(
                    "Your video request has been sent to {}. You'll be notified when it's ready.",
                    celebrity.name
                ),
            ),
            navigate_to: Route::Dashboard,
            request,
        })
    }
}

/// The request page around the form.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPage {
    NotFound,
    Form {
        celebrity: Box<Celebrity>,
        occasions: [Occasion; 9],
        expected_delivery: String,
        submit_label: String,
    },
}

impl RequestPage {
    #[instrument(skip(client))]
    pub async fn load(client: &CelebrityClient, celebrity_id: &str) -> Self {
        match load_celebrity(client, celebrity_id).await {
            Some(celebrity) => RequestPage::Form {
                expected_delivery: format!(
                    "within {}",
                    format_response_time(celebrity.response_time_hours)
                ),
                submit_label: format!("Pay {} & Request Video", format_price(celebrity.price_cents)),
                occasions: Occasion::ALL,
                celebrity: Box::new(celebrity),
            },
            None => RequestPage::NotFound,
        }
    }
}
