//! API account information and webhook subscriptions.

use serde::{Deserialize, Serialize};

use crate::rest::{ResourceDescriptor, RestResource, WritableResource};

/// The identity behind the credential in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Identifier of the credential.
    pub id: String,
    /// Company the credential grants access to.
    pub company_id: u64,
    /// Email of the user.
    pub email: Option<String>,
    /// Email used to sign in.
    pub login_email: Option<String>,
    /// Full name of the user.
    pub full_name: Option<String>,
    /// Given name of the user.
    pub first_name: Option<String>,
    /// Family name of the user.
    pub last_name: Option<String>,
    /// `None` when authenticated with an API key.
    pub employee_id: Option<u64>,
    /// Role of the user.
    pub role: Option<String>,
    /// Legal name of the company.
    pub legal_name: Option<String>,
    /// Locale of the user.
    pub locale: Option<String>,
    /// Name of the company.
    pub name: Option<String>,
    /// Factorial plan of the company.
    pub subscription_plan: Option<String>,
}

impl RestResource for Credentials {
    type Id = String;
    type Filters = ();

    const DESCRIPTOR: ResourceDescriptor =
        ResourceDescriptor::new("Credentials", "api_public/credentials", &[]);
}

/// A webhook the API delivers events to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSubscription {
    /// Unique identifier.
    pub id: u64,
    /// URL events are posted to.
    pub target_url: String,
    /// Event type, e.g. `employees/employee/create`.
    #[serde(rename = "type")]
    pub subscription_type: String,
    /// Company owning the subscription.
    pub company_id: Option<u64>,
    /// Subscription name.
    pub name: Option<String>,
    /// Secret echoed in every delivery.
    pub challenge: Option<String>,
    /// Whether events are delivered.
    #[serde(default)]
    pub enabled: bool,
    /// API version of the payloads.
    pub api_version: Option<String>,
}

/// Body for creating or editing a webhook subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookSubscriptionInput {
    /// URL events are posted to.
    pub target_url: String,
    /// Event type, e.g. `employees/employee/create`.
    #[serde(rename = "type")]
    pub subscription_type: String,
    /// Subscription name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Secret echoed in every delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
}

impl RestResource for WebhookSubscription {
    type Id = u64;
    type Filters = ();

    const DESCRIPTOR: ResourceDescriptor =
        ResourceDescriptor::new("WebhookSubscription", "api_public/webhook_subscriptions", &[])
            .writable();
}

impl WritableResource for WebhookSubscription {
    type Input = WebhookSubscriptionInput;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_webhook_type_field_is_renamed() {
        let subscription: WebhookSubscription = serde_json::from_value(json!({
            "id": 1,
            "target_url": "https://example.com/hook",
            "type": "employee/created",
            "enabled": true,
            "api_version": "2025-10-01"
        }))
        .unwrap();
        assert_eq!(subscription.subscription_type, "employee/created");

        let input = WebhookSubscriptionInput {
            target_url: "https://example.com/hook".to_string(),
            subscription_type: "employee/created".to_string(),
            name: None,
            challenge: None,
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"target_url": "https://example.com/hook", "type": "employee/created"})
        );
    }

    #[test]
    fn test_credentials_with_api_key_have_no_employee() {
        let credentials: Credentials = serde_json::from_value(json!({
            "id": "abc",
            "company_id": 5,
            "employee_id": null
        }))
        .unwrap();
        assert!(credentials.employee_id.is_none());
    }
}
