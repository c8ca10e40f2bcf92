//! Telegram-only calls
//!
//! Always sent under the `telegram` messenger segment, whatever messenger the
//! client handle is set to.

use serde_json::{Value, json};

use crate::client::SdkwaClient;
use crate::error::Result;
use crate::types::{CreateAppRequest, MessengerType};

impl SdkwaClient {
    fn telegram_handle(&self) -> SdkwaClient {
        if self.messenger() == MessengerType::Telegram {
            self.clone()
        } else {
            self.telegram()
        }
    }

    /// First authorization step: Telegram sends a code to the phone
    pub async fn send_confirmation_code(&self, phone_number: i64) -> Result<Value> {
        self.telegram_handle()
            .post_json(
                "/sendConfirmationCode",
                json!({ "phoneNumber": phone_number }),
            )
            .await
    }

    /// Second authorization step with the code received on the phone
    pub async fn sign_in_with_confirmation_code(&self, code: &str) -> Result<Value> {
        self.telegram_handle()
            .post_json("/signInWithConfirmationCode", json!({ "code": code }))
            .await
    }

    pub async fn create_app(&self, request: &CreateAppRequest) -> Result<Value> {
        self.telegram_handle().post_json("/createApp", request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_client;
    use crate::types::CreateAppRequest;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_authorization_flow_uses_telegram_segment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/telegram/test_instance/sendConfirmationCode"))
            .and(body_json(json!({"phoneNumber": 712345678989i64})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/telegram/test_instance/signInWithConfirmationCode"))
            .and(body_json(json!({"code": "12345"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "authorized"})))
            .expect(1)
            .mount(&server)
            .await;

        // Default handle targets WhatsApp; Telegram calls switch on their own
        let client = test_client(&server);
        client.send_confirmation_code(712345678989).await.unwrap();
        let signed_in = client
            .sign_in_with_confirmation_code("12345")
            .await
            .unwrap();
        assert_eq!(signed_in["status"], "authorized");
    }

    #[tokio::test]
    async fn test_create_app() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/telegram/test_instance/createApp"))
            .and(body_json(json!({
                "title": "My Awesome App",
                "shortName": "myapp",
                "url": "https://myapp.com",
                "description": "This is my awesome app"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"appId": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let request = CreateAppRequest {
            title: "My Awesome App".to_string(),
            short_name: "myapp".to_string(),
            url: "https://myapp.com".to_string(),
            description: "This is my awesome app".to_string(),
        };
        test_client(&server).create_app(&request).await.unwrap();
    }
}
