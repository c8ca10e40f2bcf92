//! Instance account calls: settings, state, authorization

use serde_json::{Value, json};

use crate::client::SdkwaClient;
use crate::error::Result;
use crate::types::{InstanceSettings, QrResponse, RegistrationCodeRequest, StateInstance};

impl SdkwaClient {
    /// Current instance settings
    pub async fn get_settings(&self) -> Result<Value> {
        self.get("/getSettings").await
    }

    pub async fn set_settings(&self, settings: &InstanceSettings) -> Result<Value> {
        self.post_json("/setSettings", settings).await
    }

    /// Authorization state (`authorized`, `notAuthorized`, `blocked`, ...)
    pub async fn get_state_instance(&self) -> Result<StateInstance> {
        self.get("/getStateInstance").await
    }

    pub async fn get_warming_phone_status(&self) -> Result<Value> {
        self.get("/getWarmingPhoneStatus").await
    }

    pub async fn reboot(&self) -> Result<Value> {
        self.get("/reboot").await
    }

    pub async fn logout(&self) -> Result<Value> {
        self.get("/logout").await
    }

    /// QR code to link the instance, as base64 PNG
    pub async fn get_qr(&self) -> Result<QrResponse> {
        self.get("/qr").await
    }

    /// Pairing code for "link with phone number"
    pub async fn get_authorization_code(&self, phone_number: i64) -> Result<Value> {
        self.post_json(
            "/getAuthorizationCode",
            json!({ "phoneNumber": phone_number }),
        )
        .await
    }

    pub async fn request_registration_code(
        &self,
        request: &RegistrationCodeRequest,
    ) -> Result<Value> {
        self.post_json("/requestRegistrationCode", request).await
    }

    pub async fn send_registration_code(&self, code: &str) -> Result<Value> {
        self.post_json("/sendRegistrationCode", json!({ "code": code }))
            .await
    }
}
