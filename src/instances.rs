//! User-level instance management
//!
//! These endpoints live directly under the host and authenticate the user
//! account with `x-user-id` / `x-user-token` on top of the bearer token.

use reqwest::Method;
use serde_json::{Value, json};

use crate::client::{RequestOptions, Scope, SdkwaClient};
use crate::error::Result;
use crate::types::InstanceOrder;

const INSTANCES_LIST: &str = "/api/v1/instance/user/instances/list";
const INSTANCE_CREATE: &str = "/api/v1/instance/user/instance/createByOrder";
const INSTANCE_EXTEND: &str = "/api/v1/instance/user/instance/extendByOrder";
const INSTANCE_DELETE: &str = "/api/v1/instance/user/instance/delete";
const INSTANCE_RESTORE: &str = "/api/v1/instance/user/instance/restore";

impl SdkwaClient {
    async fn user_call(&self, path: &str, body: Option<Value>) -> Result<Value> {
        let headers = self.user_headers()?;
        let options = match body {
            Some(body) => RequestOptions::json(body)?,
            None => RequestOptions::default(),
        };
        self.request(Method::POST, path, Scope::User, options.with_headers(headers))
            .await
    }

    /// All instances of the user account
    pub async fn get_instances(&self) -> Result<Value> {
        self.user_call(INSTANCES_LIST, None).await
    }

    pub async fn create_instance(
        &self,
        tariff: &str,
        period: &str,
        payment_type: Option<&str>,
    ) -> Result<Value> {
        let order = InstanceOrder {
            id_instance: None,
            tariff,
            period,
            payment_type,
        };
        self.user_call(INSTANCE_CREATE, Some(json!(order))).await
    }

    /// Prolong a paid instance
    pub async fn extend_instance(
        &self,
        id_instance: i64,
        tariff: &str,
        period: &str,
        payment_type: Option<&str>,
    ) -> Result<Value> {
        let order = InstanceOrder {
            id_instance: Some(id_instance),
            tariff,
            period,
            payment_type,
        };
        self.user_call(INSTANCE_EXTEND, Some(json!(order))).await
    }

    pub async fn delete_instance(&self, id_instance: i64) -> Result<Value> {
        self.user_call(INSTANCE_DELETE, Some(json!({ "idInstance": id_instance })))
            .await
    }

    pub async fn restore_instance(&self, id_instance: i64) -> Result<Value> {
        self.user_call(INSTANCE_RESTORE, Some(json!({ "idInstance": id_instance })))
            .await
    }
}
