//! Contacts, chats and the instance's own profile

use reqwest::multipart::Form;
use serde_json::{Value, json};

use crate::client::{SdkwaClient, file_part};
use crate::error::Result;
use crate::types::{FileSource, ReadChatRequest};

impl SdkwaClient {
    pub async fn get_contacts(&self) -> Result<Value> {
        self.get("/getContacts").await
    }

    pub async fn get_chats(&self) -> Result<Value> {
        self.get("/getChats").await
    }

    pub async fn get_contact_info(&self, chat_id: &str) -> Result<Value> {
        self.post_json("/getContactInfo", json!({ "chatId": chat_id }))
            .await
    }

    pub async fn set_profile_picture(&self, file: FileSource) -> Result<Value> {
        let file_name = file
            .base_name()
            .unwrap_or_else(|| "profile.jpg".to_string());
        let form = Form::new().part("file", file_part(file, file_name).await?);
        self.post_multipart("/setProfilePicture", form).await
    }

    pub async fn set_profile_name(&self, name: &str) -> Result<Value> {
        self.post_json("/setProfileName", json!({ "name": name }))
            .await
    }

    pub async fn set_profile_status(&self, status: &str) -> Result<Value> {
        self.post_json("/setProfileStatus", json!({ "status": status }))
            .await
    }

    pub async fn get_avatar(&self, chat_id: &str) -> Result<Value> {
        self.post_json("/getAvatar", json!({ "chatId": chat_id }))
            .await
    }

    /// Whether a phone number has a WhatsApp account
    pub async fn check_whatsapp(&self, phone_number: i64) -> Result<Value> {
        self.post_json("/checkWhatsapp", json!({ "phoneNumber": phone_number }))
            .await
    }

    pub async fn read_chat(&self, request: &ReadChatRequest) -> Result<Value> {
        self.post_json("/readChat", request).await
    }

    pub async fn archive_chat(&self, chat_id: &str) -> Result<Value> {
        self.post_json("/archiveChat", json!({ "chatId": chat_id }))
            .await
    }

    pub async fn unarchive_chat(&self, chat_id: &str) -> Result<Value> {
        self.post_json("/unarchiveChat", json!({ "chatId": chat_id }))
            .await
    }

    pub async fn delete_message(&self, chat_id: &str, id_message: &str) -> Result<Value> {
        self.post_json(
            "/deleteMessage",
            json!({ "chatId": chat_id, "idMessage": id_message }),
        )
        .await
    }
}
