//! Outgoing messages, uploads, history and the send queue

use reqwest::multipart::Form;
use serde_json::Value;

use crate::client::{SdkwaClient, file_part};
use crate::error::Result;
use crate::types::{
    ChatHistoryRequest, FileSource, SendContactRequest, SendFileByUploadRequest,
    SendFileByUrlRequest, SendLocationRequest, SendMessageRequest, SendMessageResponse,
    UploadFileResponse,
};

impl SdkwaClient {
    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<SendMessageResponse> {
        self.post_json("/sendMessage", request).await
    }

    pub async fn send_contact(&self, request: &SendContactRequest) -> Result<SendMessageResponse> {
        self.post_json("/sendContact", request).await
    }

    /// Upload a file and send it in one multipart call
    pub async fn send_file_by_upload(
        &self,
        request: SendFileByUploadRequest,
    ) -> Result<SendMessageResponse> {
        let mut form = Form::new()
            .text("chatId", request.chat_id)
            .part("file", file_part(request.file, request.file_name).await?);
        if let Some(caption) = request.caption {
            form = form.text("caption", caption);
        }
        if let Some(quoted_message_id) = request.quoted_message_id {
            form = form.text("quotedMessageId", quoted_message_id);
        }
        self.post_multipart("/sendFileByUpload", form).await
    }

    pub async fn send_file_by_url(
        &self,
        request: &SendFileByUrlRequest,
    ) -> Result<SendMessageResponse> {
        self.post_json("/sendFileByUrl", request).await
    }

    pub async fn send_location(
        &self,
        request: &SendLocationRequest,
    ) -> Result<SendMessageResponse> {
        self.post_json("/sendLocation", request).await
    }

    /// Store a file on the gateway; the returned URL works with `send_file_by_url`
    pub async fn upload_file(&self, file: FileSource) -> Result<UploadFileResponse> {
        let file_name = file.base_name().unwrap_or_else(|| "file".to_string());
        let form = Form::new().part("file", file_part(file, file_name).await?);
        self.post_multipart("/uploadFile", form).await
    }

    pub async fn get_chat_history(&self, request: &ChatHistoryRequest) -> Result<Value> {
        self.post_json("/getChatHistory", request).await
    }

    /// Drop every message still waiting to be sent
    pub async fn clear_messages_queue(&self) -> Result<Value> {
        self.get("/clearMessagesQueue").await
    }

    pub async fn show_messages_queue(&self) -> Result<Value> {
        self.get("/showMessagesQueue").await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::test_client;
    use crate::types::*;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{body_json, body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    #[tokio::test]
    async fn test_send_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/whatsapp/test_instance/sendMessage"))
            .and(body_json(json!({"chatId": "79999999999@c.us", "message": "Hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"idMessage": "3EB0C767D097B7C7C030"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_client(&server)
            .send_message(&SendMessageRequest::new("79999999999@c.us", "Hello"))
            .await
            .unwrap();
        assert_eq!(response.id_message, "3EB0C767D097B7C7C030");
    }

    #[tokio::test]
    async fn test_send_contact_and_location() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/whatsapp/test_instance/sendContact"))
            .and(body_json(json!({
                "chatId": "79999999999@c.us",
                "contact": {"phoneContact": 79001234567i64, "firstName": "Ivan"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"idMessage": "C1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/whatsapp/test_instance/sendLocation"))
            .and(body_json(json!({
                "chatId": "79999999999@c.us",
                "nameLocation": "Restaurant",
                "latitude": 12.3456789,
                "longitude": 10.1112131
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"idMessage": "L1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let contact = client
            .send_contact(&SendContactRequest {
                chat_id: "79999999999@c.us".to_string(),
                contact: Contact {
                    phone_contact: 79001234567,
                    first_name: Some("Ivan".to_string()),
                    ..Default::default()
                },
                quoted_message_id: None,
            })
            .await
            .unwrap();
        assert_eq!(contact.id_message, "C1");

        let location = client
            .send_location(&SendLocationRequest {
                chat_id: "79999999999@c.us".to_string(),
                name_location: Some("Restaurant".to_string()),
                address: None,
                latitude: 12.3456789,
                longitude: 10.1112131,
                quoted_message_id: None,
            })
            .await
            .unwrap();
        assert_eq!(location.id_message, "L1");
    }

    #[tokio::test]
    async fn test_send_file_by_upload_is_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/whatsapp/test_instance/sendFileByUpload"))
            .and(header_exists("authorization"))
            .and(body_string_contains("name=\"chatId\""))
            .and(body_string_contains("filename=\"photo.jpg\""))
            .and(body_string_contains("name=\"caption\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"idMessage": "F1"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_client(&server)
            .send_file_by_upload(SendFileByUploadRequest {
                chat_id: "79999999999@c.us".to_string(),
                file: FileSource::Bytes(b"jpeg bytes".to_vec()),
                file_name: "photo.jpg".to_string(),
                caption: Some("Look".to_string()),
                quoted_message_id: None,
            })
            .await
            .unwrap();
        assert_eq!(response.id_message, "F1");

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
    }

    #[tokio::test]
    async fn test_upload_file_from_path_uses_base_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/whatsapp/test_instance/uploadFile"))
            .and(body_string_contains("filename=\"document.pdf\""))
            .and(body_string_contains("pdf payload"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"urlFile": "https://media.sdkwa.pro/document.pdf"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("document.pdf");
        std::fs::File::create(&file_path)
            .unwrap()
            .write_all(b"pdf payload")
            .unwrap();

        let uploaded = test_client(&server)
            .upload_file(FileSource::Path(file_path))
            .await
            .unwrap();
        assert_eq!(uploaded.url_file, "https://media.sdkwa.pro/document.pdf");
    }

    #[tokio::test]
    async fn test_upload_bytes_default_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/whatsapp/test_instance/uploadFile"))
            .and(body_string_contains("filename=\"file\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"urlFile": "u"})))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server)
            .upload_file(FileSource::Bytes(vec![0, 1, 2]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_file_by_url_history_and_queue() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/whatsapp/test_instance/sendFileByUrl"))
            .and(body_json(json!({
                "chatId": "79999999999@c.us",
                "urlFile": "https://example.com/a.png",
                "fileName": "a.png"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"idMessage": "U1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/whatsapp/test_instance/getChatHistory"))
            .and(body_json(json!({"chatId": "79999999999@c.us", "count": 10})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/whatsapp/test_instance/showMessagesQueue"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/whatsapp/test_instance/clearMessagesQueue"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isCleared": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .send_file_by_url(&SendFileByUrlRequest {
                chat_id: "79999999999@c.us".to_string(),
                url_file: "https://example.com/a.png".to_string(),
                file_name: "a.png".to_string(),
                caption: None,
                quoted_message_id: None,
            })
            .await
            .unwrap();
        client
            .get_chat_history(&ChatHistoryRequest {
                chat_id: "79999999999@c.us".to_string(),
                count: Some(10),
            })
            .await
            .unwrap();
        client.show_messages_queue().await.unwrap();
        let cleared = client.clear_messages_queue().await.unwrap();
        assert_eq!(cleared["isCleared"], true);
    }
}
